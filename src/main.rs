mod api;
mod cli;
mod database;
mod services;

use cli::cli;
use database::run_migrations;
use services::shared::{env::check_for_env_variables, logger::init_logger};

async fn run_cambio() -> anyhow::Result<()> {
    check_for_env_variables();
    init_logger();
    run_migrations().await?;
    cli().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_cambio().await?;
    Ok(())
}
