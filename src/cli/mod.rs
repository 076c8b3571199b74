pub mod convert;
pub mod fees;
pub mod refresh;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::api;
use crate::services::AppState;

#[derive(Parser, Debug)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Api,
    Refresh,
    Convert {
        amount: Decimal,
        from_currency: String,
        to_currency: String,
    },
    Fees,
}

pub async fn cli() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        Command::Api => {
            println!("Starting web server...");
            api::api().await?;
        }
        Command::Refresh => {
            let state = AppState::from_env()?;
            refresh::refresh(&state).await?;
        }
        Command::Convert {
            amount,
            from_currency,
            to_currency,
        } => {
            let state = AppState::from_env()?;
            convert::convert(&state, amount, &from_currency, &to_currency).await?;
        }
        Command::Fees => {
            let state = AppState::from_env()?;
            fees::fees(&state).await?;
        }
    }
    Ok(())
}
