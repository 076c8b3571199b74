use owo_colors::{OwoColorize, Style};
use rust_decimal::Decimal;
use spinners_rs::{Spinner, Spinners};

use crate::services::shared::is_currency_code;
use crate::services::AppState;

pub async fn convert(
    state: &AppState,
    amount: Decimal,
    from_currency: &str,
    to_currency: &str,
) -> anyhow::Result<()> {
    let from_currency = from_currency.to_uppercase();
    let to_currency = to_currency.to_uppercase();
    if !is_currency_code(&from_currency) || !is_currency_code(&to_currency) {
        anyhow::bail!("currency codes must be 3 letters, e.g. USD");
    }
    if amount < Decimal::ZERO {
        anyhow::bail!("the amount must not be negative");
    }

    let mut sp = Spinner::new(Spinners::Point, "Fetching exchange rates...");
    sp.start();
    state.rates.refresh().await?;
    sp.stop();

    let converted = state
        .engine
        .convert(amount, &from_currency, &to_currency)
        .await?;

    let result_style = Style::new().black().on_white().bold();
    println!("\n");
    println!(
        "{} {} = {}",
        amount,
        from_currency,
        format!("{} {}", converted, to_currency).style(result_style)
    );
    Ok(())
}
