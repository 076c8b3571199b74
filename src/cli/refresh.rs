use owo_colors::{OwoColorize, Style};
use spinners_rs::{Spinner, Spinners};
use tabled::{Table, Tabled};

use crate::services::AppState;

#[derive(Debug, Tabled)]
struct StringifiedRate {
    currency: String,
    rate: String,
}

pub async fn refresh(state: &AppState) -> anyhow::Result<()> {
    let mut sp = Spinner::new(Spinners::Point, "Fetching exchange rates...");
    sp.start();
    let rates = state.rates.refresh().await?;
    sp.stop();

    let mut stringified_rates: Vec<StringifiedRate> = vec![];
    for (currency, rate) in &rates {
        stringified_rates.push(StringifiedRate {
            currency: currency.clone(),
            rate: rate.to_string(),
        });
    }
    stringified_rates.sort_by(|a, b| a.currency.cmp(&b.currency));

    let table = Table::new(&stringified_rates).to_string();
    println!("\n");
    println!("{}", table);
    let summary_style = Style::new().black().on_white().bold();
    println!(
        "{}",
        format!("{} exchange rates active", rates.len()).style(summary_style)
    );
    Ok(())
}
