use tabled::{Table, Tabled};

use crate::services::AppState;

#[derive(Debug, Tabled)]
struct StringifiedFee {
    id: String,
    from: String,
    to: String,
    fee: String,
}

pub async fn fees(state: &AppState) -> anyhow::Result<()> {
    let fees = state.fees.list_fees().await?;

    if fees.is_empty() {
        println!("No conversion fees configured, the default fee applies to every pair.");
        return Ok(());
    }

    let stringified_fees: Vec<StringifiedFee> = fees
        .iter()
        .map(|fee| StringifiedFee {
            id: fee.id.map(|id| id.to_string()).unwrap_or_default(),
            from: fee.from_currency.clone(),
            to: fee.to_currency.clone(),
            fee: fee.fee.to_string(),
        })
        .collect();

    let table = Table::new(&stringified_fees).to_string();
    println!("{}", table);
    Ok(())
}
