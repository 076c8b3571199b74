use rust_decimal::Decimal;
use serde::Serialize;
use tokio_postgres::Row;

/// Fee charged for one ordered currency pair, as a fraction of the amount.
/// `id` is `None` until the row has been stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionFee {
    pub id: Option<i64>,
    pub from_currency: String,
    pub to_currency: String,
    pub fee: Decimal,
}

impl ConversionFee {
    pub fn from_row(row: &Row) -> ConversionFee {
        ConversionFee {
            id: row.try_get("id").unwrap(),
            from_currency: row.try_get("from_currency").unwrap(),
            to_currency: row.try_get("to_currency").unwrap(),
            fee: row.try_get("fee").unwrap(),
        }
    }
}
