use rust_decimal::Decimal;

/// One currency's quote against the feed's implicit base currency.
#[derive(Debug, Clone)]
pub struct ExchangeRate {
    pub currency: String,
    pub rate: Decimal,
}
