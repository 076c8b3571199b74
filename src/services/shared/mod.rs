pub mod env;
pub mod logger;

/// Currency codes are ISO 4217 style: exactly three uppercase ASCII letters.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_uppercase_letters() {
        assert!(is_currency_code("USD"));
        assert!(is_currency_code("JPY"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_currency_code("usd"));
        assert!(!is_currency_code("US"));
        assert!(!is_currency_code("USDT"));
        assert!(!is_currency_code("U$D"));
        assert!(!is_currency_code(""));
        assert!(!is_currency_code("ÈUR"));
    }
}
