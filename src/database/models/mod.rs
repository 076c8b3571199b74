pub mod conversion_fee;
pub mod exchange_rate;
