pub mod candle;

// Re-export the data types for convenient access (e.g. `use crate::market_data::Kline`).
pub use candle::{Candle, Kline};
