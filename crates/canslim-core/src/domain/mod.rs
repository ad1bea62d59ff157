//! Shared value types: tickers and UTC timestamps.

mod symbol;
mod timestamp;

pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
