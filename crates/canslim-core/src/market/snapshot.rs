use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ensure_within};
use crate::market::indicators::{rsi, sma, LONG_TERM_MA_PERIOD, RSI_PERIOD};
use crate::{UtcDateTime, ValidationError};

/// Benchmark indicator readings consumed by the market classifier.
///
/// `sp500_above_ma200` is carried as supplied; the classifier trusts it rather
/// than re-deriving it from the price/MA pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub vix: f64,
    pub sp500_price: f64,
    pub sp500_rsi: f64,
    pub sp500_ma200: f64,
    pub sp500_above_ma200: bool,
    pub put_call_ratio: f64,
    pub retrieved_at: UtcDateTime,
}

impl IndicatorSnapshot {
    pub fn new(
        vix: f64,
        sp500_price: f64,
        sp500_rsi: f64,
        sp500_ma200: f64,
        put_call_ratio: f64,
        retrieved_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        let snapshot = Self {
            vix,
            sp500_price,
            sp500_rsi,
            sp500_ma200,
            sp500_above_ma200: sp500_price > sp500_ma200,
            put_call_ratio,
            retrieved_at,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Builds a snapshot from benchmark closes (oldest first), deriving the last
    /// close, RSI(14) and the 200-day simple moving average.
    pub fn from_benchmark_closes(
        vix: f64,
        closes: &[f64],
        put_call_ratio: f64,
        retrieved_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        let required = LONG_TERM_MA_PERIOD.max(RSI_PERIOD + 1);
        if closes.len() < required {
            return Err(ValidationError::InsufficientHistory {
                indicator: "sp500_ma200",
                required,
                provided: closes.len(),
            });
        }
        for close in closes {
            ensure_positive("sp500_close", *close)?;
        }

        let price = closes[closes.len() - 1];
        let ma200 = sma(closes, LONG_TERM_MA_PERIOD).ok_or(ValidationError::InsufficientHistory {
            indicator: "sp500_ma200",
            required,
            provided: closes.len(),
        })?;
        let rsi = rsi(closes, RSI_PERIOD).ok_or(ValidationError::InsufficientHistory {
            indicator: "sp500_rsi",
            required: RSI_PERIOD + 1,
            provided: closes.len(),
        })?;

        Self::new(vix, price, rsi, ma200, put_call_ratio, retrieved_at)
    }

    /// Checks every numeric field; a snapshot built field-by-field (for example
    /// deserialized from JSON) goes through this before classification.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("vix", self.vix)?;
        ensure_positive("sp500_price", self.sp500_price)?;
        ensure_within("sp500_rsi", self.sp500_rsi, 0.0, 100.0)?;
        ensure_positive("sp500_ma200", self.sp500_ma200)?;
        ensure_non_negative("put_call_ratio", self.put_call_ratio)?;
        Ok(())
    }
}
