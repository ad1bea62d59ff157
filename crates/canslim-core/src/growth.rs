//! Scalar metrics derived from raw fundamentals and quotes.
//!
//! | Metric | Formula | Unavailable when |
//! |---|---|---|
//! | quarterly EPS growth | YoY vs the quarter four back, else vs the prior quarter | < 2 quarters, base 0 |
//! | annual EPS growth | latest vs previous year | < 2 years, base 0 |
//! | distance from 52w high | `(high - price) / high * 100`, floored at 0 | high <= 0 |
//! | volume ratio | `volume / average_volume` | average <= 0 |

use serde::{Deserialize, Serialize};

use crate::error::ensure_finite;
use crate::ValidationError;

/// Quarters back to the same fiscal quarter a year earlier.
const YEAR_OVER_YEAR_LAG: usize = 4;

/// EPS histories, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsHistory {
    pub quarterly: Vec<f64>,
    pub annual: Vec<f64>,
}

impl EpsHistory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for value in &self.quarterly {
            ensure_finite("eps_quarterly", *value)?;
        }
        for value in &self.annual {
            ensure_finite("eps_annual", *value)?;
        }
        Ok(())
    }

    pub fn quarterly_growth(&self) -> Option<f64> {
        quarterly_eps_growth(&self.quarterly)
    }

    pub fn annual_growth(&self) -> Option<f64> {
        annual_eps_growth(&self.annual)
    }
}

/// Percentage change from `previous` to `current`, rounded to two decimals.
///
/// Measured against `|previous|` so a recovery from a loss reads as growth.
pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !current.is_finite() || !previous.is_finite() {
        return None;
    }
    let rate = (current - previous) / previous.abs() * 100.0;
    Some((rate * 100.0).round() / 100.0)
}

pub fn quarterly_eps_growth(quarters: &[f64]) -> Option<f64> {
    let current = *quarters.first()?;
    let base = quarters
        .get(YEAR_OVER_YEAR_LAG)
        .or_else(|| quarters.get(1))?;
    growth_rate(current, *base)
}

pub fn annual_eps_growth(years: &[f64]) -> Option<f64> {
    match years {
        [current, previous, ..] => growth_rate(*current, *previous),
        _ => None,
    }
}

pub fn distance_from_high(price: f64, high_52w: f64) -> Option<f64> {
    if !price.is_finite() || !high_52w.is_finite() || high_52w <= 0.0 {
        return None;
    }
    Some(((high_52w - price) / high_52w * 100.0).max(0.0))
}

pub fn volume_ratio(volume: f64, average_volume: f64) -> Option<f64> {
    if !volume.is_finite() || !average_volume.is_finite() || average_volume <= 0.0 {
        return None;
    }
    Some(volume / average_volume)
}
