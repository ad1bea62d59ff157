use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_within};
use crate::growth::{distance_from_high, volume_ratio, EpsHistory};
use crate::ValidationError;

/// Six scalar metrics the scorer grades. `None` means the metric is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanslimInputs {
    /// Percent; may be negative.
    pub eps_growth_quarterly: Option<f64>,
    /// Percent; may be negative.
    pub eps_growth_annual: Option<f64>,
    /// Percent below the 52-week high.
    pub distance_from_52w_high: Option<f64>,
    pub volume_ratio: Option<f64>,
    /// 1..=99 in practice, accepted within 0..=100.
    pub rs_rating: Option<f64>,
    /// Percent of float.
    pub institutional_ownership: Option<f64>,
}

impl CanslimInputs {
    /// Rejects present values that cannot be scored. Missing values always pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = self.eps_growth_quarterly {
            ensure_finite("eps_growth_quarterly", value)?;
        }
        if let Some(value) = self.eps_growth_annual {
            ensure_finite("eps_growth_annual", value)?;
        }
        if let Some(value) = self.distance_from_52w_high {
            ensure_non_negative("distance_from_52w_high", value)?;
        }
        if let Some(value) = self.volume_ratio {
            ensure_non_negative("volume_ratio", value)?;
        }
        if let Some(value) = self.rs_rating {
            ensure_within("rs_rating", value, 0.0, 100.0)?;
        }
        if let Some(value) = self.institutional_ownership {
            ensure_within("institutional_ownership", value, 0.0, 100.0)?;
        }
        Ok(())
    }

    pub fn available_count(&self) -> usize {
        [
            self.eps_growth_quarterly,
            self.eps_growth_annual,
            self.distance_from_52w_high,
            self.volume_ratio,
            self.rs_rating,
            self.institutional_ownership,
        ]
        .iter()
        .filter(|value| value.is_some())
        .count()
    }
}

/// Raw per-stock data from which [`CanslimInputs`] can be derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockFundamentals {
    pub eps: EpsHistory,
    pub price: Option<f64>,
    pub high_52w: Option<f64>,
    pub volume: Option<f64>,
    pub average_volume_50d: Option<f64>,
    pub rs_rating: Option<f64>,
    pub institutional_ownership: Option<f64>,
}

impl StockFundamentals {
    pub fn to_inputs(&self) -> Result<CanslimInputs, ValidationError> {
        self.eps.validate()?;

        let distance = match (self.price, self.high_52w) {
            (Some(price), Some(high)) => {
                ensure_non_negative("price", price)?;
                ensure_non_negative("high_52w", high)?;
                distance_from_high(price, high)
            }
            _ => None,
        };
        let ratio = match (self.volume, self.average_volume_50d) {
            (Some(volume), Some(average)) => {
                ensure_non_negative("volume", volume)?;
                ensure_non_negative("average_volume_50d", average)?;
                volume_ratio(volume, average)
            }
            _ => None,
        };

        let inputs = CanslimInputs {
            eps_growth_quarterly: self.eps.quarterly_growth(),
            eps_growth_annual: self.eps.annual_growth(),
            distance_from_52w_high: distance,
            volume_ratio: ratio,
            rs_rating: self.rs_rating,
            institutional_ownership: self.institutional_ownership,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}
