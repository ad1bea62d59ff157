use serde::{Deserialize, Serialize};

use crate::canslim::criterion::CriterionCode;
use crate::error::{ensure_non_negative, ensure_positive};
use crate::ValidationError;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Composite weight of each criterion. Leadership (L) carries the most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    pub c: f64,
    pub a: f64,
    pub n: f64,
    pub s: f64,
    pub l: f64,
    pub i: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            c: 0.20,
            a: 0.15,
            n: 0.15,
            s: 0.10,
            l: 0.25,
            i: 0.15,
        }
    }
}

impl CriterionWeights {
    pub fn weight(&self, code: CriterionCode) -> f64 {
        match code {
            CriterionCode::C => self.c,
            CriterionCode::A => self.a,
            CriterionCode::N => self.n,
            CriterionCode::S => self.s,
            CriterionCode::L => self.l,
            CriterionCode::I => self.i,
        }
    }

    pub fn total(&self) -> f64 {
        CriterionCode::ALL.iter().map(|code| self.weight(*code)).sum()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("weights.c", self.c)?;
        ensure_non_negative("weights.a", self.a)?;
        ensure_non_negative("weights.n", self.n)?;
        ensure_non_negative("weights.s", self.s)?;
        ensure_non_negative("weights.l", self.l)?;
        ensure_non_negative("weights.i", self.i)?;

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ValidationError::InvalidWeights { total });
        }
        Ok(())
    }
}

/// Scorer settings that the screener filter does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: CriterionWeights,
    /// Percent of float; the I criterion's threshold.
    pub min_institutional_ownership: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            min_institutional_ownership: 25.0,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.weights.validate()?;
        ensure_positive("min_institutional_ownership", self.min_institutional_ownership)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = CriterionWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
        assert_eq!(weights.weight(CriterionCode::L), 0.25);
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let weights = CriterionWeights {
            l: 0.50,
            ..CriterionWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(ValidationError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let weights = CriterionWeights {
            c: -0.20,
            l: 0.65,
            ..CriterionWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(ValidationError::NegativeValue { field: "weights.c" })
        );
    }

    #[test]
    fn zero_institutional_threshold_is_rejected() {
        let config = ScoringConfig {
            min_institutional_ownership: 0.0,
            ..ScoringConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::NonPositiveValue {
                field: "min_institutional_ownership"
            })
        );
    }
}
