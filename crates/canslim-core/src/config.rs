//! YAML configuration file.
//!
//! ```yaml
//! filter:
//!   min_rs_rating: 85
//! scoring:
//!   min_institutional_ownership: 30
//!   weights: { c: 0.2, a: 0.15, n: 0.15, s: 0.1, l: 0.25, i: 0.15 }
//! market:
//!   vix_calm: 18
//! ```
//!
//! Every section and key is optional; absent keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canslim::ScoringConfig;
use crate::market::MarketThresholds;
use crate::screener::ScreenerFilter;
use crate::{CoreError, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub filter: ScreenerFilter,
    pub scoring: ScoringConfig,
    pub market: MarketThresholds,
}

impl EngineConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, CoreError> {
        let config: Self = if input.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(input)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.filter.validate()?;
        self.scoring.validate()?;
        self.market.validate()?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, CoreError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_yaml_str("").expect("valid");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_yaml_str(
            "filter:\n  min_rs_rating: 90\nscoring:\n  min_institutional_ownership: 30\n",
        )
        .expect("valid");

        assert_eq!(config.filter.min_rs_rating, 90.0);
        assert_eq!(config.filter.min_volume_ratio, 1.5);
        assert_eq!(config.scoring.min_institutional_ownership, 30.0);
        assert_eq!(config.scoring.weights.l, 0.25);
        assert_eq!(config.market.vix_stressed, 25.0);
    }

    #[test]
    fn loaded_values_are_validated() {
        let err = EngineConfig::from_yaml_str("scoring:\n  weights:\n    l: 0.9\n")
            .expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn unknown_section_is_a_config_error() {
        let err = EngineConfig::from_yaml_str("filters:\n  min_rs_rating: 90\n")
            .expect_err("must fail");
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn yaml_output_reloads() {
        let original = EngineConfig::default();
        let yaml = original.to_yaml().expect("serializes");
        assert_eq!(EngineConfig::from_yaml_str(&yaml).expect("valid"), original);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("canslim.yaml");
        fs::write(&path, "market:\n  vix_calm: 18\n").expect("write config");

        let config = EngineConfig::load(&path).expect("valid");
        assert_eq!(config.market.vix_calm, 18.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = EngineConfig::load(dir.path().join("absent.yaml")).expect_err("must fail");
        assert!(matches!(err, CoreError::Io(_)));
    }
}
