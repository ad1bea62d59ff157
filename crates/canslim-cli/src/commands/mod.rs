mod config;
mod market;
mod rs_rating;
mod score;
mod screen;

use std::fs;
use std::path::Path;
use std::time::Instant;

use canslim_core::{
    EngineConfig, Envelope, EnvelopeError, EnvelopeMeta, ScreenerFilter, UtcDateTime,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command, FilterArgs};
use crate::error::CliError;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

/// Settings shared by every command.
pub struct Context {
    pub config: EngineConfig,
    pub as_of: UtcDateTime,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        let as_of = match &cli.as_of {
            Some(raw) => UtcDateTime::parse(raw)?,
            None => UtcDateTime::now(),
        };
        Ok(Self { config, as_of })
    }

    /// Configured filter with command-line overrides applied and validated.
    pub fn filter(&self, overrides: &FilterArgs) -> Result<ScreenerFilter, CliError> {
        let filter = apply_filter_overrides(self.config.filter.clone(), overrides);
        filter.validate()?;
        Ok(filter)
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let context = Context::from_cli(cli)?;

    let (operation, command_result) = match &cli.command {
        Command::Market(args) => ("market", market::run(args, &context)?),
        Command::Score(args) => ("score", score::run(args, &context)?),
        Command::Screen(args) => ("screen", screen::run(args, &context)?),
        Command::RsRating(args) => ("rs-rating", rs_rating::run(args, &context)?),
        Command::Config(args) => ("config", config::run(args, &context)?),
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        operation,
        UtcDateTime::now(),
        latency_ms,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_filter_overrides(mut filter: ScreenerFilter, overrides: &FilterArgs) -> ScreenerFilter {
    if let Some(value) = overrides.min_rs_rating {
        filter.min_rs_rating = value;
    }
    if let Some(value) = overrides.min_eps_growth_quarterly {
        filter.min_eps_growth_quarterly = value;
    }
    if let Some(value) = overrides.min_eps_growth_annual {
        filter.min_eps_growth_annual = value;
    }
    if let Some(value) = overrides.max_distance_from_52w_high {
        filter.max_distance_from_52w_high = value;
    }
    if let Some(value) = overrides.min_volume_ratio {
        filter.min_volume_ratio = value;
    }
    if let Some(value) = overrides.min_canslim_score {
        filter.min_canslim_score = value;
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_win_over_config() {
        let overrides = FilterArgs {
            min_rs_rating: Some(90.0),
            ..FilterArgs::default()
        };
        let filter = apply_filter_overrides(ScreenerFilter::default(), &overrides);
        assert_eq!(filter.min_rs_rating, 90.0);
        assert_eq!(filter.min_volume_ratio, 1.5);
    }

    #[test]
    fn unreadable_json_is_an_input_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").expect("write");

        let err = read_json::<Value>(&path).expect_err("must fail");
        assert!(matches!(err, CliError::Input { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
