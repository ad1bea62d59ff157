use thiserror::Error;

/// Invalid-input errors exposed by `canslim-core`.
///
/// Every evaluation entry point fails with one of these when a supplied value is
/// unusable. Missing (null) metrics are not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },
    #[error("field '{field}' must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("'{lower}' must not exceed '{upper}'")]
    InconsistentThresholds {
        lower: &'static str,
        upper: &'static str,
    },
    #[error("need at least {required} closes for {indicator}, got {provided}")]
    InsufficientHistory {
        indicator: &'static str,
        required: usize,
        provided: usize,
    },

    #[error("criterion weights must be non-negative and sum to 1.0, got {total}")]
    InvalidWeights { total: f64 },

    #[error("page limit must be within 1..={max}, got {limit}")]
    InvalidPageLimit { limit: usize, max: usize },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

impl ValidationError {
    /// Name of the offending input field, when the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NonFiniteValue { field }
            | Self::NegativeValue { field }
            | Self::NonPositiveValue { field }
            | Self::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

pub(crate) fn ensure_within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
