//! Core evaluation engine for canslim.
//!
//! This crate contains:
//! - Domain value types and input validation
//! - Market-condition classification from benchmark indicators
//! - CAN-SLIM criterion grading and composite scoring
//! - Screener filter, ranking and pagination
//! - Derived-metric calculators (EPS growth, 52-week distance, volume ratio, RS rating)
//! - Response envelope and YAML configuration
//!
//! Every evaluation is a pure function of its arguments; timestamps are supplied
//! by the caller.

pub mod canslim;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod growth;
pub mod market;
pub mod relative_strength;
pub mod screener;

pub use canslim::{
    score_canslim, CanslimInputs, CanslimScore, CanslimScorer, CriterionCode, CriterionResult,
    CriterionWeights, Grade, ScoringConfig, StockFundamentals, PASSING_SCORE,
};
pub use config::EngineConfig;
pub use domain::{Symbol, UtcDateTime};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use growth::EpsHistory;
pub use market::{
    classify_market_condition, IndicatorSignals, IndicatorSnapshot, MarketClassification,
    MarketCondition, MarketConditionClassifier, MarketThresholds, Signal, SignalReading,
};
pub use relative_strength::{rate_universe, PricePerformance, RsRating};
pub use screener::{
    Page, RejectedStock, ScreenCandidate, ScreenResult, Screener, ScreenerFilter, StockSummary,
};
