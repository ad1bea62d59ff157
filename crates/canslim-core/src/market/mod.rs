//! Market-condition classification from benchmark indicators.

mod classifier;
pub mod indicators;
mod snapshot;

pub use classifier::{
    classify_market_condition, IndicatorSignals, MarketClassification, MarketCondition,
    MarketConditionClassifier, MarketThresholds, Signal, SignalReading, MARKET_SCORE_MAX,
    MARKET_SCORE_MIN, RISK_OFF_THRESHOLD, RISK_ON_THRESHOLD,
};
pub use snapshot::IndicatorSnapshot;
