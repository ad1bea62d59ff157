//! CAN-SLIM criterion grading and the weighted composite score.

mod config;
mod criterion;
mod grade;
mod inputs;
mod scorer;

pub use config::{CriterionWeights, ScoringConfig};
pub use criterion::{ratio_score, CriterionCode, CriterionResult, Direction};
pub use grade::{Grade, PASSING_SCORE};
pub use inputs::{CanslimInputs, StockFundamentals};
pub use scorer::{score_canslim, CanslimScore, CanslimScorer};
