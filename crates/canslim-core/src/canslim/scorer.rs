use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canslim::config::ScoringConfig;
use crate::canslim::criterion::{CriterionCode, CriterionResult};
use crate::canslim::grade::Grade;
use crate::canslim::inputs::CanslimInputs;
use crate::screener::ScreenerFilter;
use crate::ValidationError;

/// Composite CAN-SLIM evaluation of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanslimScore {
    pub c_score: CriterionResult,
    pub a_score: CriterionResult,
    pub n_score: CriterionResult,
    pub s_score: CriterionResult,
    pub l_score: CriterionResult,
    pub i_score: CriterionResult,
    pub total_score: u8,
    pub overall_grade: Grade,
    pub passing_count: u8,
}

impl CanslimScore {
    pub fn criteria(&self) -> [&CriterionResult; 6] {
        [
            &self.c_score,
            &self.a_score,
            &self.n_score,
            &self.s_score,
            &self.l_score,
            &self.i_score,
        ]
    }

    pub fn criterion(&self, code: CriterionCode) -> &CriterionResult {
        match code {
            CriterionCode::C => &self.c_score,
            CriterionCode::A => &self.a_score,
            CriterionCode::N => &self.n_score,
            CriterionCode::S => &self.s_score,
            CriterionCode::L => &self.l_score,
            CriterionCode::I => &self.i_score,
        }
    }

    pub fn is_screener_candidate(&self, min_total: u8, min_passing: u8) -> bool {
        self.total_score >= min_total && self.passing_count >= min_passing
    }
}

/// Grades the six criteria and folds them into a weighted composite.
#[derive(Debug, Clone, Default)]
pub struct CanslimScorer {
    config: ScoringConfig,
}

impl CanslimScorer {
    pub fn new(config: ScoringConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `inputs` against the thresholds in `filter`.
    ///
    /// Any invalid present value fails the whole call; missing values score 0.
    pub fn score(
        &self,
        inputs: &CanslimInputs,
        filter: &ScreenerFilter,
    ) -> Result<CanslimScore, ValidationError> {
        inputs.validate()?;
        filter.validate()?;

        let c_score = CriterionResult::evaluate(
            CriterionCode::C,
            inputs.eps_growth_quarterly,
            filter.min_eps_growth_quarterly,
        );
        let a_score = CriterionResult::evaluate(
            CriterionCode::A,
            inputs.eps_growth_annual,
            filter.min_eps_growth_annual,
        );
        let n_score = CriterionResult::evaluate(
            CriterionCode::N,
            inputs.distance_from_52w_high,
            filter.max_distance_from_52w_high,
        );
        let s_score = CriterionResult::evaluate(
            CriterionCode::S,
            inputs.volume_ratio,
            filter.min_volume_ratio,
        );
        let l_score =
            CriterionResult::evaluate(CriterionCode::L, inputs.rs_rating, filter.min_rs_rating);
        let i_score = CriterionResult::evaluate(
            CriterionCode::I,
            inputs.institutional_ownership,
            self.config.min_institutional_ownership,
        );

        let mut score = CanslimScore {
            c_score,
            a_score,
            n_score,
            s_score,
            l_score,
            i_score,
            total_score: 0,
            overall_grade: Grade::F,
            passing_count: 0,
        };

        let weights = &self.config.weights;
        let (weighted, weight_total) =
            score
                .criteria()
                .iter()
                .fold((0.0, 0.0), |(weighted, total), result| {
                    let weight = weights.weight(result.code);
                    (weighted + weight * f64::from(result.score), total + weight)
                });
        let total_score = if weight_total > 0.0 {
            (weighted / weight_total).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        let passing_count = score
            .criteria()
            .iter()
            .filter(|result| result.is_passing())
            .count() as u8;

        score.total_score = total_score;
        score.overall_grade = Grade::from_score(total_score);
        score.passing_count = passing_count;

        debug!(
            total_score,
            passing_count,
            grade = score.overall_grade.as_str(),
            available = inputs.available_count(),
            "scored canslim criteria"
        );

        Ok(score)
    }
}

/// Scores with the default weights and institutional threshold.
pub fn score_canslim(
    inputs: &CanslimInputs,
    filter: &ScreenerFilter,
) -> Result<CanslimScore, ValidationError> {
    CanslimScorer::default().score(inputs, filter)
}
