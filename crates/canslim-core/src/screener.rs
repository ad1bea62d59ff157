//! Screening filter and the score-filter-rank pass over a universe.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canslim::{CanslimInputs, CanslimScore, CanslimScorer, Grade, ScoringConfig};
use crate::error::{ensure_non_negative, ensure_positive, ensure_within};
use crate::{Symbol, UtcDateTime, ValidationError};

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

/// Six thresholds a stock must clear together to pass the screen.
///
/// The first five double as the C, A, N, S and L criterion thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerFilter {
    pub min_rs_rating: f64,
    pub min_eps_growth_quarterly: f64,
    pub min_eps_growth_annual: f64,
    pub max_distance_from_52w_high: f64,
    pub min_volume_ratio: f64,
    pub min_canslim_score: f64,
}

impl Default for ScreenerFilter {
    fn default() -> Self {
        Self {
            min_rs_rating: 80.0,
            min_eps_growth_quarterly: 25.0,
            min_eps_growth_annual: 25.0,
            max_distance_from_52w_high: 15.0,
            min_volume_ratio: 1.5,
            min_canslim_score: 70.0,
        }
    }
}

impl ScreenerFilter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_within("min_rs_rating", self.min_rs_rating, 0.0, 100.0)?;
        ensure_positive("min_rs_rating", self.min_rs_rating)?;
        ensure_positive("min_eps_growth_quarterly", self.min_eps_growth_quarterly)?;
        ensure_positive("min_eps_growth_annual", self.min_eps_growth_annual)?;
        ensure_non_negative("max_distance_from_52w_high", self.max_distance_from_52w_high)?;
        ensure_positive("min_volume_ratio", self.min_volume_ratio)?;
        ensure_within("min_canslim_score", self.min_canslim_score, 0.0, 100.0)?;
        Ok(())
    }

    /// True when every threshold holds; a missing metric fails its threshold.
    pub fn matches(&self, stock: &StockSummary) -> bool {
        let at_least = |value: Option<f64>, min: f64| value.is_some_and(|value| value >= min);

        at_least(stock.rs_rating, self.min_rs_rating)
            && at_least(stock.eps_growth_quarterly, self.min_eps_growth_quarterly)
            && at_least(stock.eps_growth_annual, self.min_eps_growth_annual)
            && stock
                .distance_from_52w_high
                .is_some_and(|distance| distance <= self.max_distance_from_52w_high)
            && at_least(stock.volume_ratio, self.min_volume_ratio)
            && at_least(stock.canslim_score.map(f64::from), self.min_canslim_score)
    }
}

/// Screenable view of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: Symbol,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rs_rating: Option<f64>,
    #[serde(default)]
    pub eps_growth_quarterly: Option<f64>,
    #[serde(default)]
    pub eps_growth_annual: Option<f64>,
    #[serde(default)]
    pub distance_from_52w_high: Option<f64>,
    #[serde(default)]
    pub volume_ratio: Option<f64>,
    #[serde(default)]
    pub canslim_score: Option<u8>,
    #[serde(default)]
    pub canslim_grade: Option<Grade>,
}

impl StockSummary {
    pub fn from_scored(candidate: &ScreenCandidate, score: &CanslimScore) -> Self {
        let inputs = &candidate.inputs;
        Self {
            symbol: candidate.symbol.clone(),
            name: candidate.name.clone(),
            price: candidate.price,
            rs_rating: inputs.rs_rating,
            eps_growth_quarterly: inputs.eps_growth_quarterly,
            eps_growth_annual: inputs.eps_growth_annual,
            distance_from_52w_high: inputs.distance_from_52w_high,
            volume_ratio: inputs.volume_ratio,
            canslim_score: Some(score.total_score),
            canslim_grade: Some(score.overall_grade),
        }
    }
}

/// One stock offered to the screener: identity plus scorer inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenCandidate {
    pub symbol: Symbol,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub inputs: CanslimInputs,
}

impl ScreenCandidate {
    pub fn new(symbol: Symbol, inputs: CanslimInputs) -> Self {
        Self {
            symbol,
            name: None,
            price: None,
            inputs,
        }
    }

    /// Checks the quote carried alongside the scorer inputs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            ensure_positive("price", price)?;
        }
        Ok(())
    }
}

/// Window into the ranked matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: usize,
    offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: usize, offset: usize) -> Result<Self, ValidationError> {
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ValidationError::InvalidPageLimit {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Candidate skipped because its input failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedStock {
    pub symbol: Symbol,
    pub field: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Matches before pagination.
    pub total_count: usize,
    pub stocks: Vec<StockSummary>,
    pub filter_applied: ScreenerFilter,
    pub rejected: Vec<RejectedStock>,
    pub screened_at: UtcDateTime,
}

/// Scores, filters and ranks a universe of candidates.
#[derive(Debug, Clone, Default)]
pub struct Screener {
    scorer: CanslimScorer,
    filter: ScreenerFilter,
}

impl Screener {
    pub fn new(filter: ScreenerFilter, scoring: ScoringConfig) -> Result<Self, ValidationError> {
        filter.validate()?;
        Ok(Self {
            scorer: CanslimScorer::new(scoring)?,
            filter,
        })
    }

    pub fn filter(&self) -> &ScreenerFilter {
        &self.filter
    }

    /// Ranks matches by composite score, then RS rating (both descending), then symbol.
    pub fn run(
        &self,
        candidates: &[ScreenCandidate],
        page: Page,
        screened_at: UtcDateTime,
    ) -> ScreenResult {
        let mut matches = Vec::new();
        let mut rejected = Vec::new();

        for candidate in candidates {
            let scored = candidate
                .validate()
                .and_then(|()| self.scorer.score(&candidate.inputs, &self.filter));
            match scored {
                Ok(score) => {
                    let summary = StockSummary::from_scored(candidate, &score);
                    if self.filter.matches(&summary) {
                        matches.push(summary);
                    }
                }
                Err(err) => {
                    warn!(symbol = %candidate.symbol, error = %err, "skipping screen candidate");
                    rejected.push(RejectedStock {
                        symbol: candidate.symbol.clone(),
                        field: err.field().map(str::to_owned),
                        reason: err.to_string(),
                    });
                }
            }
        }

        matches.sort_by(rank);
        let total_count = matches.len();
        let stocks: Vec<StockSummary> = matches
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();

        debug!(
            candidates = candidates.len(),
            total_count,
            returned = stocks.len(),
            rejected = rejected.len(),
            "screen complete"
        );

        ScreenResult {
            total_count,
            stocks,
            filter_applied: self.filter.clone(),
            rejected,
            screened_at,
        }
    }
}

fn rank(left: &StockSummary, right: &StockSummary) -> Ordering {
    right
        .canslim_score
        .cmp(&left.canslim_score)
        .then_with(|| {
            let left_rs = left.rs_rating.unwrap_or(f64::NEG_INFINITY);
            let right_rs = right.rs_rating.unwrap_or(f64::NEG_INFINITY);
            right_rs.total_cmp(&left_rs)
        })
        .then_with(|| left.symbol.cmp(&right.symbol))
}
