//! IBD-style relative strength and the 1-99 RS rating.
//!
//! Performance is a weighted blend of returns over the last 3, 6, 9 and 12
//! months (40/20/20/20). A stock's relative strength is its blended return
//! against the benchmark's, scaled so that matching the benchmark reads 100.
//! The rating is the percentile of that value within a universe. A universe
//! with a single rated stock falls back to [`estimate_rating`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ensure_positive;
use crate::{Symbol, ValidationError};

pub const QUARTER_DAYS: usize = 63;
pub const HALF_YEAR_DAYS: usize = 126;
pub const THREE_QUARTER_DAYS: usize = 189;
pub const YEAR_DAYS: usize = 252;

const PERIOD_WEIGHTS: [(usize, f64); 4] = [
    (QUARTER_DAYS, 0.4),
    (HALF_YEAR_DAYS, 0.2),
    (THREE_QUARTER_DAYS, 0.2),
    (YEAR_DAYS, 0.2),
];

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 99;
pub const NEUTRAL_RATING: u8 = 50;

/// Percent return over each lookback window; `None` where history is too short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePerformance {
    pub quarter: Option<f64>,
    pub half_year: Option<f64>,
    pub three_quarters: Option<f64>,
    pub year: Option<f64>,
}

impl PricePerformance {
    /// Computes returns from closes ordered oldest first.
    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            quarter: period_return(closes, QUARTER_DAYS),
            half_year: period_return(closes, HALF_YEAR_DAYS),
            three_quarters: period_return(closes, THREE_QUARTER_DAYS),
            year: period_return(closes, YEAR_DAYS),
        }
    }

    fn by_period(&self) -> [Option<f64>; 4] {
        [self.quarter, self.half_year, self.three_quarters, self.year]
    }

    /// Weighted blend of all four periods; `None` unless a full year of history exists.
    pub fn weighted(&self) -> Option<f64> {
        self.by_period()
            .iter()
            .zip(PERIOD_WEIGHTS.iter())
            .try_fold(0.0, |sum, (value, (_, weight))| {
                value.map(|value| sum + value * weight)
            })
    }
}

/// Percent change from the close `days` sessions back to the latest close.
pub fn period_return(closes: &[f64], days: usize) -> Option<f64> {
    if days == 0 || closes.len() < days {
        return None;
    }
    let start = closes[closes.len() - days];
    let end = closes[closes.len() - 1];
    if start == 0.0 || !start.is_finite() || !end.is_finite() {
        return None;
    }
    Some((end - start) / start * 100.0)
}

/// `(1 + stock%) / (1 + benchmark%) * 100`; 100 means in line with the benchmark.
pub fn relative_strength(stock_return: f64, benchmark_return: f64) -> Option<f64> {
    let benchmark_factor = 1.0 + benchmark_return / 100.0;
    if benchmark_factor <= 0.0 || !benchmark_factor.is_finite() || !stock_return.is_finite() {
        return None;
    }
    Some((1.0 + stock_return / 100.0) / benchmark_factor * 100.0)
}

/// Share of `universe` at or below `value`, as a rating in 1..=99.
pub fn percentile_rank(value: f64, universe: &[f64]) -> u8 {
    if universe.is_empty() {
        return NEUTRAL_RATING;
    }
    let at_or_below = universe.iter().filter(|other| **other <= value).count();
    let percentile = (at_or_below as f64 / universe.len() as f64 * 100.0).trunc();
    clamp_rating(percentile)
}

/// Single-stock estimate without a universe: 100 maps to 50, each point half a rating.
pub fn estimate_rating(relative_strength: f64) -> u8 {
    clamp_rating((50.0 + (relative_strength - 100.0) * 0.5).trunc())
}

fn clamp_rating(value: f64) -> u8 {
    if value.is_nan() {
        return NEUTRAL_RATING;
    }
    value.clamp(f64::from(MIN_RATING), f64::from(MAX_RATING)) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsRating {
    pub symbol: Symbol,
    pub performance: PricePerformance,
    pub weighted_return: Option<f64>,
    pub relative_strength: Option<f64>,
    /// `None` when the stock's history is too short to compare.
    pub rating: Option<u8>,
}

/// Rates every symbol in `universe` against `benchmark_closes` (closes oldest first).
///
/// Ratings are percentiles among the symbols that produced a relative strength.
/// Symbols with under a year of closes are left unrated.
pub fn rate_universe(
    benchmark_closes: &[f64],
    universe: &BTreeMap<Symbol, Vec<f64>>,
) -> Result<Vec<RsRating>, ValidationError> {
    for close in benchmark_closes {
        ensure_positive("benchmark_close", *close)?;
    }
    for closes in universe.values() {
        for close in closes {
            ensure_positive("close", *close)?;
        }
    }

    let benchmark = PricePerformance::from_closes(benchmark_closes).weighted();

    let mut ratings: Vec<RsRating> = universe
        .iter()
        .map(|(symbol, closes)| {
            let performance = PricePerformance::from_closes(closes);
            let weighted_return = performance.weighted();
            let strength = weighted_return
                .zip(benchmark)
                .and_then(|(stock, bench)| relative_strength(stock, bench));
            RsRating {
                symbol: symbol.clone(),
                performance,
                weighted_return,
                relative_strength: strength,
                rating: None,
            }
        })
        .collect();

    let population: Vec<f64> = ratings
        .iter()
        .filter_map(|rating| rating.relative_strength)
        .collect();
    let single = population.len() == 1;
    for rating in &mut ratings {
        rating.rating = rating.relative_strength.map(|strength| {
            if single {
                estimate_rating(strength)
            } else {
                percentile_rank(strength, &population)
            }
        });
    }

    debug!(
        universe = universe.len(),
        rated = population.len(),
        "computed rs ratings"
    );

    Ok(ratings)
}
