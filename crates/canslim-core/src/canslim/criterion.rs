use serde::{Deserialize, Serialize};

use crate::canslim::grade::{Grade, PASSING_SCORE};

/// The six CAN-SLIM letters, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionCode {
    C,
    A,
    N,
    S,
    L,
    I,
}

impl CriterionCode {
    pub const ALL: [CriterionCode; 6] = [Self::C, Self::A, Self::N, Self::S, Self::L, Self::I];

    pub const fn name(self) -> &'static str {
        match self {
            Self::C => "Current Quarterly Earnings",
            Self::A => "Annual Earnings Increases",
            Self::N => "New Highs",
            Self::S => "Supply and Demand",
            Self::L => "Leader or Laggard",
            Self::I => "Institutional Sponsorship",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::C => "Quarterly EPS growth versus the same quarter a year earlier",
            Self::A => "Annual EPS growth versus the prior year",
            Self::N => "Distance below the 52-week high",
            Self::S => "Volume relative to its 50-day average",
            Self::L => "Relative strength rating",
            Self::I => "Share of float held by institutions",
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            Self::N => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Graded outcome of one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub code: CriterionCode,
    pub name: String,
    pub description: String,
    pub value: Option<f64>,
    pub threshold: f64,
    pub score: u8,
    pub grade: Grade,
}

impl CriterionResult {
    /// Scores `value` against `threshold`; a missing value scores 0 with grade F.
    ///
    /// Callers validate `value` and keep `threshold` positive.
    pub fn evaluate(code: CriterionCode, value: Option<f64>, threshold: f64) -> Self {
        let score = value.map_or(0, |value| {
            ratio_score(attainment(code.direction(), value, threshold))
        });
        Self {
            code,
            name: code.name().to_owned(),
            description: code.description().to_owned(),
            value,
            threshold,
            score,
            grade: Grade::from_score(score),
        }
    }

    pub fn is_passing(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

fn attainment(direction: Direction, value: f64, threshold: f64) -> f64 {
    match direction {
        Direction::HigherIsBetter => value / threshold,
        Direction::LowerIsBetter if value <= 0.0 => f64::INFINITY,
        Direction::LowerIsBetter => threshold / value,
    }
}

/// Maps attainment `r` to 0..=100: linear to 70 at the threshold, then to 100 at twice it.
pub fn ratio_score(r: f64) -> u8 {
    let raw = if r.is_nan() || r <= 0.0 {
        0.0
    } else if r < 1.0 {
        70.0 * r
    } else if r < 2.0 {
        70.0 + 30.0 * (r - 1.0)
    } else {
        100.0
    };
    // Absorbs representation error such as 30.0 / 25.0 landing just under 1.2.
    (raw + 1e-9).floor().clamp(0.0, 100.0) as u8
}
