use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Score at which a criterion meets its CAN-SLIM threshold.
pub const PASSING_SCORE: u8 = 70;

/// Letter grade shared by individual criteria and the composite total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// A ≥ 70, B ≥ 55, C ≥ 40, D ≥ 25, otherwise F.
    pub const fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::A,
            55..=69 => Self::B,
            40..=54 => Self::C,
            25..=39 => Self::D,
            _ => Self::F,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
