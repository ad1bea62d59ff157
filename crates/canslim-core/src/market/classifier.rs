use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_non_negative, ensure_positive, ensure_within};
use crate::market::snapshot::IndicatorSnapshot;
use crate::{UtcDateTime, ValidationError};

/// Lowest and highest reachable composite score (VIX ±2, three others ±1).
pub const MARKET_SCORE_MIN: i8 = -5;
pub const MARKET_SCORE_MAX: i8 = 5;

pub const RISK_ON_THRESHOLD: i8 = 2;
pub const RISK_OFF_THRESHOLD: i8 = -2;

const VIX_POINTS: i8 = 2;
const INDICATOR_COUNT: f64 = 4.0;

/// Discrete market regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    RiskOn,
    Neutral,
    RiskOff,
}

impl MarketCondition {
    pub const fn from_score(score: i8) -> Self {
        if score >= RISK_ON_THRESHOLD {
            Self::RiskOn
        } else if score <= RISK_OFF_THRESHOLD {
            Self::RiskOff
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskOn => "risk_on",
            Self::Neutral => "neutral",
            Self::RiskOff => "risk_off",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RiskOn => "Risk On",
            Self::Neutral => "Neutral",
            Self::RiskOff => "Risk Off",
        }
    }

    fn recommendation(self, confidence: f64) -> &'static str {
        match (self, ConfidenceBand::of(confidence)) {
            (Self::RiskOn, ConfidenceBand::High) => {
                "Market backdrop is strong; aggressive buying consideration warranted for leading stocks."
            }
            (Self::RiskOn, ConfidenceBand::Medium) => {
                "Market backdrop is favorable; new entries in leading stocks can be considered."
            }
            (Self::RiskOn, ConfidenceBand::Low) => {
                "Market backdrop leans favorable; enter selectively with reduced size."
            }
            (Self::Neutral, _) => {
                "Signals are mixed; wait and see, proceed cautiously and focus on stock selection."
            }
            (Self::RiskOff, ConfidenceBand::High) => {
                "Market backdrop is deteriorating; avoid new long positions and consider reducing exposure."
            }
            (Self::RiskOff, ConfidenceBand::Medium) => {
                "Market backdrop is unstable; avoid new long positions."
            }
            (Self::RiskOff, ConfidenceBand::Low) => {
                "Market backdrop leans unfavorable; avoid new long positions and tighten stops."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    fn of(confidence: f64) -> Self {
        if confidence >= 0.75 {
            Self::High
        } else if confidence >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Direction a single indicator points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Bullish,
    Neutral,
    Bearish,
}

impl Signal {
    const fn direction(self) -> i8 {
        match self {
            Self::Bullish => 1,
            Self::Neutral => 0,
            Self::Bearish => -1,
        }
    }
}

/// One indicator's signal and its signed contribution to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub signal: Signal,
    pub points: i8,
}

impl SignalReading {
    fn weighted(signal: Signal, weight: i8) -> Self {
        Self {
            signal,
            points: signal.direction() * weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSignals {
    pub vix: SignalReading,
    pub sp500_rsi: SignalReading,
    pub sp500_ma200: SignalReading,
    pub put_call_ratio: SignalReading,
}

impl IndicatorSignals {
    pub fn readings(&self) -> [SignalReading; 4] {
        [self.vix, self.sp500_rsi, self.sp500_ma200, self.put_call_ratio]
    }

    pub fn score(&self) -> i8 {
        self.readings().iter().map(|reading| reading.points).sum()
    }

    /// Net share of indicators agreeing with the sign of `score`, in [0, 1].
    ///
    /// Zero for a zero score or an even split; one when all four agree.
    pub fn agreement(&self, score: i8) -> f64 {
        let direction = score.signum();
        if direction == 0 {
            return 0.0;
        }

        let (agreeing, opposing) =
            self.readings()
                .iter()
                .fold((0_i32, 0_i32), |(agreeing, opposing), reading| {
                    match reading.signal.direction() * direction {
                        1 => (agreeing + 1, opposing),
                        -1 => (agreeing, opposing + 1),
                        _ => (agreeing, opposing),
                    }
                });

        f64::from((agreeing - opposing).max(0)) / INDICATOR_COUNT
    }
}

/// Indicator cut points. Points per indicator are fixed; only the boundaries move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketThresholds {
    /// VIX strictly below this is bullish.
    pub vix_calm: f64,
    /// VIX strictly above this is bearish.
    pub vix_stressed: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Put/call strictly below is bullish, strictly above is bearish.
    pub put_call_pivot: f64,
}

impl Default for MarketThresholds {
    fn default() -> Self {
        Self {
            vix_calm: 20.0,
            vix_stressed: 25.0,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            put_call_pivot: 1.0,
        }
    }
}

impl MarketThresholds {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("vix_calm", self.vix_calm)?;
        ensure_non_negative("vix_stressed", self.vix_stressed)?;
        if self.vix_calm > self.vix_stressed {
            return Err(ValidationError::InconsistentThresholds {
                lower: "vix_calm",
                upper: "vix_stressed",
            });
        }
        ensure_within("rsi_oversold", self.rsi_oversold, 0.0, 100.0)?;
        ensure_within("rsi_overbought", self.rsi_overbought, 0.0, 100.0)?;
        if self.rsi_oversold > self.rsi_overbought {
            return Err(ValidationError::InconsistentThresholds {
                lower: "rsi_oversold",
                upper: "rsi_overbought",
            });
        }
        ensure_positive("put_call_pivot", self.put_call_pivot)?;
        Ok(())
    }
}

/// Result of classifying one indicator snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketClassification {
    pub condition: MarketCondition,
    pub condition_label: String,
    pub confidence: f64,
    pub score: i8,
    pub recommendation: String,
    pub signals: IndicatorSignals,
    pub indicators: IndicatorSnapshot,
    pub analyzed_at: UtcDateTime,
}

impl MarketClassification {
    pub fn is_favorable_for_entry(&self) -> bool {
        self.condition == MarketCondition::RiskOn && self.confidence >= 0.6
    }

    pub fn is_unfavorable_for_entry(&self) -> bool {
        self.condition == MarketCondition::RiskOff
    }
}

/// Turns four benchmark indicators into a bounded score and a regime.
#[derive(Debug, Clone, Default)]
pub struct MarketConditionClassifier {
    thresholds: MarketThresholds,
}

impl MarketConditionClassifier {
    pub fn new(thresholds: MarketThresholds) -> Result<Self, ValidationError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &MarketThresholds {
        &self.thresholds
    }

    pub fn classify(
        &self,
        snapshot: &IndicatorSnapshot,
        analyzed_at: UtcDateTime,
    ) -> Result<MarketClassification, ValidationError> {
        snapshot.validate()?;

        let signals = self.signals(snapshot);
        let score = signals.score();
        let condition = MarketCondition::from_score(score);
        let confidence = signals.agreement(score);

        debug!(
            score,
            condition = condition.as_str(),
            confidence,
            "classified market condition"
        );

        Ok(MarketClassification {
            condition,
            condition_label: condition.label().to_owned(),
            confidence,
            score,
            recommendation: condition.recommendation(confidence).to_owned(),
            signals,
            indicators: snapshot.clone(),
            analyzed_at,
        })
    }

    pub fn signals(&self, snapshot: &IndicatorSnapshot) -> IndicatorSignals {
        let t = &self.thresholds;

        let vix = if snapshot.vix < t.vix_calm {
            Signal::Bullish
        } else if snapshot.vix > t.vix_stressed {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        let rsi = if (t.rsi_oversold..=t.rsi_overbought).contains(&snapshot.sp500_rsi) {
            Signal::Bullish
        } else {
            Signal::Bearish
        };

        let ma200 = if snapshot.sp500_above_ma200 {
            Signal::Bullish
        } else if snapshot.sp500_price < snapshot.sp500_ma200 {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        let put_call = if snapshot.put_call_ratio < t.put_call_pivot {
            Signal::Bullish
        } else if snapshot.put_call_ratio > t.put_call_pivot {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        IndicatorSignals {
            vix: SignalReading::weighted(vix, VIX_POINTS),
            sp500_rsi: SignalReading::weighted(rsi, 1),
            sp500_ma200: SignalReading::weighted(ma200, 1),
            put_call_ratio: SignalReading::weighted(put_call, 1),
        }
    }
}

/// Classifies with the default indicator thresholds.
pub fn classify_market_condition(
    snapshot: &IndicatorSnapshot,
    analyzed_at: UtcDateTime,
) -> Result<MarketClassification, ValidationError> {
    MarketConditionClassifier::default().classify(snapshot, analyzed_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> UtcDateTime {
        UtcDateTime::parse("2024-03-15T20:00:00Z").expect("valid timestamp")
    }

    fn snapshot(vix: f64, rsi: f64, price: f64, ma200: f64, put_call: f64) -> IndicatorSnapshot {
        IndicatorSnapshot::new(vix, price, rsi, ma200, put_call, at()).expect("valid snapshot")
    }

    #[test]
    fn condition_boundaries() {
        assert_eq!(MarketCondition::from_score(2), MarketCondition::RiskOn);
        assert_eq!(MarketCondition::from_score(1), MarketCondition::Neutral);
        assert_eq!(MarketCondition::from_score(0), MarketCondition::Neutral);
        assert_eq!(MarketCondition::from_score(-1), MarketCondition::Neutral);
        assert_eq!(MarketCondition::from_score(-2), MarketCondition::RiskOff);
    }

    #[test]
    fn vix_band_edges_are_neutral() {
        let classifier = MarketConditionClassifier::default();
        for vix in [20.0, 22.5, 25.0] {
            let signals = classifier.signals(&snapshot(vix, 55.0, 4500.0, 4300.0, 0.9));
            assert_eq!(signals.vix.signal, Signal::Neutral, "vix {vix}");
            assert_eq!(signals.vix.points, 0);
        }
        let calm = classifier.signals(&snapshot(19.99, 55.0, 4500.0, 4300.0, 0.9));
        assert_eq!(calm.vix.points, 2);
        let stressed = classifier.signals(&snapshot(25.01, 55.0, 4500.0, 4300.0, 0.9));
        assert_eq!(stressed.vix.points, -2);
    }

    #[test]
    fn rsi_band_is_inclusive() {
        let classifier = MarketConditionClassifier::default();
        for (rsi, points) in [(30.0, 1), (70.0, 1), (29.9, -1), (70.1, -1)] {
            let signals = classifier.signals(&snapshot(22.0, rsi, 4500.0, 4300.0, 1.0));
            assert_eq!(signals.sp500_rsi.points, points, "rsi {rsi}");
        }
    }

    #[test]
    fn price_on_moving_average_is_neutral() {
        let classifier = MarketConditionClassifier::default();
        let signals = classifier.signals(&snapshot(22.0, 55.0, 4300.0, 4300.0, 1.0));
        assert_eq!(signals.sp500_ma200.signal, Signal::Neutral);
    }

    #[test]
    fn put_call_pivot_is_neutral() {
        let classifier = MarketConditionClassifier::default();
        let signals = classifier.signals(&snapshot(22.0, 55.0, 4500.0, 4300.0, 1.0));
        assert_eq!(signals.put_call_ratio.signal, Signal::Neutral);
    }

    #[test]
    fn all_bullish_is_max_score_with_full_confidence() {
        let result = classify_market_condition(&snapshot(18.0, 55.0, 4500.0, 4300.0, 0.9), at())
            .expect("valid");
        assert_eq!(result.score, MARKET_SCORE_MAX);
        assert_eq!(result.condition, MarketCondition::RiskOn);
        assert_eq!(result.confidence, 1.0);
        assert!(result.is_favorable_for_entry());
    }

    #[test]
    fn even_split_has_zero_confidence() {
        // VIX +2, RSI +1 against MA -1, put/call -1.
        let result = classify_market_condition(&snapshot(15.0, 55.0, 4100.0, 4300.0, 1.2), at())
            .expect("valid");
        assert_eq!(result.score, 1);
        assert_eq!(result.condition, MarketCondition::Neutral);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn confidence_rises_with_agreement() {
        let classifier = MarketConditionClassifier::default();
        // Three bearish, one bullish -> 0.5.
        let three = classifier
            .classify(&snapshot(30.0, 80.0, 4100.0, 4300.0, 0.9), at())
            .expect("valid");
        // Three bearish, one neutral -> 0.75.
        let three_and_neutral = classifier
            .classify(&snapshot(30.0, 80.0, 4100.0, 4300.0, 1.0), at())
            .expect("valid");
        // All four bearish -> 1.0.
        let four = classifier
            .classify(&snapshot(30.0, 80.0, 4100.0, 4300.0, 1.1), at())
            .expect("valid");

        assert_eq!(three.confidence, 0.5);
        assert_eq!(three_and_neutral.confidence, 0.75);
        assert_eq!(four.confidence, 1.0);
        assert!(four.is_unfavorable_for_entry());
    }

    #[test]
    fn recommendation_tracks_condition() {
        let risk_off = classify_market_condition(&snapshot(32.0, 25.0, 4100.0, 4300.0, 1.3), at())
            .expect("valid");
        assert!(risk_off.recommendation.contains("avoid new long positions"));

        let neutral = classify_market_condition(&snapshot(22.0, 55.0, 4300.0, 4300.0, 1.0), at())
            .expect("valid");
        assert!(neutral.recommendation.contains("wait and see"));
    }

    #[test]
    fn hand_built_snapshot_is_validated() {
        let mut bad = snapshot(18.0, 55.0, 4500.0, 4300.0, 0.9);
        bad.sp500_ma200 = f64::NAN;
        let err = classify_market_condition(&bad, at()).expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "sp500_ma200" });
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let thresholds = MarketThresholds {
            vix_calm: 30.0,
            vix_stressed: 25.0,
            ..MarketThresholds::default()
        };
        let err = MarketConditionClassifier::new(thresholds).expect_err("must fail");
        assert!(matches!(err, ValidationError::InconsistentThresholds { lower: "vix_calm", .. }));
    }

    #[test]
    fn serializes_wire_discriminants() {
        let result = classify_market_condition(&snapshot(32.0, 25.0, 4100.0, 4300.0, 1.3), at())
            .expect("valid");
        let value = serde_json::to_value(&result).expect("serializes");
        assert_eq!(value["condition"], "risk_off");
        assert_eq!(value["condition_label"], "Risk Off");
        assert_eq!(value["signals"]["vix"]["signal"], "bearish");
        assert_eq!(value["signals"]["vix"]["points"], -2);
    }
}
