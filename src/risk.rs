//! Risk tier classification from a predicted probability.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the High tier.
pub const HIGH_RISK_THRESHOLD: f64 = 0.75;
/// Lower bound (inclusive) of the Moderate tier.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Moderate,
    Low,
}

impl RiskTier {
    pub fn description(self) -> &'static str {
        match self {
            Self::High => "High risk - consult a healthcare provider soon",
            Self::Moderate => "Moderate risk - follow-up and lifestyle changes recommended",
            Self::Low => "Low risk - keep up regular check-ups",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Map a probability to its tier. Each tier is closed on its lower bound:
/// 0.75 is High, 0.5 is Moderate.
pub fn classify(probability: f64) -> RiskTier {
    if probability >= HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if probability >= MODERATE_RISK_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_lower_side() {
        assert_eq!(classify(0.75), RiskTier::High);
        assert_eq!(classify(0.5), RiskTier::Moderate);
        assert_eq!(classify(0.7499), RiskTier::Moderate);
        assert_eq!(classify(0.4999), RiskTier::Low);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(0.0), RiskTier::Low);
        assert_eq!(classify(1.0), RiskTier::High);
    }

    #[test]
    fn tiers_partition_unit_interval() {
        for i in 0..=10_000 {
            let p = i as f64 / 10_000.0;
            let expected = if p >= 0.75 {
                RiskTier::High
            } else if p >= 0.5 {
                RiskTier::Moderate
            } else {
                RiskTier::Low
            };
            assert_eq!(classify(p), expected, "p = {p}");
        }
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_value(RiskTier::Moderate).unwrap(), "moderate");
    }
}
