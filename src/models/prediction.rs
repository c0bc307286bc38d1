use serde::{Deserialize, Serialize};

/// Binary outcome reported by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionLabel {
    NonDiabetic,
    Diabetic,
}

impl PredictionLabel {
    /// Map the service's 0/1 code to a label.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NonDiabetic),
            1 => Some(Self::Diabetic),
            _ => None,
        }
    }

    /// Wire code, also used in the export.
    pub fn code(self) -> u8 {
        match self {
            Self::NonDiabetic => 0,
            Self::Diabetic => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::NonDiabetic => "Non-Diabetic",
            Self::Diabetic => "Diabetic",
        }
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Prediction returned by `/predict`. The label is taken as reported;
/// it is not re-derived from the probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: PredictionLabel,
    /// Always within [0.0, 1.0] (checked when the response is parsed).
    pub probability: f64,
}

impl PredictionResult {
    /// Probability as a percentage with one decimal, e.g. "73.4%".
    pub fn probability_percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}
