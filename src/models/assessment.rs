use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::measurement::PatientMeasurement;
use super::prediction::PredictionResult;
use crate::risk::{classify, RiskTier};
use crate::tips::derive_tips;

/// Complete result of one submission: inputs, prediction, explanation,
/// tier and tips. Built in a single step so no reader ever sees a
/// partially filled assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub measurement: PatientMeasurement,
    pub prediction: PredictionResult,
    pub tier: RiskTier,
    /// `None` only when the workflow accepts degraded assessments and
    /// the explanation call failed.
    pub explanation: Option<String>,
    pub tips: Vec<String>,
}

impl RiskAssessment {
    /// Derive tier and tips and assemble the assessment.
    pub fn new(
        measurement: PatientMeasurement,
        prediction: PredictionResult,
        explanation: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            assessed_at: Utc::now(),
            tier: classify(prediction.probability),
            tips: derive_tips(&measurement),
            measurement,
            prediction,
            explanation,
        }
    }
}
