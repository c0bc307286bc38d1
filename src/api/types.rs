//! Shared types for the session API layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::models::{FieldSpec, PatientMeasurement, PredictionLabel, RiskAssessment};
use crate::risk::RiskTier;

// ═══════════════════════════════════════════════════════════
// API context, shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// View models
// ═══════════════════════════════════════════════════════════

/// One input of the measurement form.
#[derive(Debug, Serialize)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub integral: bool,
}

impl From<&FieldSpec> for FieldView {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            key: spec.field.wire_key(),
            label: spec.label,
            min: spec.min,
            max: spec.max,
            default: spec.default,
            integral: spec.integral,
        }
    }
}

/// Assessment as rendered by the result and tips views.
#[derive(Debug, Serialize)]
pub struct AssessmentView {
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub measurement: PatientMeasurement,
    pub prediction: PredictionLabel,
    /// "Diabetic" / "Non-Diabetic"
    pub prediction_text: &'static str,
    pub probability: f64,
    /// One decimal, e.g. "73.4%"
    pub probability_percent: String,
    pub risk_tier: RiskTier,
    pub risk_description: &'static str,
    pub explanation: Option<String>,
    pub tips: Vec<String>,
}

impl From<&RiskAssessment> for AssessmentView {
    fn from(a: &RiskAssessment) -> Self {
        Self {
            id: a.id,
            assessed_at: a.assessed_at,
            measurement: a.measurement,
            prediction: a.prediction.label,
            prediction_text: a.prediction.label.display_name(),
            probability: a.prediction.probability,
            probability_percent: a.prediction.probability_percent(),
            risk_tier: a.tier,
            risk_description: a.tier.description(),
            explanation: a.explanation.clone(),
            tips: a.tips.clone(),
        }
    }
}
