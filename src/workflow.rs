//! Risk-assessment orchestration.
//!
//! validate → predict ∥ explain → tier + tips → single store.
//! A failed submission never touches the session slot, so the previous
//! assessment (if any) stays visible.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendCall, BackendError, PredictionBackend};
use crate::models::{MeasurementInput, PredictionResult, RiskAssessment, ValidationError};
use crate::session_state::{SessionState, SessionStateError};

/// What to do when `explain` fails but `predict` succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationPolicy {
    /// Discard the whole submission.
    #[default]
    Required,
    /// Store the assessment without an explanation.
    Optional,
}

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{call} call failed: {source}")]
    Backend {
        call: BackendCall,
        #[source]
        source: BackendError,
    },

    #[error("Session error: {0}")]
    Session(#[from] SessionStateError),
}

/// Runs one submission cycle against an injected backend.
pub struct AssessmentWorkflow {
    backend: Arc<dyn PredictionBackend>,
    policy: ExplanationPolicy,
}

impl AssessmentWorkflow {
    pub fn new(backend: Arc<dyn PredictionBackend>, policy: ExplanationPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> ExplanationPolicy {
        self.policy
    }

    /// Validate, call the backend, build the assessment and store it.
    ///
    /// Blocks on both backend calls; run on a blocking thread from async code.
    pub fn submit(
        &self,
        input: &MeasurementInput,
        session: &SessionState,
    ) -> Result<Arc<RiskAssessment>, AssessmentError> {
        let measurement = input.validate().map_err(|e| {
            tracing::info!(field = %e.field, value = e.value, "Submission rejected by validation");
            e
        })?;

        let backend = self.backend.as_ref();
        let (prediction, explanation) = std::thread::scope(|scope| {
            let explain = scope.spawn(|| backend.explain(&measurement));
            let prediction = backend.predict(&measurement);
            let explanation = explain.join().unwrap_or_else(|_| {
                Err(BackendError::Unavailable("explain call panicked".into()))
            });
            (prediction, explanation)
        });

        let prediction: PredictionResult = prediction.map_err(|source| {
            tracing::warn!(error = %source, "Predict call failed; session unchanged");
            AssessmentError::Backend {
                call: BackendCall::Predict,
                source,
            }
        })?;

        let explanation = match (explanation, self.policy) {
            (Ok(text), _) => Some(text),
            (Err(source), ExplanationPolicy::Required) => {
                tracing::warn!(error = %source, "Explain call failed; session unchanged");
                return Err(AssessmentError::Backend {
                    call: BackendCall::Explain,
                    source,
                });
            }
            (Err(source), ExplanationPolicy::Optional) => {
                tracing::warn!(error = %source, "Explain call failed; storing assessment without explanation");
                None
            }
        };

        let assessment = RiskAssessment::new(measurement, prediction, explanation);
        tracing::info!(
            assessment_id = %assessment.id,
            label = %assessment.prediction.label,
            probability = assessment.prediction.probability,
            tier = %assessment.tier,
            tips = assessment.tips.len(),
            "Assessment completed"
        );

        Ok(session.store(assessment)?)
    }
}
