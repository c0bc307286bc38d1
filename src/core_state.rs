//! Session-scoped application state.
//!
//! `CoreState` is created once at startup, wrapped in `Arc` and handed to
//! every view handler. It owns the latest-result slot and the workflow
//! with its injected prediction backend.

use std::sync::Arc;

use crate::backend::{BackendError, HttpBackendClient, PredictionBackend};
use crate::config::AppConfig;
use crate::export::{self, ExportError};
use crate::models::{MeasurementInput, RiskAssessment};
use crate::session_state::{SessionState, SessionStateError};
use crate::workflow::{AssessmentError, AssessmentWorkflow, ExplanationPolicy};

pub struct CoreState {
    session: SessionState,
    workflow: AssessmentWorkflow,
}

impl CoreState {
    /// Create state around an explicit backend (tests inject a mock here).
    pub fn new(backend: Arc<dyn PredictionBackend>, policy: ExplanationPolicy) -> Self {
        Self {
            session: SessionState::new(),
            workflow: AssessmentWorkflow::new(backend, policy),
        }
    }

    /// Create state talking to the configured prediction service.
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let client = HttpBackendClient::new(&config.backend_url, config.request_timeout)?;
        tracing::info!(
            backend = %client.base_url(),
            timeout_secs = config.request_timeout.as_secs(),
            policy = ?config.explanation_policy,
            "Prediction backend configured"
        );
        Ok(Self::new(Arc::new(client), config.explanation_policy))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ── View operations ─────────────────────────────────────

    /// Run one submission cycle. Blocking.
    pub fn submit(&self, input: &MeasurementInput) -> Result<Arc<RiskAssessment>, AssessmentError> {
        self.workflow.submit(input, &self.session)
    }

    pub fn latest(&self) -> Result<Option<Arc<RiskAssessment>>, SessionStateError> {
        self.session.get()
    }

    pub fn export_latest(&self) -> Result<Vec<u8>, ExportError> {
        export::export_latest(&self.session)
    }

    /// End the session's assessment (user reset).
    pub fn reset(&self) -> Result<(), SessionStateError> {
        self.session.clear()?;
        tracing::info!("Session assessment cleared");
        Ok(())
    }
}
