pub mod client;
pub mod parse;
#[cfg(test)]
pub(crate) mod stub;

pub use client::*;
pub use parse::*;

use thiserror::Error;

use crate::models::{PatientMeasurement, PredictionResult};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Transport fault: connection refused, DNS failure or timeout.
    #[error("Prediction service unavailable: {0}")]
    Unavailable(String),

    #[error("Prediction service returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from prediction service: {0}")]
    MalformedResponse(String),
}

/// Which remote operation a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendCall {
    Predict,
    Explain,
}

impl std::fmt::Display for BackendCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predict => write!(f, "predict"),
            Self::Explain => write!(f, "explain"),
        }
    }
}

/// Prediction service abstraction (allows mocking).
///
/// The two calls are independent; callers may issue them concurrently.
pub trait PredictionBackend: Send + Sync {
    fn predict(&self, measurement: &PatientMeasurement) -> Result<PredictionResult, BackendError>;

    fn explain(&self, measurement: &PatientMeasurement) -> Result<String, BackendError>;
}
