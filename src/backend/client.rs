use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::parse::{parse_explanation, parse_prediction};
use super::{BackendError, PredictionBackend};
use crate::models::{PatientMeasurement, PredictionResult};

/// HTTP client for the remote prediction/explanation service.
pub struct HttpBackendClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpBackendClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the measurement to `{base}/{path}` and return the body of a
    /// successful response.
    fn post(&self, path: &str, measurement: &PatientMeasurement) -> Result<String, BackendError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(measurement)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Unavailable(format!(
                        "request to {url} timed out after {}s",
                        self.timeout.as_secs_f32()
                    ))
                } else if e.is_connect() {
                    BackendError::Unavailable(format!("cannot connect to {}", self.base_url))
                } else {
                    BackendError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            tracing::warn!(%url, status = status.as_u16(), "Prediction service returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|e| BackendError::Unavailable(format!("failed to read response body: {e}")))
    }
}

impl PredictionBackend for HttpBackendClient {
    fn predict(&self, measurement: &PatientMeasurement) -> Result<PredictionResult, BackendError> {
        let body = self.post("predict", measurement)?;
        let result = parse_prediction(&body)?;
        tracing::debug!(
            label = %result.label,
            probability = result.probability,
            "Prediction received"
        );
        Ok(result)
    }

    fn explain(&self, measurement: &PatientMeasurement) -> Result<String, BackendError> {
        let body = self.post("explain", measurement)?;
        parse_explanation(&body)
    }
}

/// Mock backend for testing. Returns configurable results and counts calls.
pub struct MockBackend {
    prediction: Result<PredictionResult, BackendError>,
    explanation: Result<String, BackendError>,
    predict_calls: AtomicUsize,
    explain_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new(prediction: PredictionResult, explanation: &str) -> Self {
        Self {
            prediction: Ok(prediction),
            explanation: Ok(explanation.to_string()),
            predict_calls: AtomicUsize::new(0),
            explain_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_predict_error(mut self, error: BackendError) -> Self {
        self.prediction = Err(error);
        self
    }

    pub fn with_explain_error(mut self, error: BackendError) -> Self {
        self.explanation = Err(error);
        self
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    pub fn explain_calls(&self) -> usize {
        self.explain_calls.load(Ordering::SeqCst)
    }
}

impl PredictionBackend for MockBackend {
    fn predict(&self, _measurement: &PatientMeasurement) -> Result<PredictionResult, BackendError> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.prediction.clone()
    }

    fn explain(&self, _measurement: &PatientMeasurement) -> Result<String, BackendError> {
        self.explain_calls.fetch_add(1, Ordering::SeqCst);
        self.explanation.clone()
    }
}
