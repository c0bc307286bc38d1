//! Response body validation for `/predict` and `/explain`.

use serde_json::Value;

use super::BackendError;
use crate::models::{PredictionLabel, PredictionResult};

/// Parse a `/predict` body: `{"prediction": 0|1, "probability": 0.0..=1.0}`.
pub fn parse_prediction(body: &str) -> Result<PredictionResult, BackendError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let prediction = value
        .get("prediction")
        .ok_or_else(|| missing("prediction"))?;
    let label = prediction_code(prediction)
        .and_then(PredictionLabel::from_code)
        .ok_or_else(|| {
            BackendError::MalformedResponse(format!(
                "`prediction` must be 0 or 1, got {prediction}"
            ))
        })?;

    let probability_value = value
        .get("probability")
        .ok_or_else(|| missing("probability"))?;
    let probability = probability_value
        .as_f64()
        .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
        .ok_or_else(|| {
            BackendError::MalformedResponse(format!(
                "`probability` must be a number within [0, 1], got {probability_value}"
            ))
        })?;

    Ok(PredictionResult { label, probability })
}

/// Parse an `/explain` body: `{"explanation": "..."}`.
pub fn parse_explanation(body: &str) -> Result<String, BackendError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(format!("invalid JSON: {e}")))?;

    match value.get("explanation") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(BackendError::MalformedResponse(format!(
            "`explanation` must be a string, got {other}"
        ))),
        None => Err(missing("explanation")),
    }
}

/// Accept integral JSON numbers (1 or 1.0) as a 0/1 code.
fn prediction_code(value: &Value) -> Option<u8> {
    if let Some(n) = value.as_u64() {
        return u8::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && (0.0..=1.0).contains(f))
        .map(|f| f as u8)
}

fn missing(field: &str) -> BackendError {
    BackendError::MalformedResponse(format!("missing `{field}` field"))
}
