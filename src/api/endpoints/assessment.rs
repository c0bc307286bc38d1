//! Assessment endpoints.
//!
//! - `POST /api/assessment`: validate, predict, explain, store
//! - `GET /api/assessment/latest`: latest stored assessment
//! - `GET /api/assessment/export`: CSV download of the latest assessment
//! - `DELETE /api/assessment`: clear the session slot

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AssessmentView};
use crate::export::EXPORT_FILE_NAME;
use crate::models::MeasurementInput;

/// `POST /api/assessment`: run one submission cycle.
///
/// Backend calls are blocking, so the workflow runs on the blocking pool.
pub async fn submit(
    State(ctx): State<ApiContext>,
    body: Result<Json<MeasurementInput>, JsonRejection>,
) -> Result<Json<AssessmentView>, ApiError> {
    let Json(input) = body?;
    let core = ctx.core.clone();
    let assessment = tokio::task::spawn_blocking(move || core.submit(&input))
        .await
        .map_err(|e| ApiError::Internal(format!("assessment task failed: {e}")))??;

    Ok(Json(AssessmentView::from(assessment.as_ref())))
}

/// `GET /api/assessment/latest`: the assessment other views render.
pub async fn latest(State(ctx): State<ApiContext>) -> Result<Json<AssessmentView>, ApiError> {
    let assessment = ctx
        .core
        .latest()?
        .ok_or(ApiError::NoAssessment)?;

    Ok(Json(AssessmentView::from(assessment.as_ref())))
}

/// `GET /api/assessment/export`: CSV attachment.
pub async fn export(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    let bytes = ctx.core.export_latest()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `DELETE /api/assessment`: forget the stored assessment.
pub async fn reset(State(ctx): State<ApiContext>) -> Result<StatusCode, ApiError> {
    ctx.core.reset()?;
    Ok(StatusCode::NO_CONTENT)
}
