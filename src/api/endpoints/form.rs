//! Input form description.

use axum::Json;
use serde::Serialize;

use crate::api::types::FieldView;
use crate::models::FIELD_SPECS;

#[derive(Serialize)]
pub struct FormResponse {
    pub fields: Vec<FieldView>,
}

/// `GET /api/form`: labels, ranges and defaults for the measurement form.
pub async fn fields() -> Json<FormResponse> {
    Json(FormResponse {
        fields: FIELD_SPECS.iter().map(FieldView::from).collect(),
    })
}
