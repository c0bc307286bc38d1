//! Session API router.
//!
//! Returns a composable `Router` with every view endpoint under `/api/`.
//!
//! Layers (outermost → innermost):
//! 1. CORS → 2. Request tracing → 3. `Cache-Control: no-store`

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the session API router.
pub fn session_api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/form", get(endpoints::form::fields))
        .route(
            "/assessment",
            post(endpoints::assessment::submit).delete(endpoints::assessment::reset),
        )
        .route("/assessment/latest", get(endpoints::assessment::latest))
        .route("/assessment/export", get(endpoints::assessment::export))
        .with_state(ctx);

    // Assessments carry patient data; never let a browser cache them
    let no_store = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(no_store)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::backend::{BackendError, MockBackend};
    use crate::models::{PredictionLabel, PredictionResult};
    use crate::tips::{AGE_TIP, BMI_TIP, GLUCOSE_TIP, INSULIN_TIP};
    use crate::workflow::ExplanationPolicy;

    const RISKY_BODY: &str = r#"{"Pregnancies":3,"Glucose":180,"BloodPressure":80,
        "SkinThickness":30,"Insulin":40,"BMI":32,"DiabetesPedigreeFunction":0.9,"Age":50}"#;

    fn mock() -> MockBackend {
        MockBackend::new(
            PredictionResult {
                label: PredictionLabel::Diabetic,
                probability: 0.8123,
            },
            "High glucose and BMI drove the prediction.",
        )
    }

    fn test_core(backend: MockBackend) -> Arc<CoreState> {
        Arc::new(CoreState::new(Arc::new(backend), ExplanationPolicy::Required))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/assessment")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1 << 16).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_empty_session() {
        let app = session_api_router(test_core(mock()));
        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["has_assessment"], false);
    }

    #[tokio::test]
    async fn form_lists_eight_fields_in_order() {
        let app = session_api_router(test_core(mock()));
        let response = app.oneshot(get_request("/api/form")).await.unwrap();
        let json = body_json(response).await;
        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0]["key"], "Pregnancies");
        assert_eq!(fields[5]["key"], "BMI");
        assert_eq!(fields[7]["min"], 1.0);
        assert_eq!(fields[1]["default"], 120.0);
    }

    #[tokio::test]
    async fn submit_returns_full_assessment_view() {
        let app = session_api_router(test_core(mock()));
        let response = app.oneshot(post_request(RISKY_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["prediction"], "diabetic");
        assert_eq!(json["prediction_text"], "Diabetic");
        assert_eq!(json["probability_percent"], "81.2%");
        assert_eq!(json["risk_tier"], "high");
        assert_eq!(json["explanation"], "High glucose and BMI drove the prediction.");
        assert_eq!(json["measurement"]["BMI"], 32.0);
        let tips: Vec<&str> = json["tips"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap())
            .collect();
        assert_eq!(tips, vec![GLUCOSE_TIP, BMI_TIP, INSULIN_TIP, AGE_TIP]);
    }

    #[tokio::test]
    async fn latest_and_export_after_submit() {
        let core = test_core(mock());

        let app = session_api_router(core.clone());
        let response = app.oneshot(post_request(RISKY_BODY)).await.unwrap();
        let submitted = body_json(response).await;

        let app = session_api_router(core.clone());
        let response = app
            .oneshot(get_request("/api/assessment/latest"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let latest = body_json(response).await;
        assert_eq!(latest["id"], submitted["id"]);

        let app = session_api_router(core);
        let response = app
            .oneshot(get_request("/api/assessment/export"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert!(response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment"));
        let body = to_bytes(response.into_body(), 1 << 16).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "3,180,80,30,40,32,0.9,50,1,0.8123");
    }

    #[tokio::test]
    async fn latest_and_export_404_when_empty() {
        let core = test_core(mock());

        let response = session_api_router(core.clone())
            .oneshot(get_request("/api/assessment/latest"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NO_ASSESSMENT");

        let response = session_api_router(core)
            .oneshot(get_request("/api/assessment/export"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOTHING_TO_EXPORT");
    }

    #[tokio::test]
    async fn invalid_input_returns_422_without_storing() {
        let core = test_core(mock());
        let body = RISKY_BODY.replace(r#""Age":50"#, r#""Age":0"#);

        let response = session_api_router(core.clone())
            .oneshot(post_request(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["field"], "Age");
        assert!(!core.session().has_assessment().unwrap());
    }

    #[tokio::test]
    async fn partial_record_returns_json_error() {
        let core = test_core(mock());

        let response = session_api_router(core.clone())
            .oneshot(post_request(r#"{"Pregnancies":2,"Glucose":148}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_BODY");
        assert!(json["error"]["detail"]
            .as_str()
            .unwrap()
            .contains("BloodPressure"));
        assert!(!core.session().has_assessment().unwrap());
    }

    #[tokio::test]
    async fn non_json_body_returns_json_error() {
        let response = session_api_router(test_core(mock()))
            .oneshot(post_request("not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn non_numeric_value_returns_json_error() {
        let body = RISKY_BODY.replace(r#""Glucose":180"#, r#""Glucose":"high""#);
        let response = session_api_router(test_core(mock()))
            .oneshot(post_request(&body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn backend_500_returns_502_and_keeps_session_empty() {
        let core = test_core(mock().with_predict_error(BackendError::Status {
            status: 500,
            body: "Internal Server Error".into(),
        }));

        let response = session_api_router(core.clone())
            .oneshot(post_request(RISKY_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BACKEND_ERROR");
        assert_eq!(
            json["error"]["message"],
            "Something went wrong connecting to the backend."
        );
        assert!(!core.session().has_assessment().unwrap());
    }

    #[tokio::test]
    async fn reset_clears_session() {
        let core = test_core(mock());
        session_api_router(core.clone())
            .oneshot(post_request(RISKY_BODY))
            .await
            .unwrap();
        assert!(core.session().has_assessment().unwrap());

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/assessment")
            .body(Body::empty())
            .unwrap();
        let response = session_api_router(core.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!core.session().has_assessment().unwrap());
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = session_api_router(test_core(mock()));
        let response = app.oneshot(get_request("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
