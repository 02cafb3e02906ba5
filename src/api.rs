//! HTTP API routes and status mapping

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{BurnAgent, BurnPlanError};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub city: String,
}

pub fn router(agent: Arc<BurnAgent>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .with_state(agent)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

/// Analyze burn conditions for the requested city
///
/// Empty input is rejected before any outbound call is made. A
/// request-fatal analysis failure (geocoding miss or uncaught error)
/// maps to a server error with the failure message as the body; section
/// failures are already absorbed into the report itself.
async fn analyze(
    State(agent): State<Arc<BurnAgent>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if request.city.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "City name is required");
    }

    match agent.analyze(&request.city).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            let status = match err.downcast_ref::<BurnPlanError>() {
                Some(known) if known.is_client_error() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!("Analysis failed: {:#}", err);
            error_response(status, &format!("{err:#}"))
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_defaults_missing_city_to_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.city.is_empty());

        let request: AnalyzeRequest = serde_json::from_str(r#"{"city": "Bend"}"#).unwrap();
        assert_eq!(request.city, "Bend");
    }
}
