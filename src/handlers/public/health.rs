use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::HealthCheck;
use crate::middleware::ApiResponse;

/// GET /ping
pub async fn ping_get() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// GET /health - 503 when the store does not answer
pub async fn health_get(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.health.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "code": StatusCode::SERVICE_UNAVAILABLE.as_u16(),
                    "message": "database unavailable.",
                })),
            )
                .into_response()
        }
    }
}
