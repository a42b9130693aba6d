use crate::handlers::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe with a database connectivity check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let status = if db_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_status == "healthy" { "healthy" } else { "unhealthy" },
            "checks": {
                "database": db_status,
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
