use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and storage are healthy"),
        (status = 503, description = "Storage is unavailable")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let bot_configured = state.authenticator.is_some();
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "storage": state.config.storage_backend.to_string(),
                "botConfigured": bot_configured,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "storage": state.config.storage_backend.to_string(),
                    "botConfigured": bot_configured,
                })),
            )
        }
    }
}
