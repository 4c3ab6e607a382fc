//! Liveness and fallback routes.

use crate::api::AppState;
use crate::api::dto::{NotFoundResponse, StatusResponse};
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use mockable::Clock;

/// `GET /`
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Hello! Kanban API Server is running correctly.".to_owned(),
        status: "online".to_owned(),
        timestamp: state.clock.utc(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found(
    State(state): State<AppState>,
    uri: Uri,
) -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Not Found".to_owned(),
            path: uri.path().to_owned(),
            timestamp: state.clock.utc(),
        }),
    )
}
