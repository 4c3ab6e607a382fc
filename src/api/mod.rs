//! HTTP surface of the kanban service.
//!
//! Every resource route is mounted under [`API_PREFIX`]. Callers are
//! identified by the [`USER_ID_HEADER`] set by the authenticating
//! gateway; see [`CurrentUser`]. Failures use the [`ApiError`] taxonomy:
//! `400 { errors: [{ param, msg }] }`, `401`, `403 { message }`,
//! `404 { message }`, and `500 { error, message }`.

pub mod dto;
mod error;
pub mod handlers;
pub mod identity;
mod state;

pub use error::{ApiError, ApiErrorBody, FieldError};
pub use identity::{CurrentUser, USER_ID_HEADER};
pub use state::{AppState, Boards, Repositories, Sections, Tasks, Users};

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use std::time::Instant;
use tracing::{info, warn};

/// Prefix under which every resource route is mounted.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::system::status))
        .nest(API_PREFIX, resource_routes())
        .fallback(handlers::system::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

fn resource_routes() -> Router<AppState> {
    use handlers::{boards, sections, tasks, users};

    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/me", get(users::me))
        .route("/users/{user_id}", put(users::update_role))
        .route(
            "/boards",
            get(boards::list).post(boards::create).put(boards::reorder),
        )
        .route("/boards/favourites", get(boards::favourites))
        .route(
            "/boards/{board_id}",
            get(boards::detail)
                .put(boards::update)
                .delete(boards::delete),
        )
        .route("/boards/{board_id}/sections", post(sections::create))
        .route(
            "/boards/{board_id}/sections/update-position",
            put(sections::update_positions),
        )
        .route(
            "/boards/{board_id}/sections/{section_id}",
            put(sections::update).delete(sections::delete),
        )
        .route("/boards/{board_id}/tasks", post(tasks::create))
        .route(
            "/boards/{board_id}/tasks/update-position",
            put(tasks::update_positions),
        )
        .route(
            "/boards/{board_id}/tasks/{task_id}",
            put(tasks::update).delete(tasks::delete),
        )
        .route("/tasks/assigned", get(tasks::assigned))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), elapsed_ms, "request handled");
    }
    response
}
