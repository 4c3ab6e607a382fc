//! `/users` routes.

use super::{ApiJson, parse_id};
use crate::api::dto::{CreateUserBody, UpdateUserBody, UserResponse};
use crate::api::{ApiError, AppState, CurrentUser};
use crate::user::domain::UserId;
use crate::user::services::CreateUserRequest;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

/// Path parameters for `/users/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct UserPath {
    /// User identifier.
    pub user_id: String,
}

/// `GET /users` (admin).
pub async fn list(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_all(caller.actor()).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// `POST /users` (admin).
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(body): ApiJson<CreateUserBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let CreateUserBody { username, role } = body;
    let request = match role {
        Some(role) => CreateUserRequest::new(username).with_role(role),
        None => CreateUserRequest::new(username),
    };
    let user = state.users.create_user(caller.actor(), request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// `PUT /users/{user_id}` (admin): changes the role.
pub async fn update_role(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(path): Path<UserPath>,
    ApiJson(body): ApiJson<UpdateUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_id("userId", &path.user_id, UserId::from_uuid)?;
    let user = state
        .users
        .update_role(caller.actor(), user_id, &body.role)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// `GET /users/me`
pub async fn me(caller: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&caller.0))
}
