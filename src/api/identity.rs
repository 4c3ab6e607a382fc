//! Caller identity supplied by the authenticating gateway.

use super::{ApiError, AppState};
use crate::user::domain::{Actor, User, UserId};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;
use uuid::Uuid;

/// Header carrying the authenticated user's identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, resolved from [`USER_ID_HEADER`].
///
/// Rejects with `401` when the header is missing, is not a UUID, or names
/// no known user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Returns the caller as a service actor.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.0.as_actor()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;
        let id = Uuid::parse_str(raw.trim())
            .map(UserId::from_uuid)
            .map_err(|_| ApiError::unauthorized("Unauthorized"))?;
        let user = state.users.find_by_id(id).await?.ok_or_else(|| {
            debug!(user_id = %id, "rejected unknown caller");
            ApiError::unauthorized("Unauthorized")
        })?;
        Ok(Self(user))
    }
}
