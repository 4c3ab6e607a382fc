//! Route handlers, one module per resource.

pub mod boards;
pub mod sections;
pub mod system;
pub mod tasks;
pub mod users;

use super::ApiError;
use super::dto::OrderedItem;
use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use uuid::Uuid;

/// Body reply for successful mutations without a payload.
pub const UPDATED: &str = "updated";

/// Body reply for successful deletions.
pub const DELETED: &str = "deleted";

/// JSON body extractor whose rejection uses the API error shape.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters shared by board-scoped routes.
#[derive(Debug, Deserialize)]
pub struct BoardPath {
    /// Board identifier.
    pub board_id: String,
}

/// Parses a UUID parameter, naming it in the `400` on failure.
pub(super) fn parse_id<T>(param: &str, raw: &str, wrap: fn(Uuid) -> T) -> Result<T, ApiError> {
    Uuid::parse_str(raw.trim())
        .map(wrap)
        .map_err(|_| ApiError::validation(param, format!("invalid {}", describe(param))))
}

/// Parses every identifier of an ordered list.
pub(super) fn parse_ordered<T>(
    param: &str,
    items: &[OrderedItem],
    wrap: fn(Uuid) -> T,
) -> Result<Vec<T>, ApiError> {
    items
        .iter()
        .map(|item| parse_id(param, &item.id, wrap))
        .collect()
}

fn describe(param: &str) -> String {
    let mut words = String::with_capacity(param.len() + 2);
    for ch in param.chars() {
        if ch.is_ascii_uppercase() {
            words.push(' ');
            words.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            words.push(' ');
        } else {
            words.push(ch);
        }
    }
    words
}
