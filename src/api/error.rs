//! HTTP error taxonomy and its JSON bodies.

use crate::board::{ports::BoardRepositoryError, services::BoardServiceError};
use crate::ordering::OrderingError;
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use crate::user::{ports::UserRepositoryError, services::UserServiceError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending path or body parameter.
    pub param: String,
    /// Human-readable reason.
    pub msg: String,
}

/// JSON body sent with an error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    /// `400`: one entry per rejected field.
    Validation {
        /// Rejected fields.
        errors: Vec<FieldError>,
    },
    /// `401`, `403`, and `404`.
    Message {
        /// Reason shown to the caller.
        message: String,
    },
    /// `500`.
    Internal {
        /// Error category.
        error: String,
        /// Reason shown to the caller.
        message: String,
    },
}

/// An error response: status plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body.
    pub body: ApiErrorBody,
}

impl ApiError {
    /// `400` for a single invalid parameter.
    #[must_use]
    pub fn validation(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody::Validation {
                errors: vec![FieldError {
                    param: param.into(),
                    msg: msg.into(),
                }],
            },
        }
    }

    /// `401` for a missing or unknown caller identity.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::message(StatusCode::UNAUTHORIZED, message)
    }

    /// `403` for an authenticated caller lacking permission.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::message(StatusCode::FORBIDDEN, message)
    }

    /// `404` for a missing resource.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(StatusCode::NOT_FOUND, message)
    }

    /// `500` for anything unexpected. The cause is logged, not returned.
    #[must_use]
    pub fn internal(cause: &dyn std::error::Error) -> Self {
        error!(error = %cause, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody::Internal {
                error: "Internal Server Error".to_owned(),
                message: "Something went wrong".to_owned(),
            },
        }
    }

    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody::Message {
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

fn ordering_error(err: &OrderingError) -> ApiError {
    match err {
        OrderingError::DuplicateItem(id) => {
            ApiError::validation("id", format!("duplicate id in ordered list: {id}"))
        }
        OrderingError::IndexOutOfBounds { .. } | OrderingError::TooManyItems(_) => {
            ApiError::validation("position", err.to_string())
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Domain(domain) => Self::validation("username", domain.to_string()),
            UserServiceError::InvalidRole(role) => Self::validation("role", role.to_string()),
            UserServiceError::Forbidden => {
                Self::forbidden("Access denied: Admin privileges required")
            }
            UserServiceError::NotFound(_) => Self::not_found("User not found"),
            UserServiceError::Repository(UserRepositoryError::DuplicateUsername(_)) => {
                Self::validation("username", "username already used")
            }
            UserServiceError::Repository(UserRepositoryError::NotFound(_)) => {
                Self::not_found("User not found")
            }
            UserServiceError::Repository(repository) => Self::internal(&repository),
        }
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        match err {
            BoardServiceError::Domain(domain) => Self::validation("icon", domain.to_string()),
            BoardServiceError::Ordering(ordering) => ordering_error(&ordering),
            BoardServiceError::BoardNotFound(_)
            | BoardServiceError::Repository(BoardRepositoryError::BoardNotFound(_)) => {
                Self::not_found("Board not found")
            }
            BoardServiceError::SectionNotFound(_)
            | BoardServiceError::Repository(BoardRepositoryError::SectionNotFound(_)) => {
                Self::not_found("Section not found")
            }
            BoardServiceError::SectionOutsideBoard { section, .. } => Self::validation(
                "sections",
                format!("section {section} does not belong to this board"),
            ),
            BoardServiceError::Forbidden(_) => {
                Self::forbidden("Access denied: Not authorized for this board")
            }
            BoardServiceError::Repository(BoardRepositoryError::ForeignBoard(board)) => {
                Self::validation("boards", format!("board {board} is not in this sidebar"))
            }
            BoardServiceError::Repository(BoardRepositoryError::ForeignSection(section)) => {
                Self::validation(
                    "sections",
                    format!("section {section} does not belong to this board"),
                )
            }
            BoardServiceError::Repository(
                incomplete @ BoardRepositoryError::IncompleteOrder { .. },
            ) => Self::validation("order", incomplete.to_string()),
            BoardServiceError::Repository(BoardRepositoryError::NoFreePosition(ordering)) => {
                ordering_error(&ordering)
            }
            BoardServiceError::Repository(repository) => Self::internal(&repository),
            BoardServiceError::TaskRepository(repository) => Self::internal(&repository),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Ordering(ordering) => ordering_error(&ordering),
            TaskServiceError::BoardNotFound(_)
            | TaskServiceError::BoardRepository(BoardRepositoryError::BoardNotFound(_)) => {
                Self::not_found("Board not found")
            }
            TaskServiceError::SectionNotFound(_)
            | TaskServiceError::BoardRepository(BoardRepositoryError::SectionNotFound(_)) => {
                Self::not_found("Section not found")
            }
            TaskServiceError::SectionOutsideBoard { section, .. } => Self::validation(
                "sectionId",
                format!("section {section} does not belong to this board"),
            ),
            TaskServiceError::TaskNotFound(_)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::not_found("Task not found")
            }
            TaskServiceError::UnknownAssignee(_) => {
                Self::validation("assignee", "assignee does not exist")
            }
            TaskServiceError::Forbidden(_) => {
                Self::forbidden("Access denied: Not authorized for this task")
            }
            TaskServiceError::Repository(TaskRepositoryError::ForeignTask(task)) => {
                Self::validation(
                    "destinationList",
                    format!("task {task} does not belong to the listed sections"),
                )
            }
            TaskServiceError::Repository(
                incomplete @ TaskRepositoryError::IncompleteOrder { .. },
            ) => Self::validation("destinationList", incomplete.to_string()),
            TaskServiceError::Repository(TaskRepositoryError::SectionFull(ordering)) => {
                ordering_error(&ordering)
            }
            TaskServiceError::Repository(repository) => Self::internal(&repository),
            TaskServiceError::BoardRepository(repository) => Self::internal(&repository),
            TaskServiceError::UserRepository(repository) => Self::internal(&repository),
        }
    }
}
