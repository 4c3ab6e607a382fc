//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is shorter than the minimum length after trimming.
    #[error("username must be at least 8 characters")]
    UsernameTooShort(String),

    /// The username exceeds the storage limit.
    #[error("username must be at most 64 characters")]
    UsernameTooLong(String),

    /// The username contains whitespace.
    #[error("username must not contain whitespace")]
    UsernameWhitespace(String),
}

/// Error returned while parsing a role from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role specified: {0}")]
pub struct ParseRoleError(pub String);
