//! Identifier and validated scalar types for the user domain.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum username length accepted at registration.
const MIN_USERNAME_LENGTH: usize = 8;

/// Maximum username length, matching the `VARCHAR(64)` column.
const MAX_USERNAME_LENGTH: usize = 64;

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// The input is trimmed. Usernames must be 8 to 64 characters long and
    /// contain no whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::UsernameTooShort`],
    /// [`UserDomainError::UsernameTooLong`], or
    /// [`UserDomainError::UsernameWhitespace`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();

        if length < MIN_USERNAME_LENGTH {
            return Err(UserDomainError::UsernameTooShort(raw));
        }
        if length > MAX_USERNAME_LENGTH {
            return Err(UserDomainError::UsernameTooLong(raw));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(UserDomainError::UsernameWhitespace(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
