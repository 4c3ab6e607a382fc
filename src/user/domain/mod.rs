//! Domain model for user accounts.

mod error;
mod ids;
mod user;

pub use error::{ParseRoleError, UserDomainError};
pub use ids::{UserId, Username};
pub use user::{Actor, PersistedUserData, Role, User};
