//! Service layer for user account management.

use crate::user::{
    domain::{Actor, ParseRoleError, Role, User, UserDomainError, UserId, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    username: String,
    role: Option<String>,
}

impl CreateUserRequest {
    /// Creates a request for a user with the default role.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: None,
        }
    }

    /// Sets an explicit role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// The requested role is not recognized.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),
    /// The caller lacks the admin role.
    #[error("access denied: admin privileges required")]
    Forbidden,
    /// The target user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user account service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account orchestration service.
pub struct UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a user account. Only admins may create accounts.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Forbidden`] for non-admin callers,
    /// [`UserServiceError::Domain`] or [`UserServiceError::InvalidRole`] when
    /// validation fails, or [`UserServiceError::Repository`] when the
    /// username is taken or persistence fails.
    pub async fn create_user(
        &self,
        actor: Actor,
        request: CreateUserRequest,
    ) -> UserServiceResult<User> {
        require_admin(actor)?;
        let CreateUserRequest {
            username: raw_username,
            role: raw_role,
        } = request;
        let username = Username::new(raw_username)?;
        let role = raw_role
            .as_deref()
            .map(Role::try_from)
            .transpose()?
            .unwrap_or_default();

        let user = User::new(username, role, &*self.clock);
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), role = role.as_str(), "created user");
        Ok(user)
    }

    /// Returns the user for an authenticated identity, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every user. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Forbidden`] for non-admin callers or
    /// [`UserServiceError::Repository`] when lookup fails.
    pub async fn list_all(&self, actor: Actor) -> UserServiceResult<Vec<User>> {
        require_admin(actor)?;
        let users = self.repository.list_all().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Changes a user's role. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Forbidden`] for non-admin callers,
    /// [`UserServiceError::InvalidRole`] for unknown roles,
    /// [`UserServiceError::NotFound`] when the user is missing, or
    /// [`UserServiceError::Repository`] when persistence fails.
    pub async fn update_role(
        &self,
        actor: Actor,
        user_id: UserId,
        role_name: &str,
    ) -> UserServiceResult<User> {
        require_admin(actor)?;
        let role = Role::try_from(role_name)?;
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::NotFound(user_id))?;
        user.change_role(role, &*self.clock);
        self.repository.update(&user).await?;
        info!(%user_id, role = role.as_str(), "updated user role");
        Ok(user)
    }

    /// Ensures an admin account called `name` exists.
    ///
    /// Creates the account when missing and promotes it when it exists with
    /// a lesser role. Used to seed the first administrator at startup.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] for invalid usernames or
    /// [`UserServiceError::Repository`] when persistence fails.
    pub async fn ensure_admin(&self, name: &str) -> UserServiceResult<User> {
        let username = Username::new(name)?;
        match self.repository.find_by_username(&username).await? {
            Some(user) if user.role().is_admin() => Ok(user),
            Some(mut user) => {
                user.change_role(Role::Admin, &*self.clock);
                self.repository.update(&user).await?;
                info!(user_id = %user.id(), "promoted bootstrap admin");
                Ok(user)
            }
            None => {
                let user = User::new(username, Role::Admin, &*self.clock);
                self.repository.store(&user).await?;
                info!(user_id = %user.id(), "created bootstrap admin");
                Ok(user)
            }
        }
    }
}

fn require_admin(actor: Actor) -> UserServiceResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(UserServiceError::Forbidden)
    }
}
