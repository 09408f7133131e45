use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    RepoCreateError,
    user::{User, UserRepository},
};

#[async_trait::async_trait]
pub trait UserResolverService {
    /// Looks the user up, creating it on first reference.
    async fn find_or_create_user(&self, username: &str) -> Result<User, ResolveUserError>;
    async fn find_existing_user(&self, username: &str) -> Result<User, ResolveUserError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveUserError {
    #[error("Username must not be empty")]
    InvalidUsername,
    #[error("User not found with username: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub struct UserResolverServiceImpl<UR: UserRepository> {
    user_repository: Arc<UR>,
}

impl<UR: UserRepository> UserResolverServiceImpl<UR> {
    pub fn new(user_repository: Arc<UR>) -> Self {
        Self { user_repository }
    }

    async fn lookup(&self, username: &str) -> Result<Option<User>, ResolveUserError> {
        if username.is_empty() {
            return Err(ResolveUserError::InvalidUsername);
        }
        self.user_repository
            .get_user_by_username(username)
            .await
            .map_err(|e| ResolveUserError::StorageError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl<UR: UserRepository + Send + Sync + 'static> UserResolverService
    for UserResolverServiceImpl<UR>
{
    async fn find_or_create_user(&self, username: &str) -> Result<User, ResolveUserError> {
        if let Some(user) = self.lookup(username).await? {
            return Ok(user);
        }

        let user = User::new(username);
        match self.user_repository.create_user(user.clone()).await {
            Ok(()) => {
                log::info!("Created user {} ({})", user.username, user.user_id);
                Ok(user)
            }
            // Lost a race against a concurrent request for the same name
            Err(RepoCreateError::Conflict) => self
                .lookup(username)
                .await?
                .ok_or_else(|| ResolveUserError::NotFound(username.to_string())),
            Err(RepoCreateError::StorageError(e)) => {
                log::error!("Failed to create user {}: {}", username, e);
                Err(ResolveUserError::StorageError(e))
            }
        }
    }

    async fn find_existing_user(&self, username: &str) -> Result<User, ResolveUserError> {
        self.lookup(username)
            .await?
            .ok_or_else(|| ResolveUserError::NotFound(username.to_string()))
    }
}
