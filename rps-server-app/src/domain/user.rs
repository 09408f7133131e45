use crate::domain::{RepoCreateError, RepoError, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(),
            username: username.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[async_trait::async_trait]
pub trait UserRepository {
    /// Usernames are matched case-sensitively.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
    async fn create_user(&self, user: User) -> Result<(), RepoCreateError>;
}
