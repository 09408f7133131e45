use dashmap::{DashMap, mapref::entry::Entry};
use rps_server_app::domain::{
    RepoCreateError, RepoError,
    user::{User, UserRepository},
};

pub struct UserRepositoryImpl {
    users: DashMap<String, User>,
}

impl UserRepositoryImpl {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl Default for UserRepositoryImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(username).map(|entry| entry.clone()))
    }

    async fn create_user(&self, user: User) -> Result<(), RepoCreateError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(RepoCreateError::Conflict),
            Entry::Vacant(entry) => {
                entry.insert(user);
                Ok(())
            }
        }
    }
}
