use rps_server_app::domain::{
    RepoCreateError, RepoError, UserId,
    user::{User, UserRepository},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{storage_error, timestamp_from_string, timestamp_to_string, uuid_from_string};

pub struct SqliteUserRepository {
    pool: Pool<Sqlite>,
}

impl SqliteUserRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &SqliteRow) -> Result<User, RepoError> {
        let user_id: String = row.try_get("user_id").map_err(storage_error)?;
        let created_at: String = row.try_get("created_at").map_err(storage_error)?;
        Ok(User {
            user_id: UserId(uuid_from_string(&user_id)?),
            username: row.try_get("username").map_err(storage_error)?,
            created_at: timestamp_from_string(&created_at)?,
        })
    }
}

#[async_trait::async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        row.as_ref().map(Self::user_from_row).transpose()
    }

    async fn create_user(&self, user: User) -> Result<(), RepoCreateError> {
        sqlx::query("INSERT INTO users (user_id, username, created_at) VALUES (?, ?, ?)")
            .bind(user.user_id.to_string())
            .bind(&user.username)
            .bind(timestamp_to_string(&user.created_at))
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    RepoCreateError::Conflict
                }
                e => RepoCreateError::StorageError(e.to_string()),
            })?;
        Ok(())
    }
}
