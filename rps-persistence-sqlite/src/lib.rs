use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rps_server_app::domain::RepoError;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod games;
pub mod stats;
pub mod users;

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS users (
        user_id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS games (
        game_id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(user_id),
        player_move TEXT NOT NULL,
        computer_move TEXT NOT NULL,
        outcome TEXT,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL,
        finished_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS games_user_status ON games (user_id, status)",
    "CREATE TABLE IF NOT EXISTS user_stats (
        user_id TEXT PRIMARY KEY NOT NULL REFERENCES users(user_id),
        games_played INTEGER NOT NULL,
        wins INTEGER NOT NULL,
        losses INTEGER NOT NULL,
        draws INTEGER NOT NULL,
        quits INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )",
];

/// Opens the database at `database_url`, creating the file and the tables
/// when they are missing.
pub async fn create_db_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<Pool<Sqlite>, sqlx::Error> {
    let conn_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(conn_options)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

// Fixed-width UTC timestamps so text ordering matches time ordering.
fn timestamp_to_string(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn timestamp_from_string(s: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(s)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| RepoError::StorageError(e.to_string()))
}

fn uuid_from_string(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(|e| RepoError::StorageError(e.to_string()))
}

fn storage_error(e: sqlx::Error) -> RepoError {
    RepoError::StorageError(e.to_string())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> Pool<Sqlite> {
    // One connection keeps a single shared in-memory database.
    create_db_pool("sqlite::memory:", 1).await.unwrap()
}
