use rps_server_app::domain::{
    RepoError, UserId,
    stats::{StatsRepository, UserStats},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{storage_error, timestamp_from_string, timestamp_to_string};

pub struct SqliteStatsRepository {
    pool: Pool<Sqlite>,
}

impl SqliteStatsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn stats_from_row(user_id: UserId, row: &SqliteRow) -> Result<UserStats, RepoError> {
        let counter = |column: &str| -> Result<u64, RepoError> {
            row.try_get::<i64, _>(column)
                .map(|value| value as u64)
                .map_err(storage_error)
        };
        let created_at: String = row.try_get("created_at").map_err(storage_error)?;
        Ok(UserStats {
            user_id,
            games_played: counter("games_played")?,
            wins: counter("wins")?,
            losses: counter("losses")?,
            draws: counter("draws")?,
            quits: counter("quits")?,
            created_at: timestamp_from_string(&created_at)?,
        })
    }
}

#[async_trait::async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserStats>, RepoError> {
        let row = sqlx::query("SELECT * FROM user_stats WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        row.map(|row| Self::stats_from_row(user_id, &row))
            .transpose()
    }

    async fn save_user_stats(&self, stats: &UserStats) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO user_stats (user_id, games_played, wins, losses, draws, quits, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET games_played = excluded.games_played, wins = excluded.wins, losses = excluded.losses, draws = excluded.draws, quits = excluded.quits",
        )
        .bind(stats.user_id.to_string())
        .bind(stats.games_played as i64)
        .bind(stats.wins as i64)
        .bind(stats.losses as i64)
        .bind(stats.draws as i64)
        .bind(stats.quits as i64)
        .bind(timestamp_to_string(&stats.created_at))
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }
}
