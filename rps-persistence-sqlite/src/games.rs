use rps_core::{RpsGameStatus, RpsMove, RpsOutcome};
use rps_server_app::domain::{
    GameId, RepoError, UserId,
    game::{Game, GameRepository},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{storage_error, timestamp_from_string, timestamp_to_string, uuid_from_string};

pub struct SqliteGameRepository {
    pool: Pool<Sqlite>,
}

impl SqliteGameRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn game_from_row(row: &SqliteRow) -> Result<Game, RepoError> {
        let text = |column: &str| -> Result<String, RepoError> {
            row.try_get::<String, _>(column).map_err(storage_error)
        };
        let outcome: Option<String> = row.try_get("outcome").map_err(storage_error)?;
        let finished_at: Option<String> = row.try_get("finished_at").map_err(storage_error)?;

        Ok(Game {
            game_id: GameId(uuid_from_string(&text("game_id")?)?),
            user_id: UserId(uuid_from_string(&text("user_id")?)?),
            player_move: parse_column::<RpsMove>(&text("player_move")?)?,
            computer_move: parse_column::<RpsMove>(&text("computer_move")?)?,
            outcome: outcome
                .as_deref()
                .map(parse_column::<RpsOutcome>)
                .transpose()?,
            status: parse_column::<RpsGameStatus>(&text("status")?)?,
            created_at: timestamp_from_string(&text("created_at")?)?,
            finished_at: finished_at
                .as_deref()
                .map(timestamp_from_string)
                .transpose()?,
        })
    }
}

fn parse_column<T>(value: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| RepoError::StorageError(e.to_string()))
}

#[async_trait::async_trait]
impl GameRepository for SqliteGameRepository {
    async fn save_game(&self, game: &Game) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO games (game_id, user_id, player_move, computer_move, outcome, status, created_at, finished_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(game_id) DO UPDATE SET player_move = excluded.player_move, computer_move = excluded.computer_move, outcome = excluded.outcome, status = excluded.status, finished_at = excluded.finished_at",
        )
        .bind(game.game_id.to_string())
        .bind(game.user_id.to_string())
        .bind(game.player_move.as_str())
        .bind(game.computer_move.as_str())
        .bind(game.outcome.map(|outcome| outcome.as_str()))
        .bind(game.status.as_str())
        .bind(timestamp_to_string(&game.created_at))
        .bind(game.finished_at.as_ref().map(timestamp_to_string))
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn get_active_game(&self, user_id: UserId) -> Result<Option<Game>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM games WHERE user_id = ? AND status IN (?, ?) ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(RpsGameStatus::Started.as_str())
        .bind(RpsGameStatus::Paused.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.as_ref().map(Self::game_from_row).transpose()
    }

    async fn get_finished_games(&self, user_id: UserId) -> Result<Vec<Game>, RepoError> {
        sqlx::query("SELECT * FROM games WHERE user_id = ? AND status IN (?, ?)")
            .bind(user_id.to_string())
            .bind(RpsGameStatus::Completed.as_str())
            .bind(RpsGameStatus::Terminated.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?
            .iter()
            .map(Self::game_from_row)
            .collect()
    }
}
