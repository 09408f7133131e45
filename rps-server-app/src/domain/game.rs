use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rps_core::{
    MoveCounts, RpsGameStatus, RpsMove, RpsOutcome, UndefinedMoveError, predict_next_move,
};
use thiserror::Error;

use crate::domain::{GameId, RepoError, UserId};

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub game_id: GameId,
    pub user_id: UserId,
    pub player_move: RpsMove,
    pub computer_move: RpsMove,
    pub outcome: Option<RpsOutcome>,
    pub status: RpsGameStatus,
    pub created_at: DateTime<Utc>,
    /// When the game reached a terminal status.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Game {
    /// A fresh session in the started state. No hand has been played yet.
    pub fn start(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            game_id: GameId::new(),
            user_id,
            player_move: RpsMove::Undefined,
            computer_move: RpsMove::Undefined,
            outcome: None,
            status: RpsGameStatus::Started,
            created_at: now,
            finished_at: None,
        }
    }

    pub fn completed_round(user_id: UserId, round: &Round, now: DateTime<Utc>) -> Self {
        Self {
            game_id: GameId::new(),
            user_id,
            player_move: round.player_move,
            computer_move: round.computer_move,
            outcome: Some(round.outcome),
            status: RpsGameStatus::Completed,
            created_at: now,
            finished_at: Some(now),
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.status != RpsGameStatus::Started {
            return false;
        }
        self.status = RpsGameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != RpsGameStatus::Paused {
            return false;
        }
        self.status = RpsGameStatus::Started;
        true
    }

    /// Ends an active game with a quit. Terminal games are left untouched.
    pub fn terminate(&mut self, now: DateTime<Utc>) -> bool {
        if !self.status.is_active() {
            return false;
        }
        self.status = RpsGameStatus::Terminated;
        self.finished_at = Some(now);
        self.outcome = Some(RpsOutcome::Quit);
        self.player_move = RpsMove::Undefined;
        self.computer_move = RpsMove::Undefined;
        true
    }
}

#[async_trait::async_trait]
pub trait GameRepository {
    /// Inserts the game or replaces the stored record with the same id.
    async fn save_game(&self, game: &Game) -> Result<(), RepoError>;
    /// The user's game that is neither completed nor terminated, if any.
    async fn get_active_game(&self, user_id: UserId) -> Result<Option<Game>, RepoError>;
    async fn get_finished_games(&self, user_id: UserId) -> Result<Vec<Game>, RepoError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round {
    pub player_move: RpsMove,
    pub predicted_move: RpsMove,
    pub computer_move: RpsMove,
    pub outcome: RpsOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Invalid move. Choose rock, paper, or scissors.")]
    InvalidMove,
    #[error(transparent)]
    UndefinedCounter(#[from] UndefinedMoveError),
}

pub trait GameService {
    fn play_round(&self, player_move: RpsMove) -> Result<Round, RoundError>;
    fn move_counts(&self) -> MoveCounts;
}

/// Resolves rounds against the move history of every player on this server.
///
/// The history is shared by all users, so one player's moves shape the
/// prediction made for another.
pub struct GameServiceImpl {
    move_counts: Arc<DashMap<RpsMove, u64>>,
}

impl GameServiceImpl {
    pub fn new() -> Self {
        let move_counts = DashMap::new();
        for mv in RpsMove::PLAYABLE {
            move_counts.insert(mv, 0);
        }
        Self {
            move_counts: Arc::new(move_counts),
        }
    }
}

impl GameService for GameServiceImpl {
    fn play_round(&self, player_move: RpsMove) -> Result<Round, RoundError> {
        if !player_move.is_playable() {
            return Err(RoundError::InvalidMove);
        }

        *self.move_counts.entry(player_move).or_insert(0) += 1;

        let predicted_move = predict_next_move(&self.move_counts());
        let computer_move = predicted_move.counter()?;
        let outcome = RpsOutcome::determine(player_move, computer_move);

        Ok(Round {
            player_move,
            predicted_move,
            computer_move,
            outcome,
        })
    }

    fn move_counts(&self) -> MoveCounts {
        self.move_counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }
}
