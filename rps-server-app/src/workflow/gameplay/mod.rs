use std::fmt;

use rps_core::{RpsMove, RpsOutcome};
use thiserror::Error;

use crate::{
    domain::{
        game::{Game, GameRepository},
        user::User,
    },
    services::user_resolver::ResolveUserError,
    workflow::stats::update::UpdateStatsWorkflow,
};

pub mod control;
pub mod history;
pub mod play;
pub mod start;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameplayError {
    #[error("Username must not be empty")]
    InvalidUsername,
    #[error("User not found with username: {0}")]
    UserNotFound(String),
    #[error("No in-progress game found for user: {0}")]
    NoActiveGame(String),
    #[error("Failed to save game data: {0}")]
    GameSaveFailure(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<ResolveUserError> for GameplayError {
    fn from(value: ResolveUserError) -> Self {
        match value {
            ResolveUserError::InvalidUsername => GameplayError::InvalidUsername,
            ResolveUserError::NotFound(username) => GameplayError::UserNotFound(username),
            ResolveUserError::StorageError(e) => GameplayError::StorageError(e),
        }
    }
}

/// Reply to a session action. The `Display` output is what players see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionReply {
    GameStarted {
        username: String,
    },
    GameAlreadyInProgress {
        username: String,
    },
    RoundPlayed {
        predicted_move: RpsMove,
        computer_move: RpsMove,
        outcome: RpsOutcome,
    },
    PlayerQuit,
    InvalidMove,
    GameNotStarted,
    GamePaused {
        username: String,
    },
    CannotPause,
    GameResumed {
        username: String,
    },
    CannotResume,
    GameTerminated {
        username: String,
    },
    SaveFailed,
    UnexpectedError {
        detail: String,
    },
}

impl fmt::Display for SessionReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionReply::GameStarted { username } => {
                write!(f, "New game started for {}. Make your first move!", username)
            }
            SessionReply::GameAlreadyInProgress { username } => write!(
                f,
                "A game is already in progress for {}. Make your next move!",
                username
            ),
            SessionReply::RoundPlayed {
                predicted_move,
                computer_move,
                outcome,
            } => write!(
                f,
                "Computer predicted {} and chose {}. You {}!",
                predicted_move, computer_move, outcome
            ),
            SessionReply::PlayerQuit => f.write_str("Game terminated. Player has quit."),
            SessionReply::InvalidMove => {
                f.write_str("Invalid move. Choose rock, paper, or scissors.")
            }
            SessionReply::GameNotStarted => f.write_str(
                "The game is currently not started or paused. Start or resume the game to play.",
            ),
            SessionReply::GamePaused { username } => write!(f, "Game paused for {}.", username),
            SessionReply::CannotPause => {
                f.write_str("The game is not in a started state, so it cannot be paused.")
            }
            SessionReply::GameResumed { username } => {
                write!(f, "Game resumed for {}. Make your next move!", username)
            }
            SessionReply::CannotResume => {
                f.write_str("The game is not paused, so it cannot be resumed.")
            }
            SessionReply::GameTerminated { username } => {
                write!(f, "Game terminated for user {}.", username)
            }
            SessionReply::SaveFailed => {
                f.write_str("An error occurred while saving the game data.")
            }
            SessionReply::UnexpectedError { detail } => {
                write!(f, "An unexpected error occurred: {}", detail)
            }
        }
    }
}

async fn load_active_game<G: GameRepository + Send + Sync>(
    game_repository: &G,
    user: &User,
) -> Result<Game, GameplayError> {
    game_repository
        .get_active_game(user.user_id)
        .await
        .map_err(|e| GameplayError::StorageError(e.to_string()))?
        .ok_or_else(|| GameplayError::NoActiveGame(user.username.clone()))
}

/// Statistics are best effort: failures are logged and never reach the player.
async fn record_outcome<S: UpdateStatsWorkflow + Send + Sync>(
    update_stats_workflow: &S,
    user: &User,
    outcome: RpsOutcome,
) {
    if let Err(e) = update_stats_workflow
        .record_outcome(user.user_id, outcome)
        .await
    {
        log::error!(
            "Failed to update game statistics for {}: {}",
            user.username,
            e
        );
    }
}
