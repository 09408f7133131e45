use std::sync::Arc;

use rps_core::{RpsGameStatus, RpsMove, RpsOutcome};

use crate::{
    domain::game::{Game, GameRepository},
    services::user_resolver::UserResolverService,
    workflow::gameplay::GameplayError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub player_move: RpsMove,
    pub computer_move: RpsMove,
    pub outcome: Option<RpsOutcome>,
    pub status: RpsGameStatus,
    pub played_at: chrono::DateTime<chrono::Utc>,
}

impl GameSummary {
    pub fn from(game: &Game) -> Self {
        Self {
            player_move: game.player_move,
            computer_move: game.computer_move,
            outcome: game.outcome,
            status: game.status,
            played_at: game.finished_at.unwrap_or(game.created_at),
        }
    }
}

#[async_trait::async_trait]
pub trait GameHistoryUseCase {
    /// Completed rounds and terminated games of the user, newest first.
    async fn get_history(&self, username: &str) -> Result<Vec<GameSummary>, GameplayError>;
}

pub struct GameHistoryUseCaseImpl<U: UserResolverService, G: GameRepository> {
    user_resolver: Arc<U>,
    game_repository: Arc<G>,
}

impl<U: UserResolverService, G: GameRepository> GameHistoryUseCaseImpl<U, G> {
    pub fn new(user_resolver: Arc<U>, game_repository: Arc<G>) -> Self {
        Self {
            user_resolver,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<U: UserResolverService + Send + Sync + 'static, G: GameRepository + Send + Sync + 'static>
    GameHistoryUseCase for GameHistoryUseCaseImpl<U, G>
{
    async fn get_history(&self, username: &str) -> Result<Vec<GameSummary>, GameplayError> {
        let user = self.user_resolver.find_existing_user(username).await?;

        let games = self
            .game_repository
            .get_finished_games(user.user_id)
            .await
            .map_err(|e| GameplayError::StorageError(e.to_string()))?;
        let mut history: Vec<GameSummary> = games.iter().map(GameSummary::from).collect();
        history.sort_by(|a, b| b.played_at.cmp(&a.played_at));

        Ok(history)
    }
}
