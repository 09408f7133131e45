use std::sync::Arc;

use rps_core::RpsOutcome;

use crate::{
    domain::game::GameRepository,
    services::user_resolver::UserResolverService,
    workflow::{
        gameplay::{GameplayError, SessionReply, load_active_game, record_outcome},
        stats::update::UpdateStatsWorkflow,
    },
};

#[async_trait::async_trait]
pub trait GameControlUseCase {
    async fn pause_game(&self, username: &str) -> Result<SessionReply, GameplayError>;
    async fn resume_game(&self, username: &str) -> Result<SessionReply, GameplayError>;
    async fn terminate_game(&self, username: &str) -> Result<SessionReply, GameplayError>;
}

pub struct GameControlUseCaseImpl<U: UserResolverService, G: GameRepository, S: UpdateStatsWorkflow>
{
    user_resolver: Arc<U>,
    game_repository: Arc<G>,
    update_stats_workflow: Arc<S>,
}

impl<U: UserResolverService, G: GameRepository, S: UpdateStatsWorkflow>
    GameControlUseCaseImpl<U, G, S>
{
    pub fn new(
        user_resolver: Arc<U>,
        game_repository: Arc<G>,
        update_stats_workflow: Arc<S>,
    ) -> Self {
        Self {
            user_resolver,
            game_repository,
            update_stats_workflow,
        }
    }
}

#[async_trait::async_trait]
impl<
    U: UserResolverService + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    S: UpdateStatsWorkflow + Send + Sync + 'static,
> GameControlUseCase for GameControlUseCaseImpl<U, G, S>
{
    async fn pause_game(&self, username: &str) -> Result<SessionReply, GameplayError> {
        let user = self.user_resolver.find_existing_user(username).await?;
        let mut game = load_active_game(&*self.game_repository, &user).await?;

        if !game.pause() {
            return Ok(SessionReply::CannotPause);
        }

        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| GameplayError::GameSaveFailure(e.to_string()))?;
        log::info!("Game paused for user: {}", username);
        Ok(SessionReply::GamePaused {
            username: user.username,
        })
    }

    async fn resume_game(&self, username: &str) -> Result<SessionReply, GameplayError> {
        let user = self.user_resolver.find_existing_user(username).await?;
        let mut game = load_active_game(&*self.game_repository, &user).await?;

        if !game.resume() {
            return Ok(SessionReply::CannotResume);
        }

        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| GameplayError::GameSaveFailure(e.to_string()))?;
        log::info!("Game resumed for user: {}", username);
        Ok(SessionReply::GameResumed {
            username: user.username,
        })
    }

    async fn terminate_game(&self, username: &str) -> Result<SessionReply, GameplayError> {
        let user = self.user_resolver.find_existing_user(username).await?;
        let mut game = load_active_game(&*self.game_repository, &user).await?;

        game.terminate(chrono::Utc::now());
        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| GameplayError::GameSaveFailure(e.to_string()))?;

        record_outcome(&*self.update_stats_workflow, &user, RpsOutcome::Quit).await;

        log::info!("Game terminated for user: {}", username);
        Ok(SessionReply::GameTerminated {
            username: user.username,
        })
    }
}
