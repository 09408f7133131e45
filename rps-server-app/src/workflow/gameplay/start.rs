use std::sync::Arc;

use crate::{
    domain::game::{Game, GameRepository},
    services::user_resolver::UserResolverService,
    workflow::gameplay::{GameplayError, SessionReply},
};

#[async_trait::async_trait]
pub trait StartGameUseCase {
    async fn start_game(&self, username: &str) -> Result<SessionReply, GameplayError>;
}

pub struct StartGameUseCaseImpl<U: UserResolverService, G: GameRepository> {
    user_resolver: Arc<U>,
    game_repository: Arc<G>,
}

impl<U: UserResolverService, G: GameRepository> StartGameUseCaseImpl<U, G> {
    pub fn new(user_resolver: Arc<U>, game_repository: Arc<G>) -> Self {
        Self {
            user_resolver,
            game_repository,
        }
    }
}

#[async_trait::async_trait]
impl<U: UserResolverService + Send + Sync + 'static, G: GameRepository + Send + Sync + 'static>
    StartGameUseCase for StartGameUseCaseImpl<U, G>
{
    async fn start_game(&self, username: &str) -> Result<SessionReply, GameplayError> {
        let user = self.user_resolver.find_or_create_user(username).await?;

        let active_game = self
            .game_repository
            .get_active_game(user.user_id)
            .await
            .map_err(|e| GameplayError::StorageError(e.to_string()))?;

        // A paused game also counts as in progress, only one active game per user
        if let Some(game) = active_game {
            log::info!(
                "Game already in progress for user: {} ({})",
                username,
                game.status
            );
            return Ok(SessionReply::GameAlreadyInProgress {
                username: user.username,
            });
        }

        let game = Game::start(user.user_id, chrono::Utc::now());
        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| GameplayError::GameSaveFailure(e.to_string()))?;

        log::info!("New game created and started for user: {}", username);
        Ok(SessionReply::GameStarted {
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use rps_core::RpsGameStatus;

    use crate::{
        domain::mock::{MockGameRepository, MockUserRepository},
        services::user_resolver::UserResolverServiceImpl,
    };

    use super::*;

    fn setup() -> (
        Arc<UserResolverServiceImpl<MockUserRepository>>,
        Arc<MockGameRepository>,
        StartGameUseCaseImpl<UserResolverServiceImpl<MockUserRepository>, MockGameRepository>,
    ) {
        let resolver = Arc::new(UserResolverServiceImpl::new(Arc::new(
            MockUserRepository::default(),
        )));
        let game_repo = Arc::new(MockGameRepository::default());
        let use_case = StartGameUseCaseImpl::new(resolver.clone(), game_repo.clone());
        (resolver, game_repo, use_case)
    }

    #[tokio::test]
    async fn test_start_creates_user_and_game() {
        let (resolver, game_repo, use_case) = setup();

        let reply = use_case.start_game("alice").await.unwrap();
        assert_eq!(
            reply.to_string(),
            "New game started for alice. Make your first move!"
        );

        let user = resolver.find_existing_user("alice").await.unwrap();
        let games = game_repo.games_of(user.user_id);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].status, RpsGameStatus::Started);
    }

    #[tokio::test]
    async fn test_start_twice_keeps_single_game() {
        let (resolver, game_repo, use_case) = setup();

        use_case.start_game("alice").await.unwrap();
        let reply = use_case.start_game("alice").await.unwrap();
        assert_eq!(
            reply.to_string(),
            "A game is already in progress for alice. Make your next move!"
        );

        let user = resolver.find_existing_user("alice").await.unwrap();
        assert_eq!(game_repo.games_of(user.user_id).len(), 1);
    }

    #[tokio::test]
    async fn test_start_save_failure_is_hard_error() {
        let (_, game_repo, use_case) = setup();
        game_repo.set_fail_saves(true);

        assert!(matches!(
            use_case.start_game("alice").await,
            Err(GameplayError::GameSaveFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_start_rejects_empty_username() {
        let (_, _, use_case) = setup();
        assert_eq!(
            use_case.start_game("").await,
            Err(GameplayError::InvalidUsername)
        );
    }
}
