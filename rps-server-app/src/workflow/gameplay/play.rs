use std::sync::Arc;

use rps_core::{RpsGameStatus, RpsMove, RpsOutcome};

use crate::{
    domain::{
        game::{Game, GameRepository, GameService, RoundError},
        user::User,
    },
    services::user_resolver::UserResolverService,
    workflow::{
        gameplay::{GameplayError, SessionReply, load_active_game, record_outcome},
        stats::update::UpdateStatsWorkflow,
    },
};

#[async_trait::async_trait]
pub trait PlayMoveUseCase {
    /// `None` means the player quits the running game.
    async fn play(
        &self,
        player_move: Option<RpsMove>,
        username: &str,
    ) -> Result<SessionReply, GameplayError>;
}

enum PlayFailure {
    InvalidMove,
    SaveFailed(String),
    Unexpected(String),
}

pub struct PlayMoveUseCaseImpl<
    U: UserResolverService,
    G: GameRepository,
    GS: GameService,
    S: UpdateStatsWorkflow,
> {
    user_resolver: Arc<U>,
    game_repository: Arc<G>,
    game_service: Arc<GS>,
    update_stats_workflow: Arc<S>,
}

impl<U: UserResolverService, G: GameRepository, GS: GameService, S: UpdateStatsWorkflow>
    PlayMoveUseCaseImpl<U, G, GS, S>
{
    pub fn new(
        user_resolver: Arc<U>,
        game_repository: Arc<G>,
        game_service: Arc<GS>,
        update_stats_workflow: Arc<S>,
    ) -> Self {
        Self {
            user_resolver,
            game_repository,
            game_service,
            update_stats_workflow,
        }
    }
}

impl<
    U: UserResolverService,
    G: GameRepository + Send + Sync,
    GS: GameService,
    S: UpdateStatsWorkflow + Send + Sync,
> PlayMoveUseCaseImpl<U, G, GS, S>
{
    async fn quit(&self, user: &User, mut game: Game) -> Result<SessionReply, PlayFailure> {
        log::warn!("Player {} quit the game.", user.username);
        game.terminate(chrono::Utc::now());
        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| PlayFailure::SaveFailed(e.to_string()))?;

        record_outcome(&*self.update_stats_workflow, user, RpsOutcome::Quit).await;
        Ok(SessionReply::PlayerQuit)
    }

    async fn play_round(
        &self,
        user: &User,
        player_move: RpsMove,
    ) -> Result<SessionReply, PlayFailure> {
        let round = self
            .game_service
            .play_round(player_move)
            .map_err(|e| match e {
                RoundError::InvalidMove => PlayFailure::InvalidMove,
                RoundError::UndefinedCounter(e) => PlayFailure::Unexpected(e.to_string()),
            })?;
        log::info!(
            "Predicted next move for {}: {}. Computer move: {}. Game result: {}",
            user.username,
            round.predicted_move,
            round.computer_move,
            round.outcome
        );

        let finished = Game::completed_round(user.user_id, &round, chrono::Utc::now());
        self.game_repository
            .save_game(&finished)
            .await
            .map_err(|e| PlayFailure::SaveFailed(e.to_string()))?;
        log::debug!(
            "Game data saved: Player move: {}, Computer move: {}, Result: {}",
            round.player_move,
            round.computer_move,
            round.outcome
        );

        record_outcome(&*self.update_stats_workflow, user, round.outcome).await;
        Ok(SessionReply::RoundPlayed {
            predicted_move: round.predicted_move,
            computer_move: round.computer_move,
            outcome: round.outcome,
        })
    }
}

#[async_trait::async_trait]
impl<
    U: UserResolverService + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    GS: GameService + Send + Sync + 'static,
    S: UpdateStatsWorkflow + Send + Sync + 'static,
> PlayMoveUseCase for PlayMoveUseCaseImpl<U, G, GS, S>
{
    async fn play(
        &self,
        player_move: Option<RpsMove>,
        username: &str,
    ) -> Result<SessionReply, GameplayError> {
        let user = self.user_resolver.find_existing_user(username).await?;
        let game = load_active_game(&*self.game_repository, &user).await?;

        if game.status != RpsGameStatus::Started {
            return Ok(SessionReply::GameNotStarted);
        }

        let result = match player_move {
            None => self.quit(&user, game).await,
            Some(player_move) => self.play_round(&user, player_move).await,
        };

        Ok(match result {
            Ok(reply) => reply,
            Err(PlayFailure::InvalidMove) => {
                log::warn!("Player {} made an undefined move.", username);
                SessionReply::InvalidMove
            }
            Err(PlayFailure::SaveFailed(e)) => {
                log::error!("Error saving game data: {}", e);
                SessionReply::SaveFailed
            }
            Err(PlayFailure::Unexpected(detail)) => {
                log::error!("Unexpected error while playing: {}", detail);
                SessionReply::UnexpectedError { detail }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use rps_core::MoveCounts;

    use crate::{
        domain::{
            game::{GameServiceImpl, Round},
            mock::{MockGameRepository, MockStatsRepository, MockUserRepository},
            stats::StatsRepository,
        },
        services::user_resolver::UserResolverServiceImpl,
        workflow::stats::update::UpdateStatsWorkflowImpl,
    };

    use super::*;

    type Resolver = UserResolverServiceImpl<MockUserRepository>;

    struct Harness<GS: GameService> {
        resolver: Arc<Resolver>,
        game_repo: Arc<MockGameRepository>,
        stats_repo: Arc<MockStatsRepository>,
        use_case: PlayMoveUseCaseImpl<
            Resolver,
            MockGameRepository,
            GS,
            UpdateStatsWorkflowImpl<MockStatsRepository>,
        >,
    }

    impl<GS: GameService> Harness<GS> {
        fn new(game_service: GS) -> Self {
            let resolver = Arc::new(UserResolverServiceImpl::new(Arc::new(
                MockUserRepository::default(),
            )));
            let game_repo = Arc::new(MockGameRepository::default());
            let stats_repo = Arc::new(MockStatsRepository::default());
            let use_case = PlayMoveUseCaseImpl::new(
                resolver.clone(),
                game_repo.clone(),
                Arc::new(game_service),
                Arc::new(UpdateStatsWorkflowImpl::new(stats_repo.clone())),
            );
            Self {
                resolver,
                game_repo,
                stats_repo,
                use_case,
            }
        }

        async fn started_user(&self, username: &str) -> User {
            let user = self.resolver.find_or_create_user(username).await.unwrap();
            self.game_repo
                .save_game(&Game::start(user.user_id, chrono::Utc::now()))
                .await
                .unwrap();
            user
        }
    }

    struct BrokenPredictor;

    impl GameService for BrokenPredictor {
        fn play_round(&self, _player_move: RpsMove) -> Result<Round, RoundError> {
            Err(RpsMove::Undefined.counter().unwrap_err().into())
        }

        fn move_counts(&self) -> MoveCounts {
            MoveCounts::default()
        }
    }

    #[tokio::test]
    async fn test_first_round_against_cold_predictor() {
        let harness = Harness::new(GameServiceImpl::new());
        let user = harness.started_user("alice").await;

        let reply = harness
            .use_case
            .play(Some(RpsMove::Rock), "alice")
            .await
            .unwrap();
        assert_eq!(
            reply.to_string(),
            "Computer predicted ROCK and chose PAPER. You LOSE!"
        );

        let games = harness.game_repo.games_of(user.user_id);
        assert_eq!(games.len(), 2);
        let completed = games
            .iter()
            .find(|game| game.status == RpsGameStatus::Completed)
            .unwrap();
        assert_eq!(completed.player_move, RpsMove::Rock);
        assert_eq!(completed.computer_move, RpsMove::Paper);
        assert_eq!(completed.outcome, Some(RpsOutcome::Lose));

        // the session itself stays open for the next round
        assert!(
            games
                .iter()
                .any(|game| game.status == RpsGameStatus::Started)
        );

        let stats = harness
            .stats_repo
            .get_user_stats(user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.losses, 1);
    }

    #[tokio::test]
    async fn test_quit_terminates_and_counts_quit() {
        let harness = Harness::new(GameServiceImpl::new());
        let user = harness.started_user("bob").await;

        let reply = harness.use_case.play(None, "bob").await.unwrap();
        assert_eq!(reply.to_string(), "Game terminated. Player has quit.");

        let games = harness.game_repo.games_of(user.user_id);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].status, RpsGameStatus::Terminated);
        assert_eq!(games[0].outcome, Some(RpsOutcome::Quit));

        let stats = harness
            .stats_repo
            .get_user_stats(user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.quits, 1);
        assert_eq!(stats.games_played, 0);

        assert_eq!(
            harness.use_case.play(Some(RpsMove::Rock), "bob").await,
            Err(GameplayError::NoActiveGame("bob".to_string()))
        );
    }

    #[tokio::test]
    async fn test_undefined_move_is_soft_rejection() {
        let harness = Harness::new(GameServiceImpl::new());
        let user = harness.started_user("carol").await;

        let reply = harness
            .use_case
            .play(Some(RpsMove::Undefined), "carol")
            .await
            .unwrap();
        assert_eq!(reply, SessionReply::InvalidMove);
        assert_eq!(
            reply.to_string(),
            "Invalid move. Choose rock, paper, or scissors."
        );
        assert_eq!(harness.game_repo.games_of(user.user_id).len(), 1);
        assert!(
            harness
                .stats_repo
                .get_user_stats(user.user_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_paused_game_cannot_be_played() {
        let harness = Harness::new(GameServiceImpl::new());
        let user = harness.resolver.find_or_create_user("dave").await.unwrap();
        let mut game = Game::start(user.user_id, chrono::Utc::now());
        game.pause();
        harness.game_repo.save_game(&game).await.unwrap();

        let reply = harness
            .use_case
            .play(Some(RpsMove::Paper), "dave")
            .await
            .unwrap();
        assert_eq!(
            reply.to_string(),
            "The game is currently not started or paused. Start or resume the game to play."
        );
    }

    #[tokio::test]
    async fn test_save_failure_becomes_message() {
        let harness = Harness::new(GameServiceImpl::new());
        harness.started_user("erin").await;
        harness.game_repo.set_fail_saves(true);

        let reply = harness
            .use_case
            .play(Some(RpsMove::Scissors), "erin")
            .await
            .unwrap();
        assert_eq!(
            reply.to_string(),
            "An error occurred while saving the game data."
        );

        let reply = harness.use_case.play(None, "erin").await.unwrap();
        assert_eq!(reply, SessionReply::SaveFailed);
    }

    #[tokio::test]
    async fn test_stats_failure_is_swallowed() {
        let harness = Harness::new(GameServiceImpl::new());
        harness.started_user("frank").await;
        harness.stats_repo.set_fail_saves(true);

        let reply = harness
            .use_case
            .play(Some(RpsMove::Paper), "frank")
            .await
            .unwrap();
        assert!(matches!(reply, SessionReply::RoundPlayed { .. }));
    }

    #[tokio::test]
    async fn test_unexpected_failure_becomes_message() {
        let harness = Harness::new(BrokenPredictor);
        harness.started_user("grace").await;

        let reply = harness
            .use_case
            .play(Some(RpsMove::Rock), "grace")
            .await
            .unwrap();
        assert_eq!(
            reply.to_string(),
            "An unexpected error occurred: Cannot get counter move for undefined move."
        );
    }

    #[tokio::test]
    async fn test_unknown_user_and_missing_game_are_hard_errors() {
        let harness = Harness::new(GameServiceImpl::new());
        assert_eq!(
            harness.use_case.play(Some(RpsMove::Rock), "nobody").await,
            Err(GameplayError::UserNotFound("nobody".to_string()))
        );

        harness.resolver.find_or_create_user("henry").await.unwrap();
        assert_eq!(
            harness.use_case.play(Some(RpsMove::Rock), "henry").await,
            Err(GameplayError::NoActiveGame("henry".to_string()))
        );
    }
}
