use std::sync::Arc;

use crate::{
    domain::{
        game::{GameRepository, GameServiceImpl},
        stats::StatsRepository,
        user::UserRepository,
    },
    services::user_resolver::UserResolverServiceImpl,
    workflow::{
        gameplay::{
            control::{GameControlUseCase, GameControlUseCaseImpl},
            history::{GameHistoryUseCase, GameHistoryUseCaseImpl},
            play::{PlayMoveUseCase, PlayMoveUseCaseImpl},
            start::{StartGameUseCase, StartGameUseCaseImpl},
        },
        stats::{
            observe::{ObserveStatsUseCase, ObserveStatsUseCaseImpl},
            update::UpdateStatsWorkflowImpl,
        },
    },
};

pub mod domain;
pub mod services;
pub mod workflow;

pub struct Application {
    pub game_start_use_case: Box<dyn StartGameUseCase + Send + Sync + 'static>,
    pub game_play_use_case: Box<dyn PlayMoveUseCase + Send + Sync + 'static>,
    pub game_control_use_case: Box<dyn GameControlUseCase + Send + Sync + 'static>,
    pub game_history_use_case: Box<dyn GameHistoryUseCase + Send + Sync + 'static>,

    pub stats_observe_use_case: Box<dyn ObserveStatsUseCase + Send + Sync + 'static>,
}

/// Wires the use cases on top of the given repositories.
///
/// The move history used for predictions lives in the returned application
/// and is shared by every user of it.
pub fn build_application<
    U: UserRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    S: StatsRepository + Send + Sync + 'static,
>(
    user_repository: Arc<U>,
    game_repository: Arc<G>,
    stats_repository: Arc<S>,
) -> Application {
    let game_service = Arc::new(GameServiceImpl::new());
    let user_resolver_service = Arc::new(UserResolverServiceImpl::new(user_repository.clone()));
    let update_stats_workflow = Arc::new(UpdateStatsWorkflowImpl::new(stats_repository.clone()));

    Application {
        game_start_use_case: Box::new(StartGameUseCaseImpl::new(
            user_resolver_service.clone(),
            game_repository.clone(),
        )),
        game_play_use_case: Box::new(PlayMoveUseCaseImpl::new(
            user_resolver_service.clone(),
            game_repository.clone(),
            game_service.clone(),
            update_stats_workflow.clone(),
        )),
        game_control_use_case: Box::new(GameControlUseCaseImpl::new(
            user_resolver_service.clone(),
            game_repository.clone(),
            update_stats_workflow.clone(),
        )),
        game_history_use_case: Box::new(GameHistoryUseCaseImpl::new(
            user_resolver_service.clone(),
            game_repository.clone(),
        )),

        stats_observe_use_case: Box::new(ObserveStatsUseCaseImpl::new(
            user_resolver_service,
            stats_repository.clone(),
        )),
    }
}
