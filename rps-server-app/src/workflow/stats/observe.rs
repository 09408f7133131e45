use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    domain::stats::{StatsRepository, UserStats},
    services::user_resolver::{ResolveUserError, UserResolverService},
};

#[async_trait::async_trait]
pub trait ObserveStatsUseCase {
    async fn observe_stats(&self, username: &str) -> Result<StatsView, ObserveStatsError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObserveStatsError {
    #[error("Username must not be empty")]
    InvalidUsername,
    #[error("User not found with username: {0}")]
    UserNotFound(String),
    #[error("No statistics found for user: {0}")]
    StatisticsNotFound(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<ResolveUserError> for ObserveStatsError {
    fn from(value: ResolveUserError) -> Self {
        match value {
            ResolveUserError::InvalidUsername => ObserveStatsError::InvalidUsername,
            ResolveUserError::NotFound(username) => ObserveStatsError::UserNotFound(username),
            ResolveUserError::StorageError(e) => ObserveStatsError::StorageError(e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsView {
    pub username: String,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub quits: u64,
}

impl StatsView {
    pub fn from(username: &str, stats: UserStats) -> Self {
        Self {
            username: username.to_string(),
            games_played: stats.games_played,
            wins: stats.wins,
            losses: stats.losses,
            draws: stats.draws,
            quits: stats.quits,
        }
    }
}

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {} - Wins: {}, Losses: {}, Draws: {}, Quits: {}",
            self.username, self.wins, self.losses, self.draws, self.quits
        )
    }
}

pub struct ObserveStatsUseCaseImpl<U: UserResolverService, S: StatsRepository> {
    user_resolver: Arc<U>,
    stats_repository: Arc<S>,
}

impl<U: UserResolverService, S: StatsRepository> ObserveStatsUseCaseImpl<U, S> {
    pub fn new(user_resolver: Arc<U>, stats_repository: Arc<S>) -> Self {
        Self {
            user_resolver,
            stats_repository,
        }
    }
}

#[async_trait::async_trait]
impl<U: UserResolverService + Send + Sync + 'static, S: StatsRepository + Send + Sync + 'static>
    ObserveStatsUseCase for ObserveStatsUseCaseImpl<U, S>
{
    async fn observe_stats(&self, username: &str) -> Result<StatsView, ObserveStatsError> {
        let user = self.user_resolver.find_existing_user(username).await?;

        let stats = match self.stats_repository.get_user_stats(user.user_id).await {
            Ok(Some(stats)) => stats,
            Ok(None) => return Err(ObserveStatsError::StatisticsNotFound(user.username)),
            Err(e) => {
                log::error!("Failed to retrieve statistics for {}: {}", username, e);
                return Err(ObserveStatsError::StorageError(e.to_string()));
            }
        };

        Ok(StatsView::from(&user.username, stats))
    }
}
