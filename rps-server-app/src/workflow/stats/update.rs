use std::sync::Arc;

use rps_core::RpsOutcome;
use thiserror::Error;

use crate::domain::{
    UserId,
    stats::{StatsRepository, UserStats},
};

#[async_trait::async_trait]
pub trait UpdateStatsWorkflow {
    /// Records exactly one outcome, creating the user's statistics on first use.
    async fn record_outcome(
        &self,
        user_id: UserId,
        outcome: RpsOutcome,
    ) -> Result<UserStats, UpdateStatsError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UpdateStatsError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub struct UpdateStatsWorkflowImpl<S: StatsRepository> {
    stats_repository: Arc<S>,
}

impl<S: StatsRepository> UpdateStatsWorkflowImpl<S> {
    pub fn new(stats_repository: Arc<S>) -> Self {
        Self { stats_repository }
    }
}

#[async_trait::async_trait]
impl<S: StatsRepository + Send + Sync + 'static> UpdateStatsWorkflow
    for UpdateStatsWorkflowImpl<S>
{
    async fn record_outcome(
        &self,
        user_id: UserId,
        outcome: RpsOutcome,
    ) -> Result<UserStats, UpdateStatsError> {
        let mut stats = self
            .stats_repository
            .get_user_stats(user_id)
            .await
            .map_err(|e| UpdateStatsError::StorageError(e.to_string()))?
            .unwrap_or_else(|| UserStats::new(user_id));

        stats.record(outcome);

        self.stats_repository
            .save_user_stats(&stats)
            .await
            .map_err(|e| UpdateStatsError::StorageError(e.to_string()))?;

        log::info!("Game statistics updated: {:?}", stats);
        Ok(stats)
    }
}
