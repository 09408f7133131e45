use rps_core::RpsOutcome;

use crate::domain::{RepoError, UserId};

#[async_trait::async_trait]
pub trait StatsRepository {
    async fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserStats>, RepoError>;
    async fn save_user_stats(&self, stats: &UserStats) -> Result<(), RepoError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: UserId,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub quits: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserStats {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            quits: 0,
            created_at: chrono::Utc::now(),
        }
    }

    /// Quits are tracked on their own and do not count as games played.
    pub fn record(&mut self, outcome: RpsOutcome) {
        if outcome.is_round_result() {
            self.games_played += 1;
        }
        match outcome {
            RpsOutcome::Win => self.wins += 1,
            RpsOutcome::Lose => self.losses += 1,
            RpsOutcome::Draw => self.draws += 1,
            RpsOutcome::Quit => self.quits += 1,
        }
    }
}
