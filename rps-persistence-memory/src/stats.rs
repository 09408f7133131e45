use dashmap::DashMap;
use rps_server_app::domain::{
    RepoError, UserId,
    stats::{StatsRepository, UserStats},
};

pub struct StatsRepositoryImpl {
    stats: DashMap<UserId, UserStats>,
}

impl StatsRepositoryImpl {
    pub fn new() -> Self {
        Self {
            stats: DashMap::new(),
        }
    }
}

impl Default for StatsRepositoryImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StatsRepository for StatsRepositoryImpl {
    async fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserStats>, RepoError> {
        Ok(self.stats.get(&user_id).map(|entry| entry.clone()))
    }

    async fn save_user_stats(&self, stats: &UserStats) -> Result<(), RepoError> {
        self.stats.insert(stats.user_id, stats.clone());
        Ok(())
    }
}
