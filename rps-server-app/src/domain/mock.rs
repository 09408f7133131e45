use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{
    GameId, RepoCreateError, RepoError, UserId,
    game::{Game, GameRepository},
    stats::{StatsRepository, UserStats},
    user::{User, UserRepository},
};

#[derive(Default)]
pub struct MockUserRepository {
    users: DashMap<String, User>,
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(username).map(|entry| entry.clone()))
    }

    async fn create_user(&self, user: User) -> Result<(), RepoCreateError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(RepoCreateError::Conflict),
            Entry::Vacant(entry) => {
                entry.insert(user);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct MockGameRepository {
    games: DashMap<GameId, Game>,
    pub fail_saves: AtomicBool,
}

impl MockGameRepository {
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn games_of(&self, user_id: UserId) -> Vec<Game> {
        self.games
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl GameRepository for MockGameRepository {
    async fn save_game(&self, game: &Game) -> Result<(), RepoError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepoError::StorageError("disk full".to_string()));
        }
        self.games.insert(game.game_id, game.clone());
        Ok(())
    }

    async fn get_active_game(&self, user_id: UserId) -> Result<Option<Game>, RepoError> {
        Ok(self
            .games
            .iter()
            .find(|entry| entry.user_id == user_id && entry.status.is_active())
            .map(|entry| entry.clone()))
    }

    async fn get_finished_games(&self, user_id: UserId) -> Result<Vec<Game>, RepoError> {
        Ok(self
            .games_of(user_id)
            .into_iter()
            .filter(|game| game.status.is_terminal())
            .collect())
    }
}

#[derive(Default)]
pub struct MockStatsRepository {
    stats: DashMap<UserId, UserStats>,
    pub fail_saves: AtomicBool,
}

impl MockStatsRepository {
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl StatsRepository for MockStatsRepository {
    async fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserStats>, RepoError> {
        Ok(self.stats.get(&user_id).map(|entry| entry.clone()))
    }

    async fn save_user_stats(&self, stats: &UserStats) -> Result<(), RepoError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepoError::StorageError("stats table locked".to_string()));
        }
        self.stats.insert(stats.user_id, stats.clone());
        Ok(())
    }
}
