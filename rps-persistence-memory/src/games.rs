use dashmap::DashMap;
use rps_server_app::domain::{
    GameId, RepoError, UserId,
    game::{Game, GameRepository},
};

pub struct GameRepositoryImpl {
    games: DashMap<GameId, Game>,
}

impl GameRepositoryImpl {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }
}

impl Default for GameRepositoryImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GameRepository for GameRepositoryImpl {
    async fn save_game(&self, game: &Game) -> Result<(), RepoError> {
        self.games.insert(game.game_id, game.clone());
        Ok(())
    }

    async fn get_active_game(&self, user_id: UserId) -> Result<Option<Game>, RepoError> {
        Ok(self
            .games
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.status.is_active())
            .max_by_key(|entry| entry.created_at)
            .map(|entry| entry.clone()))
    }

    async fn get_finished_games(&self, user_id: UserId) -> Result<Vec<Game>, RepoError> {
        Ok(self
            .games
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.status.is_terminal())
            .map(|entry| entry.clone())
            .collect())
    }
}
