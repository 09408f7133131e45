use axum::{
    Json,
    extract::{Query, State},
};
use rps_core::RpsMove;
use rps_server_app::workflow::gameplay::history::GameSummary;
use validator::Validate;

use crate::{
    ServiceError,
    http::{AppState, UsernameQuery, validated},
};

#[derive(serde::Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayQuery {
    #[validate(length(min = 1))]
    username: String,
    player_move: Option<String>,
}

/// An absent or blank move means the player quits.
fn parse_player_move(raw: Option<&str>) -> Result<Option<RpsMove>, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e| ServiceError::BadRequest(format!("Invalid player move: {}", e))),
    }
}

pub async fn start(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let reply = app_state
        .app
        .game_start_use_case
        .start_game(&query.username)
        .await?;
    Ok(reply.to_string())
}

pub async fn play(
    State(app_state): State<AppState>,
    Query(query): Query<PlayQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let player_move = parse_player_move(query.player_move.as_deref())?;
    let reply = app_state
        .app
        .game_play_use_case
        .play(player_move, &query.username)
        .await?;
    Ok(reply.to_string())
}

pub async fn pause(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let reply = app_state
        .app
        .game_control_use_case
        .pause_game(&query.username)
        .await?;
    Ok(reply.to_string())
}

pub async fn resume(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let reply = app_state
        .app
        .game_control_use_case
        .resume_game(&query.username)
        .await?;
    Ok(reply.to_string())
}

pub async fn terminate(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let reply = app_state
        .app
        .game_control_use_case
        .terminate_game(&query.username)
        .await?;
    Ok(reply.to_string())
}

pub async fn history(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<Vec<JsonGameSummary>>, ServiceError> {
    let query = validated(query)?;
    let games = app_state
        .app
        .game_history_use_case
        .get_history(&query.username)
        .await?;
    Ok(Json(games.iter().map(JsonGameSummary::from).collect()))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonGameSummary {
    player_move: String,
    computer_move: String,
    outcome: Option<String>,
    status: String,
    played_at: String,
}

impl JsonGameSummary {
    fn from(game: &GameSummary) -> Self {
        Self {
            player_move: game.player_move.to_string(),
            computer_move: game.computer_move.to_string(),
            outcome: game.outcome.map(|outcome| outcome.to_string()),
            status: game.status.to_string(),
            played_at: game.played_at.to_rfc3339(),
        }
    }
}
