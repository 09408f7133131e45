use axum::extract::{Query, State};

use crate::{
    ServiceError,
    http::{AppState, UsernameQuery, validated},
};

pub async fn observe(
    State(app_state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<String, ServiceError> {
    let query = validated(query)?;
    let stats = app_state
        .app
        .stats_observe_use_case
        .observe_stats(&query.username)
        .await?;
    Ok(stats.to_string())
}
