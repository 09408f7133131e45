use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use rps_server_app::Application;
use validator::Validate;

use crate::ServiceError;

mod game;
mod statistics;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

pub fn router(app: Arc<Application>) -> Router {
    let router: Router<AppState> = Router::new().nest(
        "/api",
        Router::new()
            .route("/rps/start", post(game::start))
            .route("/rps/play", post(game::play))
            .route("/rps/pause", post(game::pause))
            .route("/rps/resume", post(game::resume))
            .route("/rps/terminate", post(game::terminate))
            .route("/rps/history", get(game::history))
            .route("/statistics/observe", get(statistics::observe)),
    );
    router.with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    port: u16,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    info!("API server listening on port {}", port);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}

#[derive(serde::Deserialize, Validate)]
pub struct UsernameQuery {
    #[validate(length(min = 1))]
    pub username: String,
}

fn validated<T: Validate>(query: T) -> Result<T, ServiceError> {
    query
        .validate()
        .map_err(|e| ServiceError::BadRequest(format!("Invalid request: {}", e)))?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use rps_persistence_memory::{
        games::GameRepositoryImpl, stats::StatsRepositoryImpl, users::UserRepositoryImpl,
    };
    use rps_server_app::build_application;
    use tower::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        router(Arc::new(build_application(
            Arc::new(UserRepositoryImpl::new()),
            Arc::new(GameRepositoryImpl::new()),
            Arc::new(StatsRepositoryImpl::new()),
        )))
    }

    async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_play_session_over_http() {
        let router = test_router();

        let (status, body) = send(&router, "POST", "/api/rps/start?username=alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "New game started for alice. Make your first move!");

        let (status, body) = send(
            &router,
            "POST",
            "/api/rps/play?username=alice&playerMove=rock",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Computer predicted ROCK and chose PAPER. You LOSE!");

        let (_, body) = send(&router, "POST", "/api/rps/play?username=alice").await;
        assert_eq!(body, "Game terminated. Player has quit.");

        let (status, body) = send(&router, "GET", "/api/statistics/observe?username=alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: alice - Wins: 0, Losses: 1, Draws: 0, Quits: 1");

        let (status, body) = send(&router, "GET", "/api/rps/history?username=alice").await;
        assert_eq!(status, StatusCode::OK);
        let history: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(history.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_hard_errors_map_to_status_codes() {
        let router = test_router();

        let (status, body) = send(&router, "POST", "/api/rps/pause?username=bob").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["status"], 404);
        assert_eq!(error["message"], "User not found with username: bob");

        send(&router, "POST", "/api/rps/start?username=bob").await;
        let (status, _) = send(&router, "GET", "/api/statistics/observe?username=bob").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "POST", "/api/rps/start?username=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &router,
            "POST",
            "/api/rps/play?username=bob&playerMove=lizard",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["status"], 400);
    }

    #[tokio::test]
    async fn test_undefined_move_gets_soft_reply() {
        let router = test_router();
        send(&router, "POST", "/api/rps/start?username=carol").await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/rps/play?username=carol&playerMove=UNDEFINED",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid move. Choose rock, paper, or scissors.");
    }
}
