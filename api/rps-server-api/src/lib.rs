use axum::response::IntoResponse;
use rps_server_app::workflow::{gameplay::GameplayError, stats::observe::ObserveStatsError};

pub mod http;

pub enum ServiceError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self {
            ServiceError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ServiceError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "message": msg, "status": status.as_u16() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<GameplayError> for ServiceError {
    fn from(value: GameplayError) -> Self {
        let msg = value.to_string();
        match value {
            GameplayError::InvalidUsername => ServiceError::BadRequest(msg),
            GameplayError::UserNotFound(_) | GameplayError::NoActiveGame(_) => {
                ServiceError::NotFound(msg)
            }
            GameplayError::GameSaveFailure(_) | GameplayError::StorageError(_) => {
                log::error!("{}", msg);
                ServiceError::Internal(msg)
            }
        }
    }
}

impl From<ObserveStatsError> for ServiceError {
    fn from(value: ObserveStatsError) -> Self {
        let msg = value.to_string();
        match value {
            ObserveStatsError::InvalidUsername => ServiceError::BadRequest(msg),
            ObserveStatsError::UserNotFound(_) | ObserveStatsError::StatisticsNotFound(_) => {
                ServiceError::NotFound(msg)
            }
            ObserveStatsError::StorageError(_) => {
                log::error!("{}", msg);
                ServiceError::Internal(msg)
            }
        }
    }
}
