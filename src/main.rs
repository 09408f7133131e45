use std::sync::Arc;

use log::info;
use rps_server_app::{Application, build_application};

use crate::config::ServerConfig;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

async fn create_application(config: &ServerConfig) -> Application {
    match &config.database_url {
        Some(url) => {
            info!("Using sqlite storage at {}", url);
            let pool = rps_persistence_sqlite::create_db_pool(url, 5)
                .await
                .expect("Failed to open database");
            build_application(
                Arc::new(rps_persistence_sqlite::users::SqliteUserRepository::new(
                    pool.clone(),
                )),
                Arc::new(rps_persistence_sqlite::games::SqliteGameRepository::new(
                    pool.clone(),
                )),
                Arc::new(rps_persistence_sqlite::stats::SqliteStatsRepository::new(
                    pool,
                )),
            )
        }
        None => {
            info!("RPS_DATABASE_URL not set, using in-memory storage");
            build_application(
                Arc::new(rps_persistence_memory::users::UserRepositoryImpl::new()),
                Arc::new(rps_persistence_memory::games::GameRepositoryImpl::new()),
                Arc::new(rps_persistence_memory::stats::StatsRepositoryImpl::new()),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine when the variables come from the environment.
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    logs::init_logger(&config.log).expect("Failed to initialize logger");

    let app = Arc::new(create_application(&config).await);

    info!("Starting application");

    if let Err(e) = rps_server_api::http::run(app, config.http_port, shutdown_signal()).await {
        log::error!("HTTP API failed: {}", e);
    }
}
