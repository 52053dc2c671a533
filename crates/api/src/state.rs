//! Shared application state for the Axum API server.

use mandi_common::config::AppConfig;
use mandi_engine::rto::RtoClient;
use redis::aio::ConnectionManager;
use sqlx::PgPool;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub redis: ConnectionManager,
    pub config: AppConfig,
    pub rto: RtoClient,
}

impl AppState {
    pub fn new(pool: PgPool, redis: ConnectionManager, config: AppConfig) -> Self {
        let rto = RtoClient::from_config(&config);
        Self {
            pool,
            redis,
            config,
            rto,
        }
    }
}
