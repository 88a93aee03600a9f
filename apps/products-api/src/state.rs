//! Application state management

use redis::aio::ConnectionManager;
use sea_orm::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    /// Present only when products are cached in Redis
    pub redis: Option<ConnectionManager>,
}
