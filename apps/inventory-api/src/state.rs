//! Shared application state.

use axum_helpers::TokenService;
use mongodb::{Client, Database};

/// Cloned into every router; all fields are cheap handle clones.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the driver's connection pool
    pub mongo_client: Client,
    pub db: Database,
    pub tokens: TokenService,
}
