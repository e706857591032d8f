//! API routes module

pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes.
/// Note: these are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .nest("/product", products::router(state))
}

/// Create MongoDB indexes the domains rely on.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await
}
