//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;
use mongodb::Client;
use serde_json::Value;

/// `GET /ready`: 200 when MongoDB answers a ping, 503 otherwise.
pub fn router(client: Client) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(client)
}

async fn readiness_check(State(client): State<Client>) -> (StatusCode, Json<Value>) {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = check_health_detailed(&client).await;
        tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
