use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    store: &'static str,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let status = match state.todos.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "health check failed to reach the store");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let health_data = HealthData { status: status.as_u16(), store: state.todos.store_kind() };
    (status, Json(health_data))
}
