use crate::{handlers::AppState, models::HealthStatus};
use axum::{extract::State, Json};
use chrono::Utc;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.active_count(),
        uptime_seconds: state.analytics.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
