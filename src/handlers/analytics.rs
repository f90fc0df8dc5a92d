use crate::{handlers::AppState, models::*, services::metrics};
use axum::{extract::State, Json};

const RECENT_SESSION_LIMIT: usize = 20;

pub async fn admin_analytics(State(state): State<AppState>) -> Json<ApiResponse<AdminAnalyticsPage>> {
    let events = state.store.analytics_events().await;
    Json(ApiResponse::ok(metrics::admin_analytics(&events)))
}

pub async fn session_analytics(
    State(state): State<AppState>,
) -> Json<ApiResponse<SessionAnalyticsPage>> {
    let sessions = state.store.sessions().await;
    Json(ApiResponse::ok(metrics::session_analytics(
        &sessions,
        RECENT_SESSION_LIMIT,
    )))
}

pub async fn subject_analytics(
    State(state): State<AppState>,
) -> Json<ApiResponse<SubjectAnalyticsPage>> {
    let subjects = state.store.subjects().await;
    Json(ApiResponse::ok(metrics::subject_analytics(&subjects)))
}
