use crate::{handlers::*, middleware::session_guard};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Unguarded admin API
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route(
            "/api/admin/systemconfig",
            get(get_system_config).put(put_system_config),
        )
        .route("/login", get(login_page))
        .route("/health", get(health_check))
        // Dashboard pages
        .route("/dashboard", get(dashboard))
        .route("/dashboard/ws", get(dashboard_ws))
        .route("/wallet", get(wallet_page))
        .route("/wallet/alerts", get(list_alerts))
        .route("/wallet/alerts/:id/resolve", post(resolve_alert))
        .route("/wallet/credits", post(create_credit))
        .route("/wallet/bulk", post(bulk_action))
        .route("/wallet/transactions/:id/reconcile", post(reconcile_transaction))
        .route("/wallet/transactions/:id/retry", post(retry_verification))
        .route("/users", get(list_users))
        .route("/users/:id", get(user_detail))
        .route("/users/:id/disable", post(toggle_disabled))
        .route("/users/:id/avatar/reset", post(reset_avatar))
        .route("/users/:id/wallet", post(adjust_wallet))
        .route("/users/:id/notes", post(add_note))
        .route("/ocr", get(list_ocr))
        .route("/ocr/:id/status", post(update_ocr_status))
        .route("/ocr/:id/correction", post(correct_ocr))
        .route("/matches", get(list_matches))
        .route("/matches/:id/status", post(update_match_status))
        .route("/badges", get(badges_page))
        .route("/badges/corrections", post(create_badge_correction))
        .route("/fines", get(fines_page))
        .route("/logs", get(logs_page))
        .route("/analytics/admin", get(admin_analytics))
        .route("/analytics/sessions", get(session_analytics))
        .route("/analytics/subjects", get(subject_analytics))
        .route("/settings", get(settings_page))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_guard,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
