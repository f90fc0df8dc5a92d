use crate::{
    error::AdminError,
    handlers::AppState,
    middleware::auth::session_token,
    models::{LoginPage, SuccessResponse},
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// First address in `x-forwarded-for`, then `x-real-ip`, else "unknown".
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded.or(real_ip).unwrap_or("unknown").to_string()
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AdminError> {
    let ip = client_ip(&headers);

    // Anything other than two string fields counts as bad credentials.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let email = payload.get("email").and_then(Value::as_str);
    let password = payload.get("password").and_then(Value::as_str);

    let (Some(email), Some(password)) = (email, password) else {
        state.analytics.record_login(false);
        tracing::warn!(ip = %ip, "Admin login rejected: malformed credentials");
        return Err(AdminError::InvalidCredentials);
    };

    if email != state.config.admin_email || password != state.config.admin_password {
        state.analytics.record_login(false);
        tracing::warn!(email = %email, ip = %ip, "Admin login failed");
        return Err(AdminError::InvalidCredentials);
    }

    let session = state.sessions.create(email).await;
    state.analytics.record_login(true);
    tracing::info!(email = %email, ip = %ip, "Admin login succeeded");

    let cookie = state
        .sessions
        .issue_cookie(&session.token, state.config.secure_cookies());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Some(session) = state.sessions.get(&token).await {
            tracing::info!(email = %session.email, "Admin logged out");
        }
        state.sessions.revoke(&token).await;
    }

    let cookie = state.sessions.clear_cookie(state.config.secure_cookies());
    ([(header::SET_COOKIE, cookie)], Redirect::temporary("/login")).into_response()
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        page: "login".to_string(),
        from: query.from,
    })
}
