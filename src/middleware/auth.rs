use crate::{
    handlers::AppState,
    services::sessions::{token_from_cookie_header, AdminSession},
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Page prefixes that require a live admin session.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/users",
    "/analytics",
    "/wallet",
    "/badges",
    "/settings",
    "/logs",
    "/ocr",
    "/matches",
    "/fines",
];

pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// `/login?from=<path>` with the path form-urlencoded.
pub fn login_redirect_target(path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", path)
        .finish();
    format!("/login?{}", query)
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(token_from_cookie_header)
        .map(str::to_string)
}

/// Resolves the session cookie against the session store and gates page
/// routes. A live session is handed to handlers through request extensions.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session: Option<AdminSession> = match session_token(request.headers()) {
        Some(token) => state.sessions.get(&token).await,
        None => None,
    };

    let path = request.uri().path().to_string();

    match session {
        Some(session) => {
            if path == "/login" {
                return Redirect::temporary("/dashboard").into_response();
            }
            request.extensions_mut().insert(session);
        }
        None if is_protected(&path) => {
            tracing::debug!("Unauthenticated request to {}", path);
            return Redirect::temporary(&login_redirect_target(&path)).into_response();
        }
        None => {}
    }

    next.run(request).await
}
