use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Opaque admin session tokens. Entries expire after the configured TTL.
pub struct SessionStore {
    sessions: Cache<String, AdminSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(ttl)
            .build();

        Self { sessions, ttl }
    }

    pub async fn create(&self, email: &str) -> AdminSession {
        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };

        self.sessions
            .insert(session.token.clone(), session.clone())
            .await;
        tracing::debug!("Session created for {}", email);

        session
    }

    pub async fn get(&self, token: &str) -> Option<AdminSession> {
        self.sessions.get(token).await
    }

    pub async fn revoke(&self, token: &str) {
        self.sessions.invalidate(token).await;
    }

    pub fn active_count(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// `Set-Cookie` value carrying a fresh session token.
    pub fn issue_cookie(&self, token: &str, secure: bool) -> String {
        build_cookie(token, self.ttl.as_secs(), secure)
    }

    /// `Set-Cookie` value that expires the session cookie immediately.
    pub fn clear_cookie(&self, secure: bool) -> String {
        build_cookie("", 0, secure)
    }
}

fn build_cookie(value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pulls the session token out of a `Cookie` request header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_cookie_among_others() {
        assert_eq!(
            token_from_cookie_header("theme=dark; admin_session=abc-123; other=1"),
            Some("abc-123")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("admin_session="), None);
    }

    #[test]
    fn cookie_attributes() {
        let store = SessionStore::new(Duration::from_secs(28_800));
        let cookie = store.issue_cookie("tok", false);
        assert_eq!(
            cookie,
            "admin_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=28800"
        );
        assert!(store.clear_cookie(true).ends_with("Max-Age=0; Secure"));
    }

    #[test]
    fn sessions_round_trip_and_revoke() {
        tokio_test::block_on(async {
            let store = SessionStore::new(Duration::from_secs(60));
            let session = store.create("admin@example.com").await;

            let found = store.get(&session.token).await.expect("session is live");
            assert_eq!(found.email, "admin@example.com");

            store.revoke(&session.token).await;
            assert!(store.get(&session.token).await.is_none());
            assert!(store.get("unknown").await.is_none());
        });
    }
}
