use crate::{
    models::{DashboardSummary, MatchStatus, OcrStatus, SessionStatus, TransactionStatus},
    services::store::AdminStore,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Process-level counters plus the headline dashboard numbers.
pub struct Analytics {
    successful_logins: AtomicU64,
    failed_logins: AtomicU64,
    start_time: Instant,
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            successful_logins: AtomicU64::new(0),
            failed_logins: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_login(&self, success: bool) {
        if success {
            self.successful_logins.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed_logins.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn login_counts(&self) -> (u64, u64) {
        (
            self.successful_logins.load(Ordering::SeqCst),
            self.failed_logins.load(Ordering::SeqCst),
        )
    }

    pub async fn dashboard_summary(&self, store: &AdminStore) -> DashboardSummary {
        let open_fraud_alerts = store.visible_alerts().await.len();
        let (successful_logins, failed_logins) = self.login_counts();

        let state = store.state.read().await;
        let data = &state.data;

        let sessions_completed = data
            .sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .count();
        let focus_minutes: f64 = data
            .sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .map(|s| s.duration_minutes())
            .sum();
        let total_deposits: f64 = data
            .transactions
            .iter()
            .filter(|t| t.is_deposit() && t.status == TransactionStatus::Success)
            .map(|t| t.amount)
            .sum();

        DashboardSummary {
            total_users: data.users.len(),
            active_users: data.users.iter().filter(|u| u.is_effectively_active()).count(),
            sessions_completed,
            sessions_failed_or_abandoned: data.sessions.len() - sessions_completed,
            total_focus_hours: (focus_minutes / 60.0 * 10.0).round() / 10.0,
            total_deposits,
            open_fraud_alerts,
            pending_ocr_reviews: data
                .ocr_submissions
                .iter()
                .filter(|s| matches!(s.status, OcrStatus::Pending | OcrStatus::Review))
                .count(),
            pending_partner_matches: data
                .partner_matches
                .iter()
                .filter(|m| m.status == MatchStatus::Pending)
                .count(),
            successful_logins,
            failed_logins,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}
