use crate::{
    error::{AdminError, AdminResult},
    models::*,
    services::fraud::{self, FraudRules},
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::RwLock;

/// Everything the dashboard reads, as loaded from the seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub users: Vec<AdminUser>,
    pub transactions: Vec<WalletTransaction>,
    pub sessions: Vec<SessionEvent>,
    pub ocr_submissions: Vec<OcrSubmission>,
    pub partner_matches: Vec<PartnerMatch>,
    pub badge_events: Vec<UserBadgeEvent>,
    pub subjects: Vec<SubjectSummary>,
    pub analytics_events: Vec<AnalyticsEvent>,
    pub api_errors: Vec<ApiErrorLog>,
    pub payment_failures: Vec<PaymentFailureLog>,
    pub session_crashes: Vec<SessionCrashLog>,
    pub admin_actions: Vec<AdminActionLog>,
}

impl Dataset {
    pub fn from_json(raw: &str) -> AdminResult<Self> {
        serde_json::from_str(raw).map_err(|e| AdminError::Seed(e.to_string()))
    }

    pub fn load(path: &Path) -> AdminResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Seed(format!("{}: {}", path.display(), e)))?;
        let dataset = Self::from_json(&raw)?;

        tracing::info!(
            users = dataset.users.len(),
            transactions = dataset.transactions.len(),
            sessions = dataset.sessions.len(),
            ocr_submissions = dataset.ocr_submissions.len(),
            "Seed data loaded from {}",
            path.display()
        );

        Ok(dataset)
    }
}

/// Most recent admin actions kept in the audit trail; older entries are
/// dropped first.
pub const ADMIN_ACTION_LOG_CAP: usize = 5_000;

/// Admin edits layered over the seeded dataset. Lost on restart. The audit
/// trail holds at most [`ADMIN_ACTION_LOG_CAP`] entries.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) data: Dataset,
    pub(crate) credits: Vec<ManualCredit>,
    pub(crate) session_resets: Vec<SessionReset>,
    pub(crate) resolved_alerts: HashSet<String>,
    pub(crate) reconciled: HashSet<String>,
    pub(crate) badge_corrections: Vec<BadgeCorrection>,
    pub(crate) wallet_adjustments: Vec<WalletAdjustment>,
    pub(crate) notes: Vec<AdminNote>,
    next_action_id: usize,
    next_credit_id: usize,
}

impl StoreState {
    pub(crate) fn record_action(&mut self, admin: &str, action: impl Into<String>, target: &str) {
        self.next_action_id += 1;
        let entry = AdminActionLog {
            id: format!("admin_act_{}", self.next_action_id),
            admin_email: admin.to_string(),
            action: action.into(),
            target: target.to_string(),
            created_at: Utc::now(),
        };
        tracing::info!(
            admin = %entry.admin_email,
            action = %entry.action,
            target = %entry.target,
            "Admin action"
        );
        self.data.admin_actions.push(entry);

        let overflow = self
            .data
            .admin_actions
            .len()
            .saturating_sub(ADMIN_ACTION_LOG_CAP);
        if overflow > 0 {
            self.data.admin_actions.drain(..overflow);
        }
    }

    /// Ids for single manual credits; bulk top-ups use their own scheme.
    pub(crate) fn next_credit_id(&mut self) -> String {
        self.next_credit_id += 1;
        format!("manual_{}", self.next_credit_id)
    }

    pub(crate) fn alerts(&self, rules: &FraudRules) -> Vec<FraudAlert> {
        fraud::scan(&self.data.transactions, rules)
            .into_iter()
            .filter(|alert| !self.resolved_alerts.contains(&alert.id))
            .collect()
    }
}

pub struct AdminStore {
    pub(crate) state: RwLock<StoreState>,
    pub(crate) rules: FraudRules,
}

impl AdminStore {
    pub fn new(data: Dataset, rules: FraudRules) -> Self {
        Self {
            state: RwLock::new(StoreState {
                data,
                ..StoreState::default()
            }),
            rules,
        }
    }

    pub fn empty() -> Self {
        Self::new(Dataset::default(), FraudRules::default())
    }

    pub fn rules(&self) -> &FraudRules {
        &self.rules
    }

    pub async fn logs_page(&self) -> LogsPage {
        let state = self.state.read().await;
        let data = &state.data;

        let mut page = LogsPage {
            api_errors: data.api_errors.clone(),
            payment_failures: data.payment_failures.clone(),
            session_crashes: data.session_crashes.clone(),
            admin_actions: data.admin_actions.clone(),
        };
        page.api_errors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.payment_failures.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.session_crashes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.admin_actions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page
    }

    pub async fn sessions(&self) -> Vec<SessionEvent> {
        self.state.read().await.data.sessions.clone()
    }

    pub async fn subjects(&self) -> Vec<SubjectSummary> {
        self.state.read().await.data.subjects.clone()
    }

    pub async fn analytics_events(&self) -> Vec<AnalyticsEvent> {
        self.state.read().await.data.analytics_events.clone()
    }
}

/// Parses a status query value through the enum's serde names.
/// `None`, empty and `all` mean "no filter".
pub(crate) fn parse_status_filter<T: DeserializeOwned>(raw: Option<&str>) -> AdminResult<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map(Some)
            .map_err(|_| AdminError::validation(format!("Unknown status filter: {}", value))),
    }
}

pub(crate) fn required_text(value: &str, message: &str) -> AdminResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminError::validation(message));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn positive_amount(value: Option<f64>, message: &str) -> AdminResult<f64> {
    match value {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(AdminError::validation(message)),
    }
}
