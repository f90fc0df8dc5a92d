use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub active_sessions: u64,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub sessions_completed: usize,
    pub sessions_failed_or_abandoned: usize,
    pub total_focus_hours: f64,
    pub total_deposits: f64,
    pub open_fraud_alerts: usize,
    pub pending_ocr_reviews: usize,
    pub pending_partner_matches: usize,
    pub successful_logins: u64,
    pub failed_logins: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginPage {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}
