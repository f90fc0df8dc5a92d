use super::user::DeviceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorLog {
    pub id: String,
    pub endpoint: String,
    pub status_code: u16,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailureLog {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(alias = "razorpayPaymentId")]
    pub payment_reference: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCrashLog {
    pub id: String,
    pub user_id: String,
    pub platform: DeviceType,
    pub context: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminActionLog {
    pub id: String,
    pub admin_email: String,
    pub action: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsPage {
    pub api_errors: Vec<ApiErrorLog>,
    pub payment_failures: Vec<PaymentFailureLog>,
    pub session_crashes: Vec<SessionCrashLog>,
    pub admin_actions: Vec<AdminActionLog>,
}
