use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI")]
    Upi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: String,
    pub user_id: String,
    /// Positive for deposits, negative for withdrawals.
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(alias = "razorpayPaymentId")]
    pub payment_reference: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub refunds: u32,
}

impl WalletTransaction {
    pub fn is_deposit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudAlertKind {
    RapidDeposits,
    RapidWithdrawals,
    Flagged,
}

impl FraudAlertKind {
    pub fn key(&self) -> &'static str {
        match self {
            FraudAlertKind::RapidDeposits => "rapid_deposits",
            FraudAlertKind::RapidWithdrawals => "rapid_withdrawals",
            FraudAlertKind::Flagged => "flagged",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAlert {
    pub id: String,
    pub user_id: String,
    pub kind: FraudAlertKind,
    pub reason: String,
    /// Timestamp of the latest contributing transaction.
    pub created_at: DateTime<Utc>,
    pub transaction_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCredit {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReset {
    pub id: String,
    pub user_id: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: WalletTransaction,
    pub fraud_flag: bool,
    pub reconciled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletOverview {
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub total_manual_credits: f64,
    pub transaction_count: usize,
    pub open_alerts: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPage {
    pub overview: WalletOverview,
    pub transactions: Vec<TransactionView>,
    pub alerts: Vec<FraudAlert>,
    pub credits: Vec<ManualCredit>,
    pub session_resets: Vec<SessionReset>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCreditRequest {
    #[serde(default)]
    pub user_id: String,
    pub amount: Option<f64>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkAction {
    Topup,
    SessionReset,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub action: BulkAction,
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    pub amount: Option<f64>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionOutcome {
    pub user_ids: Vec<String>,
    pub credits: Vec<ManualCredit>,
    pub session_resets: Vec<SessionReset>,
}
