use super::{
    badges::UserBadgeEvent, ocr::OcrSubmission, sessions::SessionEvent,
    wallet::WalletTransaction,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Normal,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Ios,
    Android,
    Web,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub gender: Gender,
    pub avatar: String,
    pub subscription_tier: SubscriptionTier,
    pub registered_at: DateTime<Utc>,
    pub wallet_balance: f64,
    pub refund_eligible_amount: f64,
    pub total_fine_collected: f64,
    pub current_streak_days: u32,
    pub partner_match_count: u32,
    pub compliance_rate: f64,
    pub last_active_at: DateTime<Utc>,
    pub is_active: bool,
    pub is_disabled: bool,
    #[serde(default)]
    pub signup_source: String,
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub email_verified: bool,
    pub last_device_type: DeviceType,
    #[serde(default)]
    pub last_app_version: String,
    #[serde(default)]
    pub last_location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AdminUser {
    pub fn is_effectively_active(&self) -> bool {
        self.is_active && !self.is_disabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletFilter {
    #[default]
    All,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserSortKey {
    #[default]
    Streak,
    PartnerMatches,
    ComplianceRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserQuery {
    pub phone: Option<String>,
    pub status: StatusFilter,
    pub wallet: WalletFilter,
    pub sort: UserSortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAdjustment {
    pub user_id: String,
    pub amount: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNote {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user: AdminUser,
    pub transactions: Vec<WalletTransaction>,
    pub badges: Vec<UserBadgeEvent>,
    pub ocr_submissions: Vec<OcrSubmission>,
    pub sessions: Vec<SessionEvent>,
    pub wallet_adjustments: Vec<WalletAdjustment>,
    pub notes: Vec<AdminNote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletAdjustmentRequest {
    pub amount: Option<f64>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminNoteRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FineBreakdown {
    pub user_id: String,
    pub avatar: String,
    pub subscription_tier: SubscriptionTier,
    pub wallet_balance: f64,
    pub total_fine_collected: f64,
    pub refund_eligible_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTotals {
    pub total_wallet: f64,
    pub total_fines: f64,
    pub total_applicable_today: f64,
    /// Wallet balance minus refund exposure.
    pub total_difference_today: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinesPage {
    pub totals: FineTotals,
    pub users: Vec<FineBreakdown>,
}
