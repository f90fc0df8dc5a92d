use super::user::DeviceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventName {
    UserRegistered,
    SessionStart,
    SessionComplete,
    SessionFail,
    SubjectCreated,
    ScheduleGenerated,
    DepositSuccess,
    DepositFail,
    AvatarChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    pub name: AnalyticsEventName,
    pub user_id: String,
    pub device: DeviceType,
    #[serde(default)]
    pub app_version: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_balance_snapshot_in_rupees: Option<f64>,
    #[serde(default)]
    pub properties: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentageMetric {
    pub numerator: usize,
    pub denominator: usize,
    pub percentage: f64,
}

impl PercentageMetric {
    pub fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 0,
            percentage: 0.0,
        }
    }

    /// Percentage rounded to two decimals; zero when the denominator is zero.
    pub fn of(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        let raw = numerator as f64 / denominator as f64 * 100.0;
        Self {
            numerator,
            denominator,
            percentage: (raw * 100.0).round() / 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingFunnel {
    pub onboarded: PercentageMetric,
    pub deposited: PercentageMetric,
    pub first_session: PercentageMetric,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalyticsPage {
    pub first_day_session_completion: PercentageMetric,
    pub day1_retention: PercentageMetric,
    pub day7_retention: PercentageMetric,
    pub funnel: OnboardingFunnel,
    pub event_count: usize,
}
