use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BadgeType {
    Focused,
    #[serde(rename = "Streak Master")]
    StreakMaster,
    #[serde(rename = "Early Bird")]
    EarlyBird,
    #[serde(rename = "Night Owl")]
    NightOwl,
}

impl BadgeType {
    pub const ALL: [BadgeType; 4] = [
        BadgeType::Focused,
        BadgeType::StreakMaster,
        BadgeType::EarlyBird,
        BadgeType::NightOwl,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeEvent {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    pub earned_at: DateTime<Utc>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeSummary {
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCorrection {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCorrectionRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgesPage {
    pub summary: Vec<BadgeSummary>,
    pub total_badges: usize,
    pub events: Vec<UserBadgeEvent>,
    pub corrections: Vec<BadgeCorrection>,
}
