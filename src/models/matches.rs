use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Approved,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Approved => "approved",
            MatchStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMatch {
    pub id: String,
    pub user_a_id: String,
    pub user_a_name: String,
    pub user_b_id: String,
    pub user_b_name: String,
    pub target_score: f64,
    pub streak_score: f64,
    pub overall_score: f64,
    pub requested_at: DateTime<Utc>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchQuery {
    pub status: Option<String>,
    pub min_overall: Option<f64>,
    pub min_target: Option<f64>,
    pub min_streak: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchStatusUpdate {
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesPage {
    pub matches: Vec<PartnerMatch>,
    pub pending_total: usize,
}
