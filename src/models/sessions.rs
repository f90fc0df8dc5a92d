use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Completed,
    Failed,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    pub id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SessionStatus,
    #[serde(default)]
    pub distance_earned_km: f64,
}

impl SessionEvent {
    pub fn duration_minutes(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds().max(0) as f64 / 60.0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySessionMetrics {
    pub date: NaiveDate,
    pub sessions_started: usize,
    pub sessions_completed: usize,
    pub sessions_failed_or_abandoned: usize,
    pub average_duration_minutes: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourBucket {
    pub hour: u32,
    pub hour_label: String,
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalyticsPage {
    pub daily: Vec<DailySessionMetrics>,
    pub peak_hours: Vec<PeakHourBucket>,
    pub recent: Vec<SessionEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectCategory {
    Study,
    Work,
    Fitness,
    Personal,
    Other,
}

/// Eisenhower quadrant: urgent/important combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "UI")]
    UrgentImportant,
    #[serde(rename = "UNI")]
    UrgentNotImportant,
    #[serde(rename = "NUI")]
    NotUrgentImportant,
    #[serde(rename = "NUNI")]
    NotUrgentNotImportant,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & important",
            Quadrant::UrgentNotImportant => "Urgent, not important",
            Quadrant::NotUrgentImportant => "Important, not urgent",
            Quadrant::NotUrgentNotImportant => "Neither urgent nor important",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: SubjectCategory,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: SubjectCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuadrantCount {
    pub quadrant: Quadrant,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAnalyticsPage {
    pub total_subjects: usize,
    pub by_category: Vec<CategoryCount>,
    pub eisenhower: Vec<QuadrantCount>,
}
