use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyFlag {
    Pass,
    Review,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrStatus {
    Pending,
    Approved,
    Review,
    Fined,
    Rejected,
}

impl OcrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrStatus::Pending => "pending",
            OcrStatus::Approved => "approved",
            OcrStatus::Review => "review",
            OcrStatus::Fined => "fined",
            OcrStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisResult {
    Clean,
    Blurry,
    Mismatch,
    Suspicious,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCorrection {
    pub questions_solved: u32,
    pub accuracy_percent: f64,
    pub note: String,
    pub corrected_by: String,
    pub corrected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakImpact {
    pub days_delta: i32,
    pub reason: String,
}

impl StreakImpact {
    /// Preview of how a corrected accuracy would move the user's streak.
    pub fn for_accuracy(accuracy_percent: f64) -> Self {
        if accuracy_percent >= 85.0 {
            Self {
                days_delta: 1,
                reason: "Correction keeps streak active.".to_string(),
            }
        } else if accuracy_percent < 60.0 {
            Self {
                days_delta: -1,
                reason: "Correction triggers streak break.".to_string(),
            }
        } else {
            Self {
                days_delta: 0,
                reason: "Correction requires final approval.".to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrSubmission {
    pub id: String,
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub screenshot_label: String,
    pub analysis_result: AnalysisResult,
    pub question_count: u32,
    pub questions_solved: u32,
    pub accuracy_percent: f64,
    pub accuracy_flag: AccuracyFlag,
    pub status: OcrStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_correction: Option<ManualCorrection>,
    pub streak_impact_preview: StreakImpact,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrQuery {
    /// `all` or absent disables the status filter.
    pub status: Option<String>,
    pub min_accuracy: Option<f64>,
    pub min_questions: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrStatusUpdate {
    pub status: OcrStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrCorrectionRequest {
    pub questions_solved: Option<u32>,
    pub accuracy_percent: Option<f64>,
    pub note: Option<String>,
}
