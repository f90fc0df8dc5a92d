//! Moderation queues: OCR screenshot review, partner matches, badges.

use crate::{
    error::{AdminError, AdminResult},
    models::*,
    services::store::{parse_status_filter, required_text, AdminStore},
};
use chrono::Utc;
use std::collections::BTreeMap;

fn at_least(value: f64, threshold: Option<f64>) -> bool {
    threshold.map_or(true, |min| !min.is_finite() || value >= min)
}

impl AdminStore {
    /// Newest submissions first.
    pub async fn list_ocr(&self, query: &OcrQuery) -> AdminResult<Vec<OcrSubmission>> {
        let status: Option<OcrStatus> = parse_status_filter(query.status.as_deref())?;

        let state = self.state.read().await;
        let mut submissions: Vec<OcrSubmission> = state
            .data
            .ocr_submissions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .filter(|s| at_least(s.accuracy_percent, query.min_accuracy))
            .filter(|s| at_least(s.questions_solved as f64, query.min_questions.map(f64::from)))
            .cloned()
            .collect();

        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }

    pub async fn update_ocr_status(
        &self,
        submission_id: &str,
        status: OcrStatus,
        admin: &str,
    ) -> AdminResult<OcrSubmission> {
        let mut state = self.state.write().await;
        let submission = state
            .data
            .ocr_submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| AdminError::not_found(format!("OCR submission {} not found", submission_id)))?;

        submission.status = status;
        let updated = submission.clone();

        state.record_action(admin, format!("OCR marked {}", status.as_str()), submission_id);
        Ok(updated)
    }

    /// Records a manual correction and moves the submission back to review.
    pub async fn apply_ocr_correction(
        &self,
        submission_id: &str,
        request: OcrCorrectionRequest,
        admin: &str,
    ) -> AdminResult<OcrSubmission> {
        let note = request
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        if request.questions_solved.is_none() && request.accuracy_percent.is_none() && note.is_none() {
            return Err(AdminError::validation("Enter at least one correction field."));
        }
        if let Some(accuracy) = request.accuracy_percent {
            if !accuracy.is_finite() || !(0.0..=100.0).contains(&accuracy) {
                return Err(AdminError::validation("Accuracy must be between 0 and 100."));
            }
        }

        let mut state = self.state.write().await;
        let submission = state
            .data
            .ocr_submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| AdminError::not_found(format!("OCR submission {} not found", submission_id)))?;

        let accuracy = request.accuracy_percent.unwrap_or(submission.accuracy_percent);
        submission.status = OcrStatus::Review;
        submission.manual_correction = Some(ManualCorrection {
            questions_solved: request.questions_solved.unwrap_or(submission.questions_solved),
            accuracy_percent: accuracy,
            note: note.unwrap_or_else(|| "Manual correction applied.".to_string()),
            corrected_by: admin.to_string(),
            corrected_at: Utc::now(),
        });
        submission.streak_impact_preview = StreakImpact::for_accuracy(accuracy);
        let updated = submission.clone();

        state.record_action(admin, "Applied OCR correction", submission_id);
        Ok(updated)
    }

    pub async fn list_matches(&self, query: &MatchQuery) -> AdminResult<MatchesPage> {
        let status: Option<MatchStatus> = parse_status_filter(query.status.as_deref())?;

        let state = self.state.read().await;
        let all = &state.data.partner_matches;

        Ok(MatchesPage {
            matches: all
                .iter()
                .filter(|m| status.map_or(true, |wanted| m.status == wanted))
                .filter(|m| at_least(m.overall_score, query.min_overall))
                .filter(|m| at_least(m.target_score, query.min_target))
                .filter(|m| at_least(m.streak_score, query.min_streak))
                .cloned()
                .collect(),
            pending_total: all.iter().filter(|m| m.status == MatchStatus::Pending).count(),
        })
    }

    pub async fn update_match_status(
        &self,
        match_id: &str,
        status: MatchStatus,
        admin: &str,
    ) -> AdminResult<PartnerMatch> {
        let mut state = self.state.write().await;
        let partner_match = state
            .data
            .partner_matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| AdminError::not_found(format!("Partner match {} not found", match_id)))?;

        partner_match.status = status;
        let updated = partner_match.clone();

        state.record_action(admin, format!("Match {}", status.as_str()), match_id);
        Ok(updated)
    }

    pub async fn badges_page(&self) -> BadgesPage {
        let state = self.state.read().await;

        let mut counts: BTreeMap<BadgeType, usize> =
            BadgeType::ALL.iter().map(|badge| (*badge, 0)).collect();
        for event in &state.data.badge_events {
            *counts.entry(event.badge_type).or_default() += 1;
        }

        let mut events = state.data.badge_events.clone();
        events.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));

        BadgesPage {
            total_badges: events.len(),
            summary: counts
                .into_iter()
                .map(|(badge_type, count)| BadgeSummary { badge_type, count })
                .collect(),
            events,
            corrections: state.badge_corrections.clone(),
        }
    }

    pub async fn record_badge_correction(
        &self,
        request: BadgeCorrectionRequest,
        admin: &str,
    ) -> AdminResult<BadgeCorrection> {
        let user_id = required_text(&request.user_id, "User ID is required for badge correction.")?;
        let note = required_text(&request.note, "Please provide a short admin note.")?;

        let mut state = self.state.write().await;
        let correction = BadgeCorrection {
            id: format!("corr_{}", state.badge_corrections.len() + 1),
            user_id,
            badge_type: request.badge_type,
            note,
            created_at: Utc::now(),
        };
        state.badge_corrections.insert(0, correction.clone());
        state.record_action(admin, "Badge correction", &correction.user_id);

        Ok(correction)
    }
}
