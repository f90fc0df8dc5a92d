//! OCR review, partner matches, badges and the operational log tables.

use crate::{
    error::AdminError,
    handlers::AppState,
    models::*,
    services::AdminSession,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

pub async fn list_ocr(
    State(state): State<AppState>,
    Query(query): Query<OcrQuery>,
) -> Result<Json<ApiResponse<Vec<OcrSubmission>>>, AdminError> {
    Ok(Json(ApiResponse::ok(state.store.list_ocr(&query).await?)))
}

pub async fn update_ocr_status(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(submission_id): Path<String>,
    Json(update): Json<OcrStatusUpdate>,
) -> Result<Json<ApiResponse<OcrSubmission>>, AdminError> {
    let submission = state
        .store
        .update_ocr_status(&submission_id, update.status, &session.email)
        .await?;
    Ok(Json(ApiResponse::ok(submission)))
}

pub async fn correct_ocr(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(submission_id): Path<String>,
    Json(request): Json<OcrCorrectionRequest>,
) -> Result<Json<ApiResponse<OcrSubmission>>, AdminError> {
    let submission = state
        .store
        .apply_ocr_correction(&submission_id, request, &session.email)
        .await?;
    let message = submission.streak_impact_preview.reason.clone();
    Ok(Json(ApiResponse::with_message(submission, message)))
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<ApiResponse<MatchesPage>>, AdminError> {
    Ok(Json(ApiResponse::ok(state.store.list_matches(&query).await?)))
}

pub async fn update_match_status(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(match_id): Path<String>,
    Json(update): Json<MatchStatusUpdate>,
) -> Result<Json<ApiResponse<PartnerMatch>>, AdminError> {
    let partner_match = state
        .store
        .update_match_status(&match_id, update.status, &session.email)
        .await?;
    Ok(Json(ApiResponse::ok(partner_match)))
}

pub async fn badges_page(State(state): State<AppState>) -> Json<ApiResponse<BadgesPage>> {
    Json(ApiResponse::ok(state.store.badges_page().await))
}

pub async fn create_badge_correction(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(request): Json<BadgeCorrectionRequest>,
) -> Result<Json<ApiResponse<BadgeCorrection>>, AdminError> {
    let correction = state
        .store
        .record_badge_correction(request, &session.email)
        .await?;
    Ok(Json(ApiResponse::ok(correction)))
}

pub async fn logs_page(State(state): State<AppState>) -> Json<ApiResponse<LogsPage>> {
    Json(ApiResponse::ok(state.store.logs_page().await))
}
