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

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<ApiResponse<Vec<AdminUser>>> {
    Json(ApiResponse::ok(state.store.list_users(&query).await))
}

pub async fn user_detail(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserDetail>>, AdminError> {
    let detail = state.store.user_detail(&user_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn toggle_disabled(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<AdminUser>>, AdminError> {
    let user = state
        .store
        .toggle_user_disabled(&user_id, &session.email)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn reset_avatar(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<AdminUser>>, AdminError> {
    let user = state.store.reset_avatar(&user_id, &session.email).await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn adjust_wallet(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(user_id): Path<String>,
    Json(request): Json<WalletAdjustmentRequest>,
) -> Result<Json<ApiResponse<AdminUser>>, AdminError> {
    let user = state
        .store
        .adjust_wallet(&user_id, request, &session.email)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn add_note(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(user_id): Path<String>,
    Json(request): Json<AdminNoteRequest>,
) -> Result<Json<ApiResponse<AdminNote>>, AdminError> {
    let note = state.store.add_note(&user_id, request, &session.email).await?;
    Ok(Json(ApiResponse::ok(note)))
}

pub async fn fines_page(State(state): State<AppState>) -> Json<ApiResponse<FinesPage>> {
    Json(ApiResponse::ok(state.store.fines_page().await))
}
