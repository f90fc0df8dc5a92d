use crate::{
    error::AdminError,
    handlers::AppState,
    models::{ApiResponse, SettingsPage, SuccessResponse},
};
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

pub async fn get_system_config(State(state): State<AppState>) -> Json<Value> {
    Json(state.system_config.get().await)
}

/// Wholesale replacement. Any JSON document is accepted as-is.
pub async fn put_system_config(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AdminError> {
    let config: Value = serde_json::from_slice(&body)
        .map_err(|_| AdminError::validation("Request body must be a JSON document."))?;

    state.system_config.replace(config).await;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn settings_page(State(state): State<AppState>) -> Json<ApiResponse<SettingsPage>> {
    Json(ApiResponse::ok(state.system_config.settings_page().await))
}
