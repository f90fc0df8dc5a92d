use crate::{
    error::AdminError,
    handlers::AppState,
    models::*,
    services::AdminSession,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub async fn wallet_page(State(state): State<AppState>) -> Json<ApiResponse<WalletPage>> {
    Json(ApiResponse::ok(state.store.wallet_page().await))
}

pub async fn list_alerts(State(state): State<AppState>) -> Json<ApiResponse<Vec<FraudAlert>>> {
    Json(ApiResponse::ok(state.store.visible_alerts().await))
}

pub async fn resolve_alert(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(alert_id): Path<String>,
) -> Result<Json<ApiResponse<FraudAlert>>, AdminError> {
    let alert = state.store.resolve_alert(&alert_id, &session.email).await?;
    let message = format!(
        "Alert resolved for {} with {} transaction(s).",
        alert.user_id,
        alert.transaction_ids.len()
    );
    Ok(Json(ApiResponse::with_message(alert, message)))
}

pub async fn create_credit(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(request): Json<ManualCreditRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ManualCredit>>), AdminError> {
    let credit = state.store.record_credit(request, &session.email).await?;
    let message = format!("Credited {:.2} to {}.", credit.amount, credit.user_id);
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(credit, message))))
}

pub async fn bulk_action(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Json(request): Json<BulkActionRequest>,
) -> Result<Json<ApiResponse<BulkActionOutcome>>, AdminError> {
    let action = request.action;
    let outcome = state.store.apply_bulk_action(request, &session.email).await?;
    let message = match action {
        BulkAction::Topup => format!("Top-up applied to {} user(s).", outcome.user_ids.len()),
        BulkAction::SessionReset => {
            format!("Session reset queued for {} user(s).", outcome.user_ids.len())
        }
    };
    Ok(Json(ApiResponse::with_message(outcome, message)))
}

pub async fn reconcile_transaction(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(transaction_id): Path<String>,
) -> Result<Json<ApiResponse<WalletTransaction>>, AdminError> {
    let transaction = state
        .store
        .reconcile_transaction(&transaction_id, &session.email)
        .await?;
    Ok(Json(ApiResponse::with_message(
        transaction,
        format!("Transaction {} marked reconciled.", transaction_id),
    )))
}

pub async fn retry_verification(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(transaction_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<WalletTransaction>>), AdminError> {
    let transaction = state
        .store
        .retry_verification(&transaction_id, &session.email)
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::with_message(
            transaction,
            format!("Verification retry queued for {}.", transaction_id),
        )),
    ))
}
