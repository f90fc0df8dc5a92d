use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Seed data error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AdminError {
    pub fn validation(message: impl Into<String>) -> Self {
        AdminError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AdminError::NotFound(message.into())
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AdminError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AdminError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            AdminError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AdminError::Seed(_) | AdminError::ConfigError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AdminError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status, error_code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, error_code = error_code, "Request failed");
        } else {
            tracing::warn!(error = %self, error_code = error_code, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
