//! Error types for the Access API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gymrat_access_core::AccessError;
use gymrat_types::Tier;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_tier: Option<Tier>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Access(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Access(e) => e.error_code(),
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let (message, required_tier) = match &self {
            // Generic message; the session detail stays in the logs
            Self::Access(AccessError::SessionUnavailable(detail)) => {
                tracing::error!(detail = %detail, "Session backend unavailable");
                ("session unavailable".to_string(), None)
            }
            Self::Access(AccessError::UpgradeRequired { required_tier, .. }) => {
                (self.to_string(), *required_tier)
            }
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                required_tier,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
