//! API error type and its JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::{
    AssistantActionError, LogDailyEventError, LogPeriodStartError, MarkNotificationReadError,
    SetCycleTypeError, TogglePeriodEndError,
};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Error body returned by every `/api` route.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// API error type that converts handler errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_validation() {
            return ApiError::BadRequest(err.message);
        }
        match err.code {
            ErrorCode::VersionConflict => ApiError::Conflict(err.message),
            ErrorCode::Unauthorized => ApiError::Unauthorized,
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<LogPeriodStartError> for ApiError {
    fn from(err: LogPeriodStartError) -> Self {
        match err {
            LogPeriodStartError::Domain(e) => e.into(),
        }
    }
}

impl From<TogglePeriodEndError> for ApiError {
    fn from(err: TogglePeriodEndError) -> Self {
        match err {
            TogglePeriodEndError::Domain(e) => e.into(),
        }
    }
}

impl From<SetCycleTypeError> for ApiError {
    fn from(err: SetCycleTypeError) -> Self {
        match err {
            SetCycleTypeError::CycleNotFound(id) => {
                ApiError::NotFound(format!("Cycle not found: {}", id))
            }
            SetCycleTypeError::Domain(e) => e.into(),
        }
    }
}

impl From<LogDailyEventError> for ApiError {
    fn from(err: LogDailyEventError) -> Self {
        match err {
            LogDailyEventError::Validation(e) => e.into(),
            LogDailyEventError::Domain(e) => e.into(),
        }
    }
}

impl From<MarkNotificationReadError> for ApiError {
    fn from(err: MarkNotificationReadError) -> Self {
        match err {
            MarkNotificationReadError::NotFound(id) => {
                ApiError::NotFound(format!("Notification not found: {}", id))
            }
            MarkNotificationReadError::Domain(e) => e.into(),
        }
    }
}

impl From<AssistantActionError> for ApiError {
    fn from(err: AssistantActionError) -> Self {
        match err {
            AssistantActionError::Invalid(e) => e.into(),
            AssistantActionError::LogPeriod(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", msg))
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", "Authentication is required"),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new("NOT_FOUND", msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new("CONFLICT", msg)),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", GENERIC_FAILURE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
