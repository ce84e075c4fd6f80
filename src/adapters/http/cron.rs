//! Scheduler trigger for the late-cycle check.
//!
//! The external scheduler calls `GET /api/cron/late-cycle-check` with its
//! trusted header. When a secret is configured the header value must match
//! it. Outside production the check is open so it can be run by hand.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::config::{Environment, SchedulerConfig};

use super::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CronSuccess {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CronFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Whether the request carries valid scheduler credentials.
fn is_trusted_trigger(scheduler: &SchedulerConfig, headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(scheduler.header_name.as_str()) else {
        return false;
    };
    match scheduler.expected_value() {
        Some(expected) => value.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => true,
    }
}

/// GET /api/cron/late-cycle-check
pub async fn late_cycle_check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let production = state.environment == Environment::Production;
    if production && !is_trusted_trigger(&state.scheduler, &headers) {
        tracing::warn!("rejected late cycle check trigger");
        return (
            StatusCode::UNAUTHORIZED,
            Json(CronFailure {
                error: "Unauthorized".to_string(),
                details: None,
            }),
        )
            .into_response();
    }

    match state.late_cycle_check_handler().handle().await {
        Ok(report) => (
            StatusCode::OK,
            Json(CronSuccess {
                message: report.summary(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "late cycle check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CronFailure {
                    error: "Late cycle check failed".to_string(),
                    details: (!production).then(|| err.to_string()),
                }),
            )
                .into_response()
        }
    }
}

pub fn cron_router() -> Router<AppState> {
    Router::new().route("/api/cron/late-cycle-check", get(late_cycle_check))
}
