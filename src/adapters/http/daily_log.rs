//! HTTP adapter for daily symptom logs.
//!
//! - `GET /api/daily-events?from=&to=` - Days in an inclusive range
//! - `PATCH /api/daily-events/:date` - Merge flags into one day

use std::collections::BTreeMap;

use axum::extract::{Json, Path, Query, State};
use axum::routing::{get, patch};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{GetDailyEventsQuery, LogDailyEventCommand};
use crate::application::Effect;
use crate::domain::daily_log::{DailyEvent, DailyEventPatch, SymptomTag};
use crate::domain::foundation::{parse_calendar_date, CommandMetadata};

use super::error::ApiError;
use super::extract::AuthenticatedUser;
use super::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct DailyRangeParams {
    pub from: String,
    pub to: String,
}

/// `true` sets a flag, `false` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyEventPatchRequest {
    pub flags: BTreeMap<String, bool>,
}

impl DailyEventPatchRequest {
    fn into_patch(self) -> Result<DailyEventPatch, ApiError> {
        let mut patch = DailyEventPatch::default();
        for (raw, enabled) in self.flags {
            patch.flags.insert(SymptomTag::new(raw)?, enabled);
        }
        Ok(patch)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEventResponse {
    pub date: String,
    pub flags: Vec<String>,
    pub updated_at: String,
}

impl From<DailyEvent> for DailyEventResponse {
    fn from(event: DailyEvent) -> Self {
        Self {
            date: event.date.format("%Y-%m-%d").to_string(),
            flags: event.flags.into_iter().map(String::from).collect(),
            updated_at: event.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEventListResponse {
    pub events: Vec<DailyEventResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEventCommandResponse {
    pub event: DailyEventResponse,
    pub effects: Vec<Effect>,
}

/// GET /api/daily-events
pub async fn list_daily_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DailyRangeParams>,
) -> Result<Json<DailyEventListResponse>, ApiError> {
    let query = GetDailyEventsQuery {
        user_id: user.user_id,
        from: parse_calendar_date("from", &params.from)?,
        to: parse_calendar_date("to", &params.to)?,
    };
    let events = state.daily_events_handler().handle(query).await?;
    Ok(Json(DailyEventListResponse {
        events: events.into_iter().map(DailyEventResponse::from).collect(),
    }))
}

/// PATCH /api/daily-events/:date
pub async fn patch_daily_event(
    State(state): State<AppState>,
    Path(date): Path<String>,
    user: AuthenticatedUser,
    Json(request): Json<DailyEventPatchRequest>,
) -> Result<Json<DailyEventCommandResponse>, ApiError> {
    let cmd = LogDailyEventCommand {
        date: parse_calendar_date("date", &date)?,
        patch: request.into_patch()?,
    };

    let session = state.open_session();
    let result = state
        .log_daily_event_handler(session.publisher())
        .handle(cmd, CommandMetadata::new(user.user_id).with_source("api"))
        .await;
    let effects = session.close();

    Ok(Json(DailyEventCommandResponse {
        event: result?.into(),
        effects,
    }))
}

pub fn daily_log_router() -> Router<AppState> {
    Router::new()
        .route("/api/daily-events", get(list_daily_events))
        .route("/api/daily-events/:date", patch(patch_daily_event))
}
