//! HTTP handlers for cycle endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    AssistantAction, GetCycleOverviewQuery, LogPeriodStartCommand, LogPeriodStartOutcome,
    SetCycleTypeCommand, TogglePeriodEndCommand, TogglePeriodEndOutcome,
};
use crate::domain::foundation::{parse_calendar_date, CommandMetadata, CycleId};

use super::super::error::ApiError;
use super::super::extract::AuthenticatedUser;
use super::super::state::AppState;
use super::dto::{
    CycleCommandResponse, CycleOverviewResponse, LogPeriodStartRequest, SetCycleTypeRequest,
    SetPeriodEndRequest,
};

fn metadata(user: AuthenticatedUser) -> CommandMetadata {
    CommandMetadata::new(user.user_id).with_source("api")
}

fn parse_cycle_id(raw: &str) -> Result<CycleId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid cycle ID format".to_string()))
}

fn period_start_response(
    outcome: LogPeriodStartOutcome,
    effects: Vec<crate::application::Effect>,
) -> (StatusCode, Json<CycleCommandResponse>) {
    let (code, status) = if outcome.is_created() {
        (StatusCode::CREATED, "created")
    } else {
        (StatusCode::OK, "already_logged")
    };
    let body = CycleCommandResponse::new(status, outcome.cycle(), outcome.cycle_data(), effects);
    (code, Json(body))
}

/// GET /api/cycles
pub async fn get_overview(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<CycleOverviewResponse>, ApiError> {
    let overview = state
        .cycle_overview_handler()
        .handle(GetCycleOverviewQuery {
            user_id: user.user_id,
        })
        .await?;
    Ok(Json(overview.into()))
}

/// POST /api/cycles/period-start
pub async fn log_period_start(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<LogPeriodStartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_calendar_date("date", &request.date)?;

    let session = state.open_session();
    let result = state
        .log_period_start_handler(session.publisher())
        .handle(LogPeriodStartCommand { date }, metadata(user))
        .await;
    let effects = session.close();

    Ok(period_start_response(result?, effects))
}

/// PUT /api/cycles/:id/period-end
pub async fn set_period_end(
    State(state): State<AppState>,
    Path(cycle_id): Path<String>,
    user: AuthenticatedUser,
    Json(request): Json<SetPeriodEndRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cycle_id = parse_cycle_id(&cycle_id)?;
    let end_date = request
        .end_date
        .as_deref()
        .map(|raw| parse_calendar_date("end_date", raw))
        .transpose()?;

    let session = state.open_session();
    let result = state
        .toggle_period_end_handler(session.publisher())
        .handle(TogglePeriodEndCommand { cycle_id, end_date }, metadata(user))
        .await;
    let effects = session.close();

    match result? {
        TogglePeriodEndOutcome::Updated { cycle, cycle_data } => Ok(Json(
            CycleCommandResponse::new("updated", &cycle, &cycle_data, effects),
        )),
        TogglePeriodEndOutcome::CycleNotFound => {
            Err(ApiError::NotFound(format!("Cycle not found: {}", cycle_id)))
        }
    }
}

/// PUT /api/cycles/:id/type
pub async fn set_cycle_type(
    State(state): State<AppState>,
    Path(cycle_id): Path<String>,
    user: AuthenticatedUser,
    Json(request): Json<SetCycleTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SetCycleTypeCommand {
        cycle_id: parse_cycle_id(&cycle_id)?,
        cycle_type: request.cycle_type,
    };

    let result = state.set_cycle_type_handler().handle(cmd, metadata(user)).await?;

    Ok(Json(CycleCommandResponse::new(
        "updated",
        &result.cycle,
        &result.cycle_data,
        Vec::new(),
    )))
}

/// POST /api/assistant/actions
pub async fn assistant_action(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(action): Json<AssistantAction>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.open_session();
    let result = state
        .assistant_handler(session.publisher())
        .handle(action, metadata(user))
        .await;
    let effects = session.close();

    Ok(period_start_response(result?, effects))
}
