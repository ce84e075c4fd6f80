//! HTTP adapter for account-level actions.
//!
//! - `POST /api/engagement` - Report a client engagement signal
//! - `DELETE /api/account/data` - Erase everything stored for the user

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::application::handlers::RecordEngagementCommand;
use crate::application::Effect;
use crate::domain::engagement::EngagementKind;
use crate::domain::foundation::CommandMetadata;

use super::error::ApiError;
use super::extract::AuthenticatedUser;
use super::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct EngagementRequest {
    #[serde(rename = "type")]
    pub kind: EngagementKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectsResponse {
    pub effects: Vec<Effect>,
}

/// POST /api/engagement
pub async fn record_engagement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<EngagementRequest>,
) -> Result<Json<EffectsResponse>, ApiError> {
    let session = state.open_session();
    let result = state
        .engagement_handler(session.publisher())
        .handle(
            RecordEngagementCommand { kind: request.kind },
            CommandMetadata::new(user.user_id).with_source("api"),
        )
        .await;
    let effects = session.close();

    result?;
    Ok(Json(EffectsResponse { effects }))
}

/// DELETE /api/account/data
pub async fn erase_account_data(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    state
        .erase_user_data_handler()
        .handle(CommandMetadata::new(user.user_id).with_source("api"))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/api/engagement", post(record_engagement))
        .route("/api/account/data", delete(erase_account_data))
}
