//! HTTP adapter for the notification inbox.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, NotificationId};
use crate::domain::notification::{Notification, NotificationType};

use super::error::ApiError;
use super::extract::AuthenticatedUser;
use super::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub text: String,
    pub link: String,
    pub created_at: String,
    pub read: bool,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.to_string(),
            notification_type: n.notification_type,
            text: n.text,
            link: n.link,
            created_at: n.created_at.to_rfc3339(),
            read: n.read,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let notifications = state
        .list_notifications_handler()
        .handle(&user.user_id)
        .await?;
    Ok(Json(NotificationListResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    }))
}

/// POST /api/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    let id: NotificationId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid notification ID format".to_string()))?;

    state
        .mark_notification_read_handler()
        .handle(id, CommandMetadata::new(user.user_id).with_source("api"))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn notifications_router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/:id/read", post(mark_notification_read))
}
