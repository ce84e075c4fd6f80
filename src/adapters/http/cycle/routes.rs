//! Route configuration for cycle endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    assistant_action, get_overview, log_period_start, set_cycle_type, set_period_end,
};

pub fn cycle_router() -> Router<AppState> {
    Router::new()
        .route("/api/cycles", get(get_overview))
        .route("/api/cycles/period-start", post(log_period_start))
        .route("/api/cycles/:id/period-end", put(set_period_end))
        .route("/api/cycles/:id/type", put(set_cycle_type))
        .route("/api/assistant/actions", post(assistant_action))
}
