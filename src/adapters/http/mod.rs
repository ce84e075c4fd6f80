//! HTTP adapter - REST API over the application handlers.
//!
//! Every `/api` route except the cron trigger identifies the user from the
//! `X-User-Id` header set by the portal gateway. Mutating routes run inside a
//! per-request event session and return the toasts and badges it produced as
//! `effects`.

pub mod account;
pub mod cron;
pub mod cycle;
pub mod daily_log;
pub mod error;
pub mod extract;
pub mod notifications;
mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::AuthenticatedUser;
pub use router::{api_router, build_router};
pub use state::{AppState, RequestSession, Stores};
