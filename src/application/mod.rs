//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers receive their event publisher from an `EventSession`, which owns
//! the per-session bus wiring.

pub mod handlers;
pub mod subscribers;

mod session;

pub use session::{EventSession, SessionServices};
pub use subscribers::Effect;
