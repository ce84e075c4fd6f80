//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - The per-session event bus
//! - `memory` - In-memory stores (no database configured, tests)
//! - `postgres` - PostgreSQL stores
//! - `http` - axum REST API and scheduler trigger

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

mod clock;
mod locale;

pub use clock::{FixedClock, SystemClock};
pub use locale::EnglishStrings;
