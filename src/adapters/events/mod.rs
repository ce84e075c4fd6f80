//! Event bus adapters.
//!
//! - `SessionEventBus` - In-process bus scoped to one session

mod session_bus;

pub use session_bus::SessionEventBus;
