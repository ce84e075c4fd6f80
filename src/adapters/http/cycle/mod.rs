//! HTTP adapter for the cycle module.
//!
//! # Endpoints
//!
//! - `GET /api/cycles` - Cycles, averages and the upcoming phases
//! - `POST /api/cycles/period-start` - Log a period start
//! - `PUT /api/cycles/:id/period-end` - Set or clear a period end
//! - `PUT /api/cycles/:id/type` - Mark a cycle regular or irregular
//! - `POST /api/assistant/actions` - Apply an assistant action

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::cycle_router;
