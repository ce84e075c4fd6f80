//! Cycle Tracker - period logging, phase prediction and late-cycle alerts.
//!
//! The crate follows a hexagonal layout: `domain` holds the pure cycle
//! math and value types, `ports` the traits the application depends on,
//! `application` the command handlers and event subscribers, and
//! `adapters` the HTTP API, PostgreSQL and in-memory stores and the
//! per-session event bus.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
