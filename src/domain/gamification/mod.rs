//! Gamification module - achievement badges.

mod badge;
mod events;

pub use badge::{Badge, BadgeKey, CYCLE_VETERAN_THRESHOLD};
pub use events::BadgeUnlocked;
