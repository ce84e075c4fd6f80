//! Cycle tracker tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the late-cycle check.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Days past the predicted start before a late notice goes out
    #[serde(default = "default_grace_days")]
    pub grace_days: u32,

    /// Users checked in parallel during a sweep
    #[serde(default = "default_sweep_concurrency")]
    pub sweep_concurrency: usize,

    /// In-app link attached to late notices
    #[serde(default = "default_late_notice_link")]
    pub late_notice_link: String,
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.grace_days > 60 {
            return Err(ValidationError::InvalidGraceDays);
        }
        if self.sweep_concurrency == 0 || self.sweep_concurrency > 64 {
            return Err(ValidationError::InvalidSweepConcurrency);
        }
        if !self.late_notice_link.starts_with('/') {
            return Err(ValidationError::InvalidNoticeLink);
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            grace_days: default_grace_days(),
            sweep_concurrency: default_sweep_concurrency(),
            late_notice_link: default_late_notice_link(),
        }
    }
}

fn default_grace_days() -> u32 {
    3
}

fn default_sweep_concurrency() -> usize {
    4
}

fn default_late_notice_link() -> String {
    "/cycle-tracker".to_string()
}
