//! Scheduler trigger authentication

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// How the external scheduler proves itself on the cron endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Header the scheduler sets on every trigger
    #[serde(default = "default_header_name")]
    pub header_name: String,

    /// Expected header value. When unset, presence of the header is enough.
    #[serde(default)]
    pub secret: Option<Secret<String>>,
}

impl SchedulerConfig {
    /// The configured secret, if any and non-empty.
    pub fn expected_value(&self) -> Option<&str> {
        self.secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if http::HeaderName::from_bytes(self.header_name.as_bytes()).is_err() {
            return Err(ValidationError::InvalidHeaderName(self.header_name.clone()));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            header_name: default_header_name(),
            secret: None,
        }
    }
}

fn default_header_name() -> String {
    "x-cron-trigger".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.header_name, "x-cron-trigger");
        assert!(config.expected_value().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_counts_as_unset() {
        let config = SchedulerConfig {
            secret: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.expected_value().is_none());

        let config = SchedulerConfig {
            secret: Some(Secret::new("s3cret".to_string())),
            ..Default::default()
        };
        assert_eq!(config.expected_value(), Some("s3cret"));
    }

    #[test]
    fn test_invalid_header_name() {
        let config = SchedulerConfig {
            header_name: "bad header".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHeaderName(_))
        ));
    }
}
