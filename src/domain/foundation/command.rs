//! Command infrastructure for handlers.
//!
//! `CommandMetadata` carries the acting user plus correlation context through
//! a command and onto every event the command emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, UserId};

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user whose data the command touches.
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Origin of the command ("api", "assistant", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Stamps an outgoing event with this command's context.
    pub fn stamp(&self, envelope: EventEnvelope) -> EventEnvelope {
        envelope
            .with_correlation_id(self.correlation_id())
            .with_user_id(self.user_id.to_string())
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a test user ID.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-user-123").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_creates_with_user_id() {
        let user_id = UserId::new("user-123").unwrap();
        let metadata = CommandMetadata::new(user_id.clone());

        assert_eq!(metadata.user_id, user_id);
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_is_generated_when_missing() {
        let metadata = CommandMetadata::new(UserId::new("u").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn stamp_copies_correlation_and_user() {
        let metadata = CommandMetadata::test_fixture();
        let envelope = metadata.stamp(EventEnvelope::new("t", "a", "A", json!({})));

        assert_eq!(
            envelope.metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
        assert_eq!(envelope.metadata.user_id.as_deref(), Some("test-user-123"));
    }
}
