//! Actions requested by the chat assistant.
//!
//! The assistant replies with a tagged JSON action. Only `LOG_PERIOD` is
//! understood; it routes through the same mutation path as the UI.

use serde::Deserialize;

use crate::domain::foundation::{parse_calendar_date, CommandMetadata, ValidationError};

use super::cycle::{
    LogPeriodStartCommand, LogPeriodStartError, LogPeriodStartHandler, LogPeriodStartOutcome,
};

/// An action emitted by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssistantAction {
    /// Log a period starting on `date` (`YYYY-MM-DD`).
    LogPeriod { date: String },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantActionError {
    #[error("invalid action: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    LogPeriod(#[from] LogPeriodStartError),
}

pub struct AssistantActionHandler {
    log_period: LogPeriodStartHandler,
}

impl AssistantActionHandler {
    pub fn new(log_period: LogPeriodStartHandler) -> Self {
        Self { log_period }
    }

    pub async fn handle(
        &self,
        action: AssistantAction,
        metadata: CommandMetadata,
    ) -> Result<LogPeriodStartOutcome, AssistantActionError> {
        match action {
            AssistantAction::LogPeriod { date } => {
                let date = parse_calendar_date("date", &date)?;
                let outcome = self
                    .log_period
                    .handle(
                        LogPeriodStartCommand { date },
                        metadata.with_source("assistant"),
                    )
                    .await?;
                Ok(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::SessionEventBus;
    use crate::adapters::memory::InMemoryCycleDataRepository;
    use crate::adapters::SystemClock;
    use std::sync::Arc;

    fn handler(bus: &SessionEventBus) -> AssistantActionHandler {
        AssistantActionHandler::new(LogPeriodStartHandler::new(
            Arc::new(InMemoryCycleDataRepository::new()),
            Arc::new(bus.clone()),
            Arc::new(SystemClock),
        ))
    }

    #[test]
    fn parses_log_period_action() {
        let action: AssistantAction =
            serde_json::from_str(r#"{"type":"LOG_PERIOD","date":"2024-03-02"}"#).unwrap();
        assert_eq!(
            action,
            AssistantAction::LogPeriod {
                date: "2024-03-02".to_string()
            }
        );
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let parsed = serde_json::from_str::<AssistantAction>(r#"{"type":"DELETE_ALL"}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn log_period_goes_through_mutation_service() {
        let bus = SessionEventBus::new();
        let handler = handler(&bus);

        let outcome = handler
            .handle(
                AssistantAction::LogPeriod {
                    date: "2024-03-02".to_string(),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(outcome.is_created());
        assert!(bus.has_event("cycle.logged"));
        assert!(bus.has_event("cycle.first_logged"));
    }

    #[tokio::test]
    async fn malformed_date_is_rejected_before_writing() {
        let bus = SessionEventBus::new();
        let handler = handler(&bus);

        let err = handler
            .handle(
                AssistantAction::LogPeriod {
                    date: "March 2nd".to_string(),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantActionError::Invalid(_)));
        assert!(bus.published_events().is_empty());
    }
}
