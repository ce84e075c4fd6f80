//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::events::SessionEventBus;
use crate::adapters::memory::{
    InMemoryBadgeRepository, InMemoryCycleDataRepository, InMemoryDailyEventRepository,
    InMemoryLateNoticeStore, InMemoryNotificationRepository,
};
use crate::adapters::postgres::{
    PostgresBadgeRepository, PostgresCycleDataRepository, PostgresDailyEventRepository,
    PostgresLateNoticeStore, PostgresNotificationRepository,
};
use crate::adapters::{EnglishStrings, SystemClock};
use crate::application::handlers::{
    AssistantActionHandler, EraseUserDataHandler, GetCycleOverviewHandler, GetDailyEventsHandler,
    LateCycleCheckConfig, LateCycleCheckHandler, ListNotificationsHandler, LogDailyEventHandler,
    LogPeriodStartHandler, MarkNotificationReadHandler, RecordEngagementHandler,
    SetCycleTypeHandler, TogglePeriodEndHandler,
};
use crate::application::{Effect, EventSession, SessionServices};
use crate::config::{AppConfig, Environment, SchedulerConfig};
use crate::ports::{
    BadgeRepository, Clock, CycleDataRepository, DailyEventRepository, EventPublisher,
    LateNoticeStore, LocaleStrings, NotificationRepository,
};

/// The persistence ports, all backed by the same store.
#[derive(Clone)]
pub struct Stores {
    pub cycle_data: Arc<dyn CycleDataRepository>,
    pub daily_events: Arc<dyn DailyEventRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub badges: Arc<dyn BadgeRepository>,
    pub late_notices: Arc<dyn LateNoticeStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            cycle_data: Arc::new(InMemoryCycleDataRepository::new()),
            daily_events: Arc::new(InMemoryDailyEventRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            badges: Arc::new(InMemoryBadgeRepository::new()),
            late_notices: Arc::new(InMemoryLateNoticeStore::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            cycle_data: Arc::new(PostgresCycleDataRepository::new(pool.clone())),
            daily_events: Arc::new(PostgresDailyEventRepository::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
            badges: Arc::new(PostgresBadgeRepository::new(pool.clone())),
            late_notices: Arc::new(PostgresLateNoticeStore::new(pool)),
        }
    }
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub clock: Arc<dyn Clock>,
    pub strings: Arc<dyn LocaleStrings>,
    pub late_check: LateCycleCheckConfig,
    pub scheduler: SchedulerConfig,
    pub environment: Environment,
}

impl AppState {
    pub fn new(stores: Stores, config: &AppConfig) -> Self {
        Self {
            stores,
            clock: Arc::new(SystemClock),
            strings: Arc::new(EnglishStrings),
            late_check: LateCycleCheckConfig {
                grace_days: config.tracker.grace_days,
                concurrency: config.tracker.sweep_concurrency,
                link: config.tracker.late_notice_link.clone(),
            },
            scheduler: config.scheduler.clone(),
            environment: config.server.environment,
        }
    }

    /// Replaces the clock (tests pin "today").
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Opens a fresh event session for one request.
    pub fn open_session(&self) -> RequestSession {
        let bus = Arc::new(SessionEventBus::new());
        let services = SessionServices {
            badges: self.stores.badges.clone(),
            clock: self.clock.clone(),
            strings: self.strings.clone(),
        };
        let session = EventSession::open(bus.clone(), &services);
        RequestSession { bus, session }
    }

    // === Handler factories ===

    pub fn cycle_overview_handler(&self) -> GetCycleOverviewHandler {
        GetCycleOverviewHandler::new(self.stores.cycle_data.clone(), self.clock.clone())
    }

    pub fn log_period_start_handler(
        &self,
        publisher: Arc<dyn EventPublisher>,
    ) -> LogPeriodStartHandler {
        LogPeriodStartHandler::new(self.stores.cycle_data.clone(), publisher, self.clock.clone())
    }

    pub fn toggle_period_end_handler(
        &self,
        publisher: Arc<dyn EventPublisher>,
    ) -> TogglePeriodEndHandler {
        TogglePeriodEndHandler::new(self.stores.cycle_data.clone(), publisher, self.clock.clone())
    }

    pub fn set_cycle_type_handler(&self) -> SetCycleTypeHandler {
        SetCycleTypeHandler::new(self.stores.cycle_data.clone())
    }

    pub fn assistant_handler(&self, publisher: Arc<dyn EventPublisher>) -> AssistantActionHandler {
        AssistantActionHandler::new(self.log_period_start_handler(publisher))
    }

    pub fn daily_events_handler(&self) -> GetDailyEventsHandler {
        GetDailyEventsHandler::new(self.stores.daily_events.clone())
    }

    pub fn log_daily_event_handler(
        &self,
        publisher: Arc<dyn EventPublisher>,
    ) -> LogDailyEventHandler {
        LogDailyEventHandler::new(self.stores.daily_events.clone(), publisher, self.clock.clone())
    }

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.stores.notifications.clone())
    }

    pub fn mark_notification_read_handler(&self) -> MarkNotificationReadHandler {
        MarkNotificationReadHandler::new(self.stores.notifications.clone())
    }

    pub fn engagement_handler(&self, publisher: Arc<dyn EventPublisher>) -> RecordEngagementHandler {
        RecordEngagementHandler::new(publisher, self.clock.clone())
    }

    pub fn erase_user_data_handler(&self) -> EraseUserDataHandler {
        EraseUserDataHandler::new(
            self.stores.cycle_data.clone(),
            self.stores.daily_events.clone(),
            self.stores.notifications.clone(),
            self.stores.badges.clone(),
            self.stores.late_notices.clone(),
        )
    }

    pub fn late_cycle_check_handler(&self) -> LateCycleCheckHandler {
        LateCycleCheckHandler::new(
            self.stores.cycle_data.clone(),
            self.stores.notifications.clone(),
            self.stores.late_notices.clone(),
            self.clock.clone(),
            self.strings.clone(),
            self.late_check.clone(),
        )
    }
}

/// A request's bus plus its subscriber wiring.
pub struct RequestSession {
    bus: Arc<SessionEventBus>,
    session: EventSession,
}

impl RequestSession {
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.session.publisher()
    }

    /// Tears the session down and returns the client-facing effects.
    pub fn close(self) -> Vec<Effect> {
        let effects = self.session.close();
        self.bus.shutdown();
        effects
    }
}
