//! Reminder polling loop
//!
//! Checks once on start, then every `interval` until shutdown. The timetable
//! is re-read from the store on each tick so edits made by other invocations
//! show up without restarting the watcher.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Reload timetable from the store on every tick
//! - 1.0.0: Initial release

use log::{info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use super::checker::{ClassNotification, ReminderChecker};
use super::clock::{Clock, LocalClock};
use crate::features::notifications::Notifier;
use crate::features::session::Session;
use crate::features::timetable::TimetableStore;

/// Default time between checks
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

pub struct ReminderScheduler {
    session: Session,
    store: Arc<dyn TimetableStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    checker: ReminderChecker,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        session: Session,
        store: Arc<dyn TimetableStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            store,
            notifier,
            clock: Arc::new(LocalClock),
            checker: ReminderChecker::default(),
            interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_checker(mut self, checker: ReminderChecker) -> Self {
        self.checker = checker;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// One check: refresh the timetable, then notify due classes
    pub fn tick(&mut self) -> Vec<ClassNotification> {
        if let Err(e) = self.session.reload(self.store.as_ref()) {
            warn!(
                "Failed to reload timetable for {}, using last copy: {e}",
                self.session.user_id()
            );
        }

        let now = self.clock.now();
        self.session
            .check_reminders(&self.checker, now, self.notifier.as_ref())
    }

    /// Run until `shutdown` resolves. Returns the session so callers can
    /// inspect what was sent.
    pub async fn run<F>(mut self, shutdown: F) -> Session
    where
        F: Future<Output = ()>,
    {
        info!(
            "Reminder checker started for {} (every {}s, {} min lead)",
            self.session.user_id(),
            self.interval.as_secs(),
            self.checker.lead_minutes()
        );

        let mut interval = tokio::time::interval(self.interval);
        // A late tick is not replayed: one check per period at most
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // First tick completes immediately
                _ = interval.tick() => {
                    self.tick();
                }
                _ = &mut shutdown => {
                    info!(
                        "Reminder checker stopped ({} reminders sent this session)",
                        self.session.notified().len()
                    );
                    break;
                }
            }
        }

        self.session
    }
}
