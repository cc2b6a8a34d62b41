//! Reminder check
//!
//! Compares the current minute against today's classes and fires at most one
//! notification per class per session. A class qualifies only when it starts
//! exactly `lead_minutes` from now; a minute in which no check runs is never
//! made up later.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{NaiveTime, Timelike};
use log::{debug, info};
use std::collections::HashSet;

use crate::features::notifications::Notifier;
use crate::features::timetable::{Day, ScheduledClass};

/// Title used for every class reminder
pub const REMINDER_TITLE: &str = "Class Reminder";
/// Minutes before class start at which the reminder fires
pub const DEFAULT_LEAD_MINUTES: i64 = 10;

/// Dedup key `"<Day>:<HH:MM>:<subject>"`
pub fn reminder_key(day: Day, class: &ScheduledClass) -> String {
    format!("{day}:{}:{}", class.time, class.subject)
}

/// Keys of classes already reminded this session. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct NotifiedSet {
    keys: HashSet<String>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if the key was not present before
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A reminder that was delivered during a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNotification {
    pub key: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderChecker {
    lead_minutes: i64,
}

impl Default for ReminderChecker {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_MINUTES)
    }
}

impl ReminderChecker {
    pub fn new(lead_minutes: i64) -> Self {
        Self { lead_minutes }
    }

    pub fn lead_minutes(&self) -> i64 {
        self.lead_minutes
    }

    /// Deliver reminders for every class starting exactly `lead_minutes`
    /// after `now` that has not been reminded yet, recording each in
    /// `notified`. Entries with unparseable times are skipped.
    pub fn check(
        &self,
        now: NaiveTime,
        today: Day,
        classes: &[ScheduledClass],
        notified: &mut NotifiedSet,
        notifier: &dyn Notifier,
    ) -> Vec<ClassNotification> {
        let current_minutes = i64::from(now.hour() * 60 + now.minute());
        let mut fired = Vec::new();

        for class in classes {
            let Some(class_minutes) = class.minutes() else {
                debug!(
                    "Skipping {today} class '{}' with malformed time '{}'",
                    class.subject, class.time
                );
                continue;
            };

            if i64::from(class_minutes) - current_minutes != self.lead_minutes {
                continue;
            }

            let key = reminder_key(today, class);
            if notified.contains(&key) {
                continue;
            }

            let body = self.body_for(&class.subject);
            notifier.deliver(REMINDER_TITLE, &body);
            info!("⏰ Reminder sent for {key}");
            notified.insert(key.clone());

            fired.push(ClassNotification {
                key,
                title: REMINDER_TITLE.to_string(),
                body,
            });
        }

        fired
    }

    fn body_for(&self, subject: &str) -> String {
        let unit = if self.lead_minutes == 1 { "minute" } else { "minutes" };
        format!("{subject} starts in {} {unit}!", self.lead_minutes)
    }
}

/// Run a check with the default 10-minute lead
pub fn check_reminders(
    now: NaiveTime,
    today: Day,
    classes: &[ScheduledClass],
    notified: &mut NotifiedSet,
    notifier: &dyn Notifier,
) -> Vec<ClassNotification> {
    ReminderChecker::default().check(now, today, classes, notified, notifier)
}
