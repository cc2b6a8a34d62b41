//! # Features
//!
//! - **notifications**: desktop and log delivery
//! - **reminders**: the reminder check and its polling loop
//! - **session**: signed-in identifier with its timetable
//! - **timetable**: weekly classes and their storage

pub mod notifications;
pub mod reminders;
pub mod session;
pub mod timetable;

pub use notifications::{build_notifier, Notifier, NotifierKind};
pub use reminders::{check_reminders, NotifiedSet, ReminderChecker, ReminderScheduler};
pub use session::Session;
pub use timetable::{Day, JsonFileStore, ScheduledClass, TimetableStore, WeeklyTimetable};

