//! # Reminders Feature
//!
//! Class reminders fired a fixed number of minutes before each class starts.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Configurable lead time and check interval
//! - 1.0.0: Initial release with 30s polling and per-session dedup

pub mod checker;
pub mod clock;
pub mod scheduler;

pub use checker::{
    check_reminders, reminder_key, ClassNotification, NotifiedSet, ReminderChecker,
    DEFAULT_LEAD_MINUTES, REMINDER_TITLE,
};
pub use clock::{Clock, LocalClock};
pub use scheduler::{ReminderScheduler, DEFAULT_CHECK_INTERVAL};
