// Core layer - shared configuration
pub mod core;

// Features layer - timetable, sessions, reminders, notifications
pub mod features;

// Application layer - command-line handlers
pub mod commands;

pub use crate::core::Config;

pub use features::{
    // Notifications
    build_notifier, Notifier, NotifierKind,
    // Reminders
    check_reminders, NotifiedSet, ReminderChecker, ReminderScheduler,
    // Session
    Session,
    // Timetable
    Day, JsonFileStore, ScheduledClass, TimetableStore, WeeklyTimetable,
};
