//! # Feature: Timetable
//!
//! Weekly class timetable per user identifier, persisted as JSON.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Sunday support, escaped file names for arbitrary identifiers
//! - 1.0.0: Initial release with add/remove and today's agenda

pub mod model;
pub mod store;

pub use model::{
    minutes_of, validate_time, AgendaEntry, Day, ScheduledClass, WeeklyTimetable, DEFAULT_DAYS,
};
pub use store::{JsonFileStore, TimetableStore};
