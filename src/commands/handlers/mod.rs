//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add AccountHandler (login, logout, whoami)
//! - 1.0.0: TimetableHandler and ReminderHandler

pub mod account;
pub mod reminders;
pub mod timetable;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(account::AccountHandler),
        Arc::new(timetable::TimetableHandler),
        Arc::new(reminders::ReminderHandler),
    ]
}
