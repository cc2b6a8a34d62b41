//! # Feature: Notifications
//!
//! Delivery of reminder and test notifications to the desktop or the log.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod notifier;

pub use notifier::{build_notifier, LogNotifier, Notifier, NotifierKind};

#[cfg(feature = "desktop")]
pub use notifier::DesktopNotifier;

#[cfg(test)]
pub use notifier::RecordingNotifier;

/// Title of the manual test notification
pub const TEST_TITLE: &str = "✅ Notification Test";
/// Body of the manual test notification
pub const TEST_BODY: &str = "Your notification system is working!";

/// Send the manual test notification through `notifier`
pub fn send_test_notification(notifier: &dyn Notifier) {
    notifier.deliver(TEST_TITLE, TEST_BODY);
}
