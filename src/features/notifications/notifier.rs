//! Notification delivery backends
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with desktop and log delivery

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fire-and-forget notification sink.
///
/// Implementations must not fail loudly: a sink that cannot show a
/// notification logs and returns.
pub trait Notifier: Send + Sync {
    fn deliver(&self, title: &str, body: &str);
}

/// Which backend to build from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    #[default]
    Desktop,
    Log,
}

impl std::str::FromStr for NotifierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(NotifierKind::Desktop),
            "log" => Ok(NotifierKind::Log),
            other => Err(anyhow::anyhow!(
                "Unknown notifier '{other}' (expected 'desktop' or 'log')"
            )),
        }
    }
}

impl std::fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifierKind::Desktop => write!(f, "desktop"),
            NotifierKind::Log => write!(f, "log"),
        }
    }
}

/// Build the configured notifier
pub fn build_notifier(kind: NotifierKind) -> Arc<dyn Notifier> {
    match kind {
        NotifierKind::Desktop => desktop_or_log(),
        NotifierKind::Log => Arc::new(LogNotifier),
    }
}

#[cfg(feature = "desktop")]
fn desktop_or_log() -> Arc<dyn Notifier> {
    Arc::new(DesktopNotifier::new())
}

#[cfg(not(feature = "desktop"))]
fn desktop_or_log() -> Arc<dyn Notifier> {
    warn!("Built without desktop notifications, falling back to log delivery");
    Arc::new(LogNotifier)
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, title: &str, body: &str) {
        info!("🔔 {title}: {body}");
    }
}

/// Native desktop notifications via the platform notification service
#[cfg(feature = "desktop")]
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

#[cfg(feature = "desktop")]
impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "desktop")]
impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "ttnotifier".to_string(),
        }
    }
}

#[cfg(feature = "desktop")]
impl Notifier for DesktopNotifier {
    fn deliver(&self, title: &str, body: &str) {
        let result = notify_rust::Notification::new()
            .appname(&self.app_name)
            .summary(title)
            .body(body)
            .show();

        match result {
            Ok(_) => info!("Delivered notification: {title}"),
            // No notification daemon or permission denied: nothing to surface
            Err(e) => warn!("Desktop notification not shown ({title}): {e}"),
        }
    }
}

/// Records deliveries in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(title, body)` pairs in delivery order
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn deliver(&self, title: &str, body: &str) {
        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.push((title.to_string(), body.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_kind_parse() {
        assert_eq!("desktop".parse::<NotifierKind>().unwrap(), NotifierKind::Desktop);
        assert_eq!(" LOG ".parse::<NotifierKind>().unwrap(), NotifierKind::Log);
        assert!("email".parse::<NotifierKind>().is_err());
        assert_eq!(NotifierKind::default(), NotifierKind::Desktop);
        assert_eq!(NotifierKind::Log.to_string(), "log");
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.deliver("A", "first");
        notifier.deliver("B", "second");

        let delivered = notifier.delivered();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0], ("A".to_string(), "first".to_string()));
        assert_eq!(delivered[1].1, "second");
    }

    #[test]
    fn test_arc_notifier_forwards() {
        let inner = Arc::new(RecordingNotifier::new());
        let shared: Arc<dyn Notifier> = inner.clone();
        shared.deliver("Title", "Body");
        assert_eq!(inner.delivered().len(), 1);
    }

    #[test]
    fn test_log_notifier_never_panics() {
        LogNotifier.deliver("Title", "Body");
        build_notifier(NotifierKind::Log).deliver("Title", "Body");
    }
}
