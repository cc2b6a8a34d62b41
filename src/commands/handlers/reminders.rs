//! Reminder command handlers
//!
//! Handles: watch, test-notify
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use std::future::Future;
use std::sync::Arc;

use crate::commands::cli::Command;
use crate::commands::context::CommandContext;
use crate::commands::handler::CommandHandler;
use crate::features::notifications::send_test_notification;
use crate::features::reminders::ReminderScheduler;

/// Handler for reminder delivery commands
pub struct ReminderHandler;

#[async_trait]
impl CommandHandler for ReminderHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["watch", "test-notify"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, command: &Command) -> Result<()> {
        match command {
            Command::Watch => self.handle_watch(&ctx, ctrl_c()).await,
            Command::TestNotify => self.handle_test_notify(&ctx),
            _ => Ok(()),
        }
    }
}

impl ReminderHandler {
    /// Run the reminder loop for the current session until `shutdown`
    async fn handle_watch<F>(&self, ctx: &CommandContext, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let session = ctx.session()?;
        ctx.say(format!(
            "⏰ Watching reminders for {} ({} min before each class). Press Ctrl+C to stop.",
            session.user_id(),
            ctx.config.lead_minutes
        ));

        let scheduler = ReminderScheduler::new(session, ctx.store.clone(), ctx.notifier.clone())
            .with_clock(ctx.clock.clone())
            .with_checker(ctx.checker())
            .with_interval(ctx.config.check_interval());

        let session = scheduler.run(shutdown).await;
        let sent = session.notified().len();
        ctx.say(format!(
            "Stopped. {sent} reminder{} sent this session.",
            if sent == 1 { "" } else { "s" }
        ));
        Ok(())
    }

    fn handle_test_notify(&self, ctx: &CommandContext) -> Result<()> {
        send_test_notification(ctx.notifier.as_ref());
        info!("Test notification sent via {}", ctx.config.notifier);
        ctx.say("Test notification sent. If nothing appeared, check that desktop notifications are allowed.");
        Ok(())
    }
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed it never
/// resolves, so the watcher keeps running.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::features::notifications::RecordingNotifier;
    use crate::features::reminders::clock::FixedClock;
    use crate::features::session::Session;
    use crate::features::timetable::Day;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Harness {
        _dir: tempfile::TempDir,
        ctx: Arc<CommandContext>,
        lines: Arc<Mutex<Vec<String>>>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(login: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            check_interval_secs: 1,
            ..Config::default()
        };
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 50, 0)
            .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let (ctx, lines) = CommandContext::new(config, None)
            .with_notifier(notifier.clone())
            .with_clock(Arc::new(FixedClock::new(now)))
            .captured();

        if login {
            let mut session = Session::login(ctx.store.as_ref(), "alice").unwrap();
            session
                .add_class(ctx.store.as_ref(), Day::Monday, "09:00", "Math")
                .unwrap();
        }

        Harness {
            _dir: dir,
            ctx: Arc::new(ctx),
            lines,
            notifier,
        }
    }

    #[test]
    fn test_reminder_handler_commands() {
        assert_eq!(ReminderHandler.command_names(), &["watch", "test-notify"]);
    }

    #[tokio::test]
    async fn test_test_notify_delivers() {
        let h = harness(false);
        ReminderHandler
            .handle(h.ctx.clone(), &Command::TestNotify)
            .await
            .unwrap();

        let delivered = h.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].0.contains("Notification Test"));
        assert!(h.lines.lock().unwrap()[0].contains("Test notification sent"));
    }

    #[tokio::test]
    async fn test_watch_requires_login() {
        let h = harness(false);
        let result = ReminderHandler
            .handle_watch(&h.ctx, async {})
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_watch_sends_due_reminder_and_reports() {
        let h = harness(true);
        ReminderHandler
            .handle_watch(&h.ctx, tokio::time::sleep(Duration::from_millis(50)))
            .await
            .unwrap();

        let delivered = h.notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].1, "Math starts in 10 minutes!");

        let lines = h.lines.lock().unwrap();
        assert!(lines[0].contains("Watching reminders for alice"));
        assert_eq!(lines.last().unwrap(), "Stopped. 1 reminder sent this session.");
    }
}
