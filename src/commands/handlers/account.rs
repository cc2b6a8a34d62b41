//! Account command handlers
//!
//! Handles: login, logout, whoami
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::cli::Command;
use crate::commands::context::CommandContext;
use crate::commands::handler::CommandHandler;
use crate::features::session::Session;

/// Handler for identity commands
pub struct AccountHandler;

#[async_trait]
impl CommandHandler for AccountHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["login", "logout", "whoami"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, command: &Command) -> Result<()> {
        match command {
            Command::Login { id } => self.handle_login(&ctx, id),
            Command::Logout { yes } => self.handle_logout(&ctx, *yes),
            Command::Whoami => self.handle_whoami(&ctx),
            _ => Ok(()),
        }
    }
}

impl AccountHandler {
    fn handle_login(&self, ctx: &CommandContext, id: &str) -> Result<()> {
        let session = Session::login(ctx.store.as_ref(), id)?;
        let total = session.timetable().total_classes();

        ctx.say(format!("👋 Logged in as {}", session.user_id()));
        ctx.say(format!(
            "📋 {total} class{} on your timetable",
            if total == 1 { "" } else { "es" }
        ));
        ctx.say(
            "Run `ttnotifier test-notify` to check that notifications reach you, \
             then `ttnotifier watch` to get reminders.",
        );
        Ok(())
    }

    fn handle_logout(&self, ctx: &CommandContext, yes: bool) -> Result<()> {
        let Some(session) = Session::resume(ctx.store.as_ref())? else {
            ctx.say("Not logged in.");
            return Ok(());
        };

        if !ctx.confirm("Logout?", yes)? {
            ctx.say("Cancelled.");
            return Ok(());
        }

        let user_id = session.logout(ctx.store.as_ref())?;
        info!("Logout command completed for {user_id}");
        ctx.say(format!("Logged out {user_id}."));
        Ok(())
    }

    fn handle_whoami(&self, ctx: &CommandContext) -> Result<()> {
        if let Some(user_id) = &ctx.user_override {
            ctx.say(user_id.trim());
            return Ok(());
        }
        match ctx.store.last_user_id()? {
            Some(user_id) => ctx.say(user_id),
            None => ctx.say("Not logged in."),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use std::sync::Mutex;

    fn context(dir: &std::path::Path) -> (Arc<CommandContext>, Arc<Mutex<Vec<String>>>) {
        let config = Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        };
        let (ctx, lines) = CommandContext::new(config, None).captured();
        (Arc::new(ctx), lines)
    }

    #[test]
    fn test_account_handler_commands() {
        let names = AccountHandler.command_names();
        assert_eq!(names, &["login", "logout", "whoami"]);
    }

    #[tokio::test]
    async fn test_login_then_whoami() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, lines) = context(dir.path());

        AccountHandler
            .handle(ctx.clone(), &Command::Login { id: "alice".into() })
            .await
            .unwrap();
        AccountHandler.handle(ctx.clone(), &Command::Whoami).await.unwrap();

        let lines = lines.lock().unwrap();
        assert!(lines[0].contains("alice"));
        assert!(lines[1].contains("0 classes"));
        assert_eq!(lines.last().unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_login_blank_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = context(dir.path());

        let result = AccountHandler
            .handle(ctx, &Command::Login { id: "  ".into() })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_logout_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, lines) = context(dir.path());
        Session::login(ctx.store.as_ref(), "alice").unwrap();

        AccountHandler
            .handle(ctx.clone(), &Command::Logout { yes: false })
            .await
            .unwrap();
        assert_eq!(ctx.store.last_user_id().unwrap(), Some("alice".into()));
        assert_eq!(lines.lock().unwrap().last().unwrap(), "Cancelled.");

        AccountHandler
            .handle(ctx.clone(), &Command::Logout { yes: true })
            .await
            .unwrap();
        assert_eq!(ctx.store.last_user_id().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_when_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, lines) = context(dir.path());

        AccountHandler
            .handle(ctx, &Command::Logout { yes: true })
            .await
            .unwrap();
        assert_eq!(lines.lock().unwrap()[0], "Not logged in.");
    }
}
