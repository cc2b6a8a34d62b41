//! Command handler trait and infrastructure
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::cli::Command;
use super::context::CommandContext;

/// Trait for command handlers
///
/// Each handler processes one or more subcommands. Handlers are registered
/// with a CommandRegistry and dispatched by command name.
///
/// # Example
///
/// ```ignore
/// pub struct WhoamiHandler;
///
/// #[async_trait]
/// impl CommandHandler for WhoamiHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["whoami"]
///     }
///
///     async fn handle(&self, ctx: Arc<CommandContext>, command: &Command) -> Result<()> {
///         ctx.say(ctx.session()?.user_id());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command
    async fn handle(&self, ctx: Arc<CommandContext>, command: &Command) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn CommandHandler) {}
}
