//! # Command System
//!
//! Command-line subcommands and their handlers.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Handler trait, shared context and registry
//! - 1.0.0: Initial command set

pub mod cli;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use cli::{Cli, Command};
pub use context::CommandContext;
pub use handler::CommandHandler;
pub use registry::CommandRegistry;

use anyhow::Result;
use std::sync::Arc;

use crate::core::Config;

/// Run a parsed command line against the given configuration
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let ctx = Arc::new(CommandContext::new(config, cli.user));
    CommandRegistry::with_all_handlers()
        .dispatch(ctx, &cli.command)
        .await
}
