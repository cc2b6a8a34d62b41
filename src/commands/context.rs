//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use dialoguer::Confirm;
use log::debug;
use std::sync::{Arc, Mutex};

use crate::core::Config;
use crate::features::notifications::{build_notifier, Notifier};
use crate::features::reminders::{Clock, LocalClock, ReminderChecker};
use crate::features::session::Session;
use crate::features::timetable::{JsonFileStore, TimetableStore};

/// Where handler output goes
#[derive(Clone)]
enum Output {
    Stdout,
    Captured(Arc<Mutex<Vec<String>>>),
}

/// Shared context for all command handlers
///
/// Holds configuration and the collaborators every handler needs:
/// the timetable store, the notifier and the clock.
#[derive(Clone)]
pub struct CommandContext {
    pub config: Config,
    pub store: Arc<dyn TimetableStore>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    /// Identifier from `--user`, overriding the remembered one
    pub user_override: Option<String>,
    interactive: bool,
    output: Output,
}

impl CommandContext {
    /// Build the production context from configuration
    pub fn new(config: Config, user_override: Option<String>) -> Self {
        let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
        let notifier = build_notifier(config.notifier);
        Self {
            config,
            store,
            notifier,
            clock: Arc::new(LocalClock),
            user_override,
            interactive: true,
            output: Output::Stdout,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn TimetableStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Collect output in memory and never prompt
    pub fn captured(mut self) -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        self.output = Output::Captured(lines.clone());
        self.interactive = false;
        (self, lines)
    }

    /// Print a line of user-facing output
    pub fn say(&self, text: impl AsRef<str>) {
        match &self.output {
            Output::Stdout => println!("{}", text.as_ref()),
            Output::Captured(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(text.as_ref().to_string());
                }
            }
        }
    }

    /// Ask a yes/no question. `assume_yes` skips the prompt; without a
    /// terminal the answer is no.
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool> {
        if assume_yes {
            return Ok(true);
        }
        if !self.interactive {
            debug!("Declining '{prompt}' without an interactive terminal");
            return Ok(false);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// The session named by `--user`, or the remembered identifier
    pub fn session(&self) -> Result<Session> {
        if let Some(user_id) = &self.user_override {
            return Session::open(self.store.as_ref(), user_id);
        }
        Session::resume(self.store.as_ref())?.ok_or_else(|| {
            anyhow::anyhow!("Not logged in. Run `ttnotifier login <id>` first.")
        })
    }

    pub fn checker(&self) -> ReminderChecker {
        ReminderChecker::new(self.config.lead_minutes)
    }
}
