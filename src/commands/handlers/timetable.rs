//! Timetable command handlers
//!
//! Handles: add, remove, list, today
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Numbered rows so `remove` can target the sorted position
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::cli::Command;
use crate::commands::context::CommandContext;
use crate::commands::handler::CommandHandler;
use crate::features::timetable::{AgendaEntry, Day, WeeklyTimetable};

/// Handler for timetable editing and viewing
pub struct TimetableHandler;

#[async_trait]
impl CommandHandler for TimetableHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "remove", "list", "today"]
    }

    async fn handle(&self, ctx: Arc<CommandContext>, command: &Command) -> Result<()> {
        match command {
            Command::Add { day, time, subject } => self.handle_add(&ctx, *day, time, subject),
            Command::Remove { day, index, yes } => self.handle_remove(&ctx, *day, *index, *yes),
            Command::List => self.handle_list(&ctx),
            Command::Today => self.handle_today(&ctx),
            _ => Ok(()),
        }
    }
}

impl TimetableHandler {
    fn handle_add(&self, ctx: &CommandContext, day: Day, time: &str, subject: &str) -> Result<()> {
        let mut session = ctx.session()?;
        let class = session.add_class(ctx.store.as_ref(), day, time, subject)?;
        ctx.say(format!(
            "✅ Added {} on {day} at {}",
            class.subject, class.time
        ));
        Ok(())
    }

    /// `index` is 1-based, matching the numbers shown by `list`
    fn handle_remove(&self, ctx: &CommandContext, day: Day, index: usize, yes: bool) -> Result<()> {
        if index == 0 {
            anyhow::bail!("Class numbers start at 1");
        }

        let mut session = ctx.session()?;
        let target = session
            .timetable()
            .classes_sorted(day)
            .into_iter()
            .nth(index - 1)
            .ok_or_else(|| anyhow::anyhow!("No class #{index} on {day}"))?;

        let prompt = format!("Delete {} on {day} at {}?", target.subject, target.time);
        if !ctx.confirm(&prompt, yes)? {
            ctx.say("Cancelled.");
            return Ok(());
        }

        let removed = session.remove_class(ctx.store.as_ref(), day, index - 1)?;
        ctx.say(format!(
            "🗑️ Deleted {} on {day} at {}",
            removed.subject, removed.time
        ));
        Ok(())
    }

    fn handle_list(&self, ctx: &CommandContext) -> Result<()> {
        let session = ctx.session()?;
        ctx.say(format_table(session.timetable()));
        Ok(())
    }

    fn handle_today(&self, ctx: &CommandContext) -> Result<()> {
        let session = ctx.session()?;
        let (today, entries) = session.timetable().today_agenda(ctx.clock.now());
        ctx.say(format_agenda(today, &entries));
        Ok(())
    }
}

/// Render the week as a table, numbering classes within each day
pub fn format_table(timetable: &WeeklyTimetable) -> String {
    if timetable.total_classes() == 0 {
        return "No classes yet. Add one with `ttnotifier add`.".to_string();
    }

    let mut out = format!("{:<4} {:<10} {:<6} {}\n", "#", "Day", "Time", "Subject");
    for day in Day::ALL {
        for (i, class) in timetable.classes_sorted(day).iter().enumerate() {
            out.push_str(&format!(
                "{:<4} {:<10} {:<6} {}\n",
                i + 1,
                day.name(),
                class.time,
                class.subject
            ));
        }
    }
    out.trim_end().to_string()
}

/// Render today's agenda; upcoming classes are marked with `*`
pub fn format_agenda(today: Day, entries: &[AgendaEntry]) -> String {
    let mut out = format!("📅 Today ({today})");
    if entries.is_empty() {
        out.push_str("\nNo classes today.");
        return out;
    }

    for entry in entries {
        let marker = if entry.upcoming { '*' } else { ' ' };
        out.push_str(&format!(
            "\n{marker} {} — {}",
            entry.class.time, entry.class.subject
        ));
    }
    out
}
