//! Command-line definitions
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add `--user` override and `whoami`
//! - 1.0.0: Initial command set

use clap::{Parser, Subcommand};

use crate::features::timetable::Day;

/// Weekly class timetable with reminders before each class.
#[derive(Debug, Parser)]
#[command(name = "ttnotifier", version, about)]
pub struct Cli {
    /// Act as this identifier instead of the remembered one
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in with any identifier (name or email) and remember it
    Login {
        id: String,
    },

    /// Forget the remembered identifier
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the remembered identifier
    Whoami,

    /// Add a class to the timetable
    Add {
        #[arg(short, long)]
        day: Day,
        /// Start time, 24-hour HH:MM
        #[arg(short, long)]
        time: String,
        #[arg(short, long)]
        subject: String,
    },

    /// Delete a class by its number in `list` for that day
    Remove {
        #[arg(short, long)]
        day: Day,
        /// 1-based position within the day
        index: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the whole week
    List,

    /// Show today's classes, marking those still to come
    Today,

    /// Stay running and send reminders before each class
    Watch,

    /// Send a test notification
    TestNotify,
}

impl Command {
    /// Name used for handler dispatch
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout { .. } => "logout",
            Command::Whoami => "whoami",
            Command::Add { .. } => "add",
            Command::Remove { .. } => "remove",
            Command::List => "list",
            Command::Today => "today",
            Command::Watch => "watch",
            Command::TestNotify => "test-notify",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "ttnotifier", "add", "--day", "monday", "--time", "09:00", "--subject", "Math",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Add {
                day: Day::Monday,
                time: "09:00".to_string(),
                subject: "Math".to_string(),
            }
        );
        assert_eq!(cli.command.name(), "add");
    }

    #[test]
    fn test_parse_global_user_flag() {
        let cli = Cli::try_parse_from(["ttnotifier", "today", "--user", "alice"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert_eq!(cli.command, Command::Today);
    }

    #[test]
    fn test_parse_remove_with_yes() {
        let cli =
            Cli::try_parse_from(["ttnotifier", "remove", "-d", "Fri", "2", "--yes"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Remove {
                day: Day::Friday,
                index: 2,
                yes: true,
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_day() {
        assert!(Cli::try_parse_from([
            "ttnotifier", "add", "-d", "Someday", "-t", "09:00", "-s", "Math"
        ])
        .is_err());
    }

    #[test]
    fn test_test_notify_name() {
        let cli = Cli::try_parse_from(["ttnotifier", "test-notify"]).unwrap();
        assert_eq!(cli.command.name(), "test-notify");
    }
}
