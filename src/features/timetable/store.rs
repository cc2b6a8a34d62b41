//! Timetable persistence
//!
//! One JSON document per user identifier, plus a small marker file that
//! remembers the last identifier used on this machine.
//!
//! Documents are read entry by entry: a malformed class or an unknown day
//! is skipped with a warning and the rest of the week still loads. A document
//! that is not a JSON object at all is an error, and it is moved aside to
//! `*.corrupt` before anything is saved over it.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Skip bad entries instead of dropping the document; keep unreadable documents
//! - 1.1.0: Escape identifiers into file names instead of rejecting them
//! - 1.0.0: Initial release with JSON file store

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::{Day, ScheduledClass, WeeklyTimetable};

/// File name prefix for per-user timetable documents
pub const USER_PREFIX: &str = "ttnotifier_user_";
/// File holding the last identifier used
pub const LAST_ID_FILE: &str = "ttnotifier_lastid";
/// Longest escaped identifier that still fits common file name limits
pub const MAX_ESCAPED_ID_LEN: usize = 200;

/// Storage backend for timetables
pub trait TimetableStore: Send + Sync {
    /// Load the timetable for `user_id`, falling back to the default week
    /// when nothing is stored yet. Fails on a document that cannot be read
    /// at all; see [`is_unreadable_document`].
    fn load_timetable(&self, user_id: &str) -> Result<WeeklyTimetable>;

    fn save_timetable(&self, user_id: &str, timetable: &WeeklyTimetable) -> Result<()>;

    fn last_user_id(&self) -> Result<Option<String>>;

    fn remember_user_id(&self, user_id: &str) -> Result<()>;

    fn forget_user_id(&self) -> Result<()>;
}

/// JSON files in a single data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding `user_id`'s timetable
    pub fn timetable_path(&self, user_id: &str) -> Result<PathBuf> {
        let escaped = escape_user_id(user_id);
        if escaped.len() > MAX_ESCAPED_ID_LEN {
            anyhow::bail!(
                "Identifier is too long to store ({} bytes once escaped, max {MAX_ESCAPED_ID_LEN}). \
                 Use a shorter id or email.",
                escaped.len()
            );
        }
        Ok(self.dir.join(format!("{USER_PREFIX}{escaped}.json")))
    }

    /// Move a stored document aside unless it reads back cleanly
    fn keep_unclean_document(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if serde_json::from_str::<WeeklyTimetable>(&raw).is_ok() {
            return Ok(());
        }

        let backup = path.with_extension("json.corrupt");
        fs::rename(path, &backup)
            .with_context(|| format!("Failed to move {} aside", path.display()))?;
        warn!(
            "Kept the previous unreadable timetable as {}",
            backup.display()
        );
        Ok(())
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {}", self.dir.display()))
    }
}

impl TimetableStore for JsonFileStore {
    fn load_timetable(&self, user_id: &str) -> Result<WeeklyTimetable> {
        let path = self.timetable_path(user_id)?;
        if !path.exists() {
            debug!("No timetable stored for {user_id}, starting empty");
            return Ok(WeeklyTimetable::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document: Map<String, Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Unreadable timetable at {}", path.display()))?;

        Ok(timetable_from_document(document, &path))
    }

    fn save_timetable(&self, user_id: &str, timetable: &WeeklyTimetable) -> Result<()> {
        self.ensure_dir()?;
        let path = self.timetable_path(user_id)?;
        let json = serde_json::to_string(timetable)?;
        self.keep_unclean_document(&path)?;

        // A running watcher may read this file at any moment; replace it atomically
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved timetable for {user_id} to {}", path.display());
        Ok(())
    }

    fn last_user_id(&self) -> Result<Option<String>> {
        let path = self.dir.join(LAST_ID_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let id = raw.trim();
        Ok((!id.is_empty()).then(|| id.to_string()))
    }

    fn remember_user_id(&self, user_id: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(LAST_ID_FILE);
        fs::write(&path, user_id).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn forget_user_id(&self) -> Result<()> {
        let path = self.dir.join(LAST_ID_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// True when `err` came from a stored document that is not a JSON object
pub fn is_unreadable_document(err: &anyhow::Error) -> bool {
    err.downcast_ref::<serde_json::Error>().is_some()
}

/// Build a timetable from a parsed document, skipping what does not fit
fn timetable_from_document(document: Map<String, Value>, path: &Path) -> WeeklyTimetable {
    let mut days: BTreeMap<Day, Vec<ScheduledClass>> = BTreeMap::new();

    for (key, entries) in document {
        let Ok(day) = key.parse::<Day>() else {
            warn!("Skipping unknown day '{key}' in {}", path.display());
            continue;
        };
        let Value::Array(entries) = entries else {
            warn!("Skipping {day} in {}: expected a list of classes", path.display());
            continue;
        };

        let classes = days.entry(day).or_default();
        for entry in entries {
            match serde_json::from_value::<ScheduledClass>(entry.clone()) {
                Ok(class) => classes.push(class),
                Err(e) => warn!("Skipping {day} entry {entry} in {}: {e}", path.display()),
            }
        }
    }

    WeeklyTimetable::from_days(days)
}

/// Map an arbitrary identifier onto a portable file name.
///
/// ASCII alphanumerics plus `-`, `.` and `@` pass through; every other byte
/// becomes `_XX` (hex), so distinct identifiers never share a file.
pub fn escape_user_id(user_id: &str) -> String {
    let mut out = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'@' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("_{byte:02X}")),
        }
    }
    out
}
