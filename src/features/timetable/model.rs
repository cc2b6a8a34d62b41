//! Timetable domain types
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Sunday accepted as a regular day, sorted-view removal
//! - 1.0.0: Initial release with weekly timetable and today's agenda

use anyhow::Result;
use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Days present in a freshly created timetable
pub const DEFAULT_DAYS: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

/// A weekday, serialized by its full English name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

impl FromStr for Day {
    type Err = anyhow::Error;

    /// Accepts full names and three-letter abbreviations, case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|day| {
                let name = day.name().to_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown day: {s}"))
    }
}

/// A single class on the timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledClass {
    /// Start time as zero-padded 24-hour `HH:MM`
    pub time: String,
    pub subject: String,
}

impl ScheduledClass {
    /// Validate and build a class from raw user input
    pub fn new(time: &str, subject: &str) -> Result<Self> {
        let time = time.trim();
        let subject = subject.trim();

        if time.is_empty() || subject.is_empty() {
            anyhow::bail!("Enter both time and subject.");
        }
        validate_time(time)?;

        Ok(Self {
            time: time.to_string(),
            subject: subject.to_string(),
        })
    }

    /// Minutes since midnight, or `None` if the stored time is malformed
    pub fn minutes(&self) -> Option<u32> {
        minutes_of(&self.time)
    }
}

/// Check that `time` is a zero-padded `HH:MM` within a single day
pub fn validate_time(time: &str) -> Result<()> {
    parse_time(time).map(|_| ())
}

/// Convert `HH:MM` into minutes since midnight. Anything `validate_time`
/// rejects yields `None`.
pub fn minutes_of(time: &str) -> Option<u32> {
    parse_time(time).ok()
}

fn parse_time(time: &str) -> Result<u32> {
    let pattern = Regex::new(r"^([0-9]{2}):([0-9]{2})$")
        .map_err(|e| anyhow::anyhow!("Invalid time pattern: {e}"))?;

    let caps = pattern
        .captures(time)
        .ok_or_else(|| anyhow::anyhow!("Time must be HH:MM (24-hour), got '{time}'"))?;

    let hour: u32 = caps[1].parse()?;
    let minute: u32 = caps[2].parse()?;
    if hour > 23 || minute > 59 {
        anyhow::bail!("Time out of range: '{time}'");
    }

    Ok(hour * 60 + minute)
}

/// One line of today's agenda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub class: ScheduledClass,
    /// Class has not started yet (or starts this minute)
    pub upcoming: bool,
}

/// Weekly timetable keyed by day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyTimetable {
    days: BTreeMap<Day, Vec<ScheduledClass>>,
}

impl Default for WeeklyTimetable {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|day| (*day, Vec::new())).collect(),
        }
    }
}

impl WeeklyTimetable {
    /// Build from explicit day lists; days missing from `days` stay missing
    pub fn from_days(days: BTreeMap<Day, Vec<ScheduledClass>>) -> Self {
        Self { days }
    }

    /// Classes for a day in insertion order
    pub fn classes(&self, day: Day) -> &[ScheduledClass] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes for a day ordered by start time
    pub fn classes_sorted(&self, day: Day) -> Vec<ScheduledClass> {
        let mut classes = self.classes(day).to_vec();
        classes.sort_by(|a, b| a.time.cmp(&b.time));
        classes
    }

    pub fn add_class(&mut self, day: Day, class: ScheduledClass) {
        self.days.entry(day).or_default().push(class);
    }

    /// Remove by position in the time-sorted view of `day`
    pub fn remove_class(&mut self, day: Day, index: usize) -> Result<ScheduledClass> {
        let target = self
            .classes_sorted(day)
            .into_iter()
            .nth(index)
            .ok_or_else(|| anyhow::anyhow!("No class #{} on {day}", index + 1))?;

        let classes = self
            .days
            .get_mut(&day)
            .ok_or_else(|| anyhow::anyhow!("No classes on {day}"))?;
        let position = classes
            .iter()
            .position(|c| *c == target)
            .ok_or_else(|| anyhow::anyhow!("No class #{} on {day}", index + 1))?;

        Ok(classes.remove(position))
    }

    /// Every class in day order, then time order
    pub fn rows(&self) -> Vec<(Day, ScheduledClass)> {
        Day::ALL
            .iter()
            .flat_map(|day| {
                self.classes_sorted(*day)
                    .into_iter()
                    .map(move |class| (*day, class))
            })
            .collect()
    }

    pub fn total_classes(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Today's classes sorted by time with upcoming ones flagged
    pub fn today_agenda(&self, now: NaiveDateTime) -> (Day, Vec<AgendaEntry>) {
        let today = Day::from(now.weekday());
        let current_minutes = now.hour() * 60 + now.minute();

        let entries = self
            .classes_sorted(today)
            .into_iter()
            .map(|class| {
                let upcoming = class
                    .minutes()
                    .map(|m| m >= current_minutes)
                    .unwrap_or(false);
                AgendaEntry { class, upcoming }
            })
            .collect();

        (today, entries)
    }
}
