//! # Feature: Session
//!
//! A signed-in identifier with its timetable and the reminders already sent.
//! Identifiers are not authenticated; any non-blank text works.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::Result;
use chrono::{Datelike, NaiveDateTime};
use log::{debug, info, warn};

use crate::features::notifications::Notifier;
use crate::features::reminders::{ClassNotification, NotifiedSet, ReminderChecker};
use crate::features::timetable::store::is_unreadable_document;
use crate::features::timetable::{Day, ScheduledClass, TimetableStore, WeeklyTimetable};

#[derive(Debug, Clone)]
pub struct Session {
    user_id: String,
    timetable: WeeklyTimetable,
    notified: NotifiedSet,
}

impl Session {
    /// Sign in as `user_id` and remember it for later invocations
    pub fn login(store: &dyn TimetableStore, user_id: &str) -> Result<Self> {
        let session = Self::open(store, user_id)?;
        store.remember_user_id(&session.user_id)?;
        info!(
            "Logged in as {} ({} classes)",
            session.user_id,
            session.timetable.total_classes()
        );
        Ok(session)
    }

    /// Load `user_id`'s timetable without touching the remembered identifier
    pub fn open(store: &dyn TimetableStore, user_id: &str) -> Result<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            anyhow::bail!("Enter an id or email to continue.");
        }

        // The unreadable document stays on disk until the next save moves it aside
        let timetable = match store.load_timetable(user_id) {
            Ok(timetable) => timetable,
            Err(e) if is_unreadable_document(&e) => {
                warn!("{e:#}; starting from the default timetable");
                WeeklyTimetable::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            user_id: user_id.to_string(),
            timetable,
            notified: NotifiedSet::new(),
        })
    }

    /// Reopen the last remembered identifier, if any
    pub fn resume(store: &dyn TimetableStore) -> Result<Option<Self>> {
        match store.last_user_id()? {
            Some(user_id) => Ok(Some(Self::open(store, &user_id)?)),
            None => Ok(None),
        }
    }

    /// Forget the remembered identifier and drop the in-memory state
    pub fn logout(self, store: &dyn TimetableStore) -> Result<String> {
        store.forget_user_id()?;
        info!("Logged out {}", self.user_id);
        Ok(self.user_id)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn timetable(&self) -> &WeeklyTimetable {
        &self.timetable
    }

    pub fn notified(&self) -> &NotifiedSet {
        &self.notified
    }

    pub fn save(&self, store: &dyn TimetableStore) -> Result<()> {
        store.save_timetable(&self.user_id, &self.timetable)
    }

    /// Replace the in-memory timetable with the stored one. On error the
    /// current copy is left untouched.
    pub fn reload(&mut self, store: &dyn TimetableStore) -> Result<()> {
        self.timetable = store.load_timetable(&self.user_id)?;
        debug!(
            "Reloaded timetable for {} ({} classes)",
            self.user_id,
            self.timetable.total_classes()
        );
        Ok(())
    }

    /// Validate and append a class, then persist
    pub fn add_class(
        &mut self,
        store: &dyn TimetableStore,
        day: Day,
        time: &str,
        subject: &str,
    ) -> Result<ScheduledClass> {
        let class = ScheduledClass::new(time, subject)?;
        self.timetable.add_class(day, class.clone());
        self.save(store)?;
        info!("Added {} on {day} at {} for {}", class.subject, class.time, self.user_id);
        Ok(class)
    }

    /// Remove by position in the day's time-sorted list, then persist
    pub fn remove_class(
        &mut self,
        store: &dyn TimetableStore,
        day: Day,
        index: usize,
    ) -> Result<ScheduledClass> {
        let removed = self.timetable.remove_class(day, index)?;
        self.save(store)?;
        info!(
            "Removed {} on {day} at {} for {}",
            removed.subject, removed.time, self.user_id
        );
        Ok(removed)
    }

    /// Run the reminder check for the weekday of `now`
    pub fn check_reminders(
        &mut self,
        checker: &ReminderChecker,
        now: NaiveDateTime,
        notifier: &dyn Notifier,
    ) -> Vec<ClassNotification> {
        let today = Day::from(now.weekday());
        checker.check(
            now.time(),
            today,
            self.timetable.classes(today),
            &mut self.notified,
            notifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::RecordingNotifier;
    use crate::features::timetable::JsonFileStore;
    use chrono::NaiveDate;

    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_login_rejects_blank_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = Session::login(&store, "   ").unwrap_err();
        assert!(err.to_string().contains("Enter an id"));
        assert_eq!(store.last_user_id().unwrap(), None);
    }

    #[test]
    fn test_login_remembers_trimmed_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let session = Session::login(&store, "  alice ").unwrap();
        assert_eq!(session.user_id(), "alice");
        assert_eq!(store.last_user_id().unwrap(), Some("alice".to_string()));

        let resumed = Session::resume(&store).unwrap().unwrap();
        assert_eq!(resumed.user_id(), "alice");
    }

    #[test]
    fn test_open_does_not_remember() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        Session::open(&store, "bob").unwrap();
        assert!(Session::resume(&store).unwrap().is_none());
    }

    #[test]
    fn test_logout_forgets_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let session = Session::login(&store, "alice").unwrap();
        let user = session.logout(&store).unwrap();
        assert_eq!(user, "alice");
        assert!(Session::resume(&store).unwrap().is_none());
    }

    #[test]
    fn test_add_and_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut session = Session::login(&store, "alice").unwrap();
        session.add_class(&store, Day::Monday, "09:00", "Math").unwrap();
        session.add_class(&store, Day::Monday, "08:00", "Art").unwrap();
        assert!(session.add_class(&store, Day::Monday, "8am", "Bad").is_err());

        let reopened = Session::open(&store, "alice").unwrap();
        assert_eq!(reopened.timetable().total_classes(), 2);

        let removed = session.remove_class(&store, Day::Monday, 0).unwrap();
        assert_eq!(removed.subject, "Art");
        let reopened = Session::open(&store, "alice").unwrap();
        assert_eq!(reopened.timetable().total_classes(), 1);
    }

    #[test]
    fn test_check_reminders_uses_weekday_of_now() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let notifier = RecordingNotifier::new();

        let mut session = Session::login(&store, "alice").unwrap();
        session.add_class(&store, Day::Monday, "09:00", "Math").unwrap();
        session.add_class(&store, Day::Tuesday, "09:00", "History").unwrap();

        let checker = ReminderChecker::default();
        let fired = session.check_reminders(&checker, monday_at(8, 50), &notifier);

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key, "Monday:09:00:Math");
        assert_eq!(session.notified().len(), 1);
    }

    #[test]
    fn test_open_unreadable_document_starts_from_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.timetable_path("alice").unwrap(), "{not json").unwrap();

        let session = Session::login(&store, "alice").unwrap();
        assert_eq!(session.timetable(), &WeeklyTimetable::default());
    }

    #[test]
    fn test_reload_failure_keeps_current_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut session = Session::login(&store, "alice").unwrap();
        session.add_class(&store, Day::Monday, "09:00", "Math").unwrap();
        std::fs::write(store.timetable_path("alice").unwrap(), "{not json").unwrap();

        assert!(session.reload(&store).is_err());
        assert_eq!(session.timetable().total_classes(), 1);
    }

    #[test]
    fn test_reload_keeps_notified_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let notifier = RecordingNotifier::new();
        let checker = ReminderChecker::default();

        let mut session = Session::login(&store, "alice").unwrap();
        session.add_class(&store, Day::Monday, "09:00", "Math").unwrap();
        session.check_reminders(&checker, monday_at(8, 50), &notifier);

        session.reload(&store).unwrap();
        let fired = session.check_reminders(&checker, monday_at(8, 50), &notifier);
        assert!(fired.is_empty());
        assert_eq!(notifier.delivered().len(), 1);
    }
}
