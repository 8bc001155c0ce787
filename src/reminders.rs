//! Reminder store and the priority-tiered due-date check
//!
//! Reminders carry a wall-clock trigger time with no date component; once
//! "now" passes the trigger on the current date the reminder fires, is
//! announced, and is removed - at most once per creation.
//!
//! `task_due_alert` is the priority-tiered check for task due dates. It is
//! a pure function of (now, due date, priority) with no store side effects;
//! a scheduler can call it, the engine loop does not.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::logging;
use crate::storage::Storage;
use crate::tasks::Priority;

/// A daily reminder record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub text: String,
    pub trigger_at: NaiveTime,
    pub created_at: NaiveDateTime,
}

/// In-memory reminder list, persisted wholesale on every mutation.
#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    pub fn from_loaded(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Append a reminder and persist. Returns the confirmation text.
    pub fn add<S: Storage>(
        &mut self,
        text: String,
        trigger_at: NaiveTime,
        now: NaiveDateTime,
        storage: &S,
    ) -> String {
        let confirmation = format!(
            "Reminder set for {} at {}.",
            text,
            trigger_at.format("%H:%M")
        );
        self.reminders.push(Reminder {
            text,
            trigger_at,
            created_at: now,
        });
        self.persist(storage);
        confirmation
    }

    /// Fire every reminder whose trigger time on today's date is at or
    /// before `now`: one notification per distinct trigger time carrying the
    /// count of reminders sharing it. Fired reminders are removed and the
    /// remainder persisted. Calling again at the same `now` with no new
    /// reminders does nothing.
    pub fn check_due<S: Storage>(
        &mut self,
        now: NaiveDateTime,
        storage: &S,
    ) -> Vec<String> {
        let today = now.date();
        let mut fired: BTreeMap<NaiveTime, usize> = BTreeMap::new();
        for reminder in &self.reminders {
            if today.and_time(reminder.trigger_at) <= now {
                *fired.entry(reminder.trigger_at).or_insert(0) += 1;
            }
        }

        if fired.is_empty() {
            return Vec::new();
        }

        let notifications = fired
            .iter()
            .map(|(time, count)| {
                format!(
                    "Reminder: {} tasks are due at {}.",
                    count,
                    time.format("%H:%M:%S")
                )
            })
            .collect();

        self.reminders
            .retain(|r| today.and_time(r.trigger_at) > now);
        self.persist(storage);

        notifications
    }

    fn persist<S: Storage>(&self, storage: &S) {
        if let Err(e) = storage.save_reminders(&self.reminders) {
            logging::error("STORAGE", "save_reminders", &e.to_string());
        }
    }
}

/// Priority-tiered due-date check for a task. Returns the notification to
/// speak, or `None` when no tier applies.
///
/// The medium and high hour announcements subtract a fixed day offset from
/// the remaining time before converting to hours, which goes negative once
/// the task is inside the offset window. The formula is kept as-is; the
/// tests pin its output rather than correct it. The high tier's final
/// "due soon" branch is shadowed by the three-day branch above it, also
/// kept as-is.
pub fn task_due_alert(
    now: NaiveDateTime,
    due_at: NaiveDateTime,
    priority: Priority,
) -> Option<String> {
    let remaining = due_at - now;
    match priority {
        Priority::Low => {
            let thresholds = [
                Duration::hours(5),
                Duration::hours(1),
                Duration::minutes(30),
                Duration::minutes(5),
            ];
            for threshold in thresholds {
                if remaining <= threshold {
                    return Some("Reminder: Task is due soon.".to_string());
                }
            }
            None
        }
        Priority::Medium => {
            if remaining >= Duration::days(5) {
                Some(format!(
                    "Reminder: Task is due in {} days.",
                    remaining.num_days()
                ))
            } else if remaining <= Duration::days(1) {
                let hours = (remaining - Duration::days(1)).num_seconds().div_euclid(3600);
                Some(format!("Reminder: Task is due in {} hours.", hours))
            } else {
                None
            }
        }
        Priority::High => {
            if remaining >= Duration::days(10) {
                Some(format!(
                    "Reminder: Task is due in {} days.",
                    remaining.num_days()
                ))
            } else if remaining <= Duration::days(3) {
                let hours = (remaining - Duration::days(3)).num_seconds().div_euclid(3600);
                Some(format!("Reminder: Task is due in {} hours.", hours))
            } else if remaining <= Duration::hours(1) {
                Some("Reminder: Task is due soon.".to_string())
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NullStorage;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_check_due_groups_by_trigger_time() {
        let storage = NullStorage;
        let mut store = ReminderStore::default();
        let created = dt(2025, 6, 1, 8, 0);
        store.add("call mom".into(), t(9, 0), created, &storage);
        store.add("stand up".into(), t(9, 0), created, &storage);
        store.add("lunch".into(), t(12, 30), created, &storage);

        let fired = store.check_due(dt(2025, 6, 1, 9, 30), &storage);

        assert_eq!(fired, vec!["Reminder: 2 tasks are due at 09:00:00."]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.reminders()[0].text, "lunch");
    }

    #[test]
    fn test_check_due_is_idempotent() {
        let storage = NullStorage;
        let mut store = ReminderStore::default();
        store.add("call mom".into(), t(9, 0), dt(2025, 6, 1, 8, 0), &storage);

        let now = dt(2025, 6, 1, 9, 30);
        let first = store.check_due(now, &storage);
        let second = store.check_due(now, &storage);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_check_due_before_trigger_fires_nothing() {
        let storage = NullStorage;
        let mut store = ReminderStore::default();
        store.add("call mom".into(), t(18, 30), dt(2025, 6, 1, 8, 0), &storage);

        assert!(store.check_due(dt(2025, 6, 1, 12, 0), &storage).is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_low_priority_fires_inside_five_hours() {
        let now = dt(2025, 6, 1, 12, 0);
        let due = dt(2025, 6, 1, 16, 0);
        assert_eq!(
            task_due_alert(now, due, Priority::Low),
            Some("Reminder: Task is due soon.".to_string())
        );
    }

    #[test]
    fn test_low_priority_silent_outside_thresholds() {
        let now = dt(2025, 6, 1, 12, 0);
        let due = dt(2025, 6, 2, 12, 0);
        assert_eq!(task_due_alert(now, due, Priority::Low), None);
    }

    #[test]
    fn test_medium_priority_announces_day_count() {
        let now = dt(2025, 6, 1, 0, 0);
        let due = dt(2025, 6, 8, 0, 0);
        assert_eq!(
            task_due_alert(now, due, Priority::Medium),
            Some("Reminder: Task is due in 7 days.".to_string())
        );
        // Boundary: exactly five whole days still announces the day count.
        assert_eq!(
            task_due_alert(now, dt(2025, 6, 6, 0, 0), Priority::Medium),
            Some("Reminder: Task is due in 5 days.".to_string())
        );
    }

    #[test]
    fn test_medium_priority_silent_between_tiers() {
        let now = dt(2025, 6, 1, 0, 0);
        let due = dt(2025, 6, 3, 0, 0);
        assert_eq!(task_due_alert(now, due, Priority::Medium), None);
    }

    #[test]
    fn test_medium_priority_hour_offset_goes_negative() {
        // 12 hours remaining: (12h - 1 day) / 3600 floors to -12.
        let now = dt(2025, 6, 1, 0, 0);
        let due = dt(2025, 6, 1, 12, 0);
        assert_eq!(
            task_due_alert(now, due, Priority::Medium),
            Some("Reminder: Task is due in -12 hours.".to_string())
        );
    }

    #[test]
    fn test_high_priority_announces_day_count() {
        let now = dt(2025, 6, 1, 0, 0);
        let due = dt(2025, 6, 13, 0, 0);
        assert_eq!(
            task_due_alert(now, due, Priority::High),
            Some("Reminder: Task is due in 12 days.".to_string())
        );
    }

    #[test]
    fn test_high_priority_due_soon_tier_is_shadowed() {
        // 30 minutes remaining falls through to the three-day branch, not
        // the "due soon" branch below it: (30m - 3 days) / 3600 -> -72.
        let now = dt(2025, 6, 1, 12, 0);
        let due = dt(2025, 6, 1, 12, 30);
        assert_eq!(
            task_due_alert(now, due, Priority::High),
            Some("Reminder: Task is due in -72 hours.".to_string())
        );
    }

    #[test]
    fn test_high_priority_silent_between_tiers() {
        let now = dt(2025, 6, 1, 0, 0);
        let due = dt(2025, 6, 6, 0, 0);
        assert_eq!(task_due_alert(now, due, Priority::High), None);
    }
}
