//! Task store - ordered in-memory task records
//!
//! Tasks are identified by their position in the list; deleting a task
//! renumbers everything after it. Every mutating operation writes the whole
//! list through the storage collaborator before reporting success.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssistantError;
use crate::extract::{NewTaskFields, TaskUpdateFields};
use crate::logging;
use crate::storage::Storage;

/// Priority tier of a task. Drives the due-date notification schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(()),
        }
    }
}

/// A single task record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub due_at: Option<NaiveDateTime>,
    pub priority: Option<Priority>,
    pub status: TaskStatus,
    pub created_at: NaiveDateTime,
}

impl Task {
    /// One-line spoken summary: "desc, Due: ..., Priority: ..., Status: ...".
    pub fn summary(&self) -> String {
        let due = self
            .due_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "No due date".to_string());
        let priority = self
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "No priority".to_string());
        format!(
            "{}, Due: {}, Priority: {}, Status: {}",
            self.description, due, priority, self.status
        )
    }
}

/// Ordered task list with positional identity.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn from_loaded(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a new pending task and persist. Returns the confirmation text.
    pub fn add<S: Storage>(
        &mut self,
        fields: NewTaskFields,
        now: NaiveDateTime,
        storage: &S,
    ) -> String {
        let due = fields.due_at.format("%Y-%m-%d %H:%M").to_string();
        let confirmation = format!(
            "Task '{}' with due date {} and priority {} added.",
            fields.description, due, fields.priority
        );
        self.tasks.push(Task {
            description: fields.description,
            due_at: Some(fields.due_at),
            priority: Some(fields.priority),
            status: TaskStatus::Pending,
            created_at: now,
        });
        self.persist(storage);
        confirmation
    }

    /// Apply the present fields of `updates` to task `id` and persist.
    /// Absent fields are left untouched; `created_at` never changes.
    pub fn update<S: Storage>(
        &mut self,
        id: usize,
        updates: &TaskUpdateFields,
        storage: &S,
    ) -> Result<String, AssistantError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or(AssistantError::NotFound(id))?;

        if let Some(due_at) = updates.due_at {
            task.due_at = Some(due_at);
        }
        if let Some(priority) = updates.priority {
            task.priority = Some(priority);
        }
        if let Some(status) = updates.status {
            task.status = status;
        }

        self.persist(storage);
        Ok(format!("Task ID {} updated.", id))
    }

    /// Remove task `id`, renumbering everything after it, and persist.
    pub fn delete<S: Storage>(
        &mut self,
        id: usize,
        storage: &S,
    ) -> Result<String, AssistantError> {
        if id >= self.tasks.len() {
            return Err(AssistantError::NotFound(id));
        }
        self.tasks.remove(id);
        self.persist(storage);
        Ok(format!("Task ID {} deleted.", id))
    }

    /// Tasks whose description matches `keyword`, case-insensitively, with
    /// their ids in insertion order. The keyword is compiled as a regex
    /// fragment; an invalid fragment falls back to a literal substring match.
    pub fn search(&self, keyword: &str) -> Vec<(usize, &Task)> {
        match regex::RegexBuilder::new(keyword).case_insensitive(true).build() {
            Ok(pattern) => self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| pattern.is_match(&t.description))
                .collect(),
            Err(_) => {
                let needle = keyword.to_lowercase();
                self.tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.description.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    /// Every task with its id, in insertion order.
    pub fn view_all(&self) -> Vec<(usize, &Task)> {
        self.tasks.iter().enumerate().collect()
    }

    // A failed save is logged and the in-memory change is kept; the caller
    // still reports success (see DESIGN.md).
    fn persist<S: Storage>(&self, storage: &S) {
        if let Err(e) = storage.save_tasks(&self.tasks) {
            logging::error("STORAGE", "save_tasks", &e.to_string());
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

    fn sample_fields() -> NewTaskFields {
        NewTaskFields {
            description: "write report".to_string(),
            due_at: dt(2025, 3, 1, 9, 0),
            priority: Priority::High,
        }
    }

    #[test]
    fn test_add_appends_pending_task() {
        let storage = NullStorage;
        let mut store = TaskStore::default();

        let confirmation = store.add(sample_fields(), dt(2025, 2, 1, 8, 0), &storage);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().status, TaskStatus::Pending);
        assert_eq!(
            confirmation,
            "Task 'write report' with due date 2025-03-01 09:00 and priority high added."
        );
    }

    #[test]
    fn test_update_touches_only_present_fields() {
        let storage = NullStorage;
        let mut store = TaskStore::default();
        store.add(sample_fields(), dt(2025, 2, 1, 8, 0), &storage);

        let updates = TaskUpdateFields {
            due_at: None,
            priority: Some(Priority::Low),
            status: None,
        };
        store.update(0, &updates, &storage).unwrap();

        let task = store.get(0).unwrap();
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.due_at, Some(dt(2025, 3, 1, 9, 0)));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.description, "write report");
    }

    #[test]
    fn test_update_out_of_range_is_not_found() {
        let storage = NullStorage;
        let mut store = TaskStore::default();
        let updates = TaskUpdateFields {
            due_at: None,
            priority: None,
            status: None,
        };
        let err = store.update(3, &updates, &storage).unwrap_err();
        assert_eq!(err.spoken_message(), "Task ID 3 not found.");
    }

    #[test]
    fn test_delete_renumbers_later_tasks() {
        let storage = NullStorage;
        let mut store = TaskStore::default();
        for desc in ["first", "second", "third"] {
            let mut fields = sample_fields();
            fields.description = desc.to_string();
            store.add(fields, dt(2025, 2, 1, 8, 0), &storage);
        }

        store.delete(1, &storage).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().description, "first");
        assert_eq!(store.get(1).unwrap().description, "third");
    }

    #[test]
    fn test_delete_out_of_range_leaves_store_unchanged() {
        let storage = NullStorage;
        let mut store = TaskStore::default();
        store.add(sample_fields(), dt(2025, 2, 1, 8, 0), &storage);

        let err = store.delete(7, &storage).unwrap_err();
        assert_eq!(err.spoken_message(), "Task ID 7 not found.");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let storage = NullStorage;
        let mut store = TaskStore::default();
        for desc in ["Buy milk", "send REPORT", "water plants", "report taxes"] {
            let mut fields = sample_fields();
            fields.description = desc.to_string();
            store.add(fields, dt(2025, 2, 1, 8, 0), &storage);
        }

        let hits = store.search("report");
        let ids: Vec<usize> = hits.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_search_empty_result_is_ok() {
        let store = TaskStore::default();
        assert!(store.search("anything").is_empty());
    }

    #[test]
    fn test_summary_defaults() {
        let task = Task {
            description: "loose end".to_string(),
            due_at: None,
            priority: None,
            status: TaskStatus::Pending,
            created_at: dt(2025, 2, 1, 8, 0),
        };
        assert_eq!(
            task.summary(),
            "loose end, Due: No due date, Priority: No priority, Status: pending"
        );
    }
}
