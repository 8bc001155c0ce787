//! Persistent storage collaborator
//!
//! Three JSON documents (tasks, reminders, profile) plus a read-only advice
//! document, loaded once at startup and overwritten wholesale on every
//! mutation. An absent file is a default value, not an error. The trait
//! seam keeps the engine testable without touching the filesystem.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::engine::UserProfile;
use crate::reminders::Reminder;
use crate::tasks::Task;

const TASKS_FILE: &str = "tasks.json";
const REMINDERS_FILE: &str = "reminders.json";
const PROFILE_FILE: &str = "profile.json";
const ADVICE_FILE: &str = "advice.json";

/// Load-at-start / save-on-mutation contract for the assistant documents.
pub trait Storage {
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;
    fn load_reminders(&self) -> Result<Vec<Reminder>>;
    fn save_reminders(&self, reminders: &[Reminder]) -> Result<()>;
    fn load_profile(&self) -> Result<UserProfile>;
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;
    fn load_advice(&self) -> Result<Vec<String>>;
}

/// JSON documents under a base directory (default `~/.cortex`).
pub struct JsonFileStorage {
    base_dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new() -> Self {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cortex");
        Self { base_dir }
    }

    /// Storage rooted at a custom directory (useful for testing).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn read_doc<T>(&self, file: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.base_dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_doc<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create {}", self.base_dir.display()))?;
        let path = self.base_dir.join(file);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", file))?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for JsonFileStorage {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read_doc(TASKS_FILE)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.write_doc(TASKS_FILE, &tasks)
    }

    fn load_reminders(&self) -> Result<Vec<Reminder>> {
        self.read_doc(REMINDERS_FILE)
    }

    fn save_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        self.write_doc(REMINDERS_FILE, &reminders)
    }

    fn load_profile(&self) -> Result<UserProfile> {
        self.read_doc(PROFILE_FILE)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write_doc(PROFILE_FILE, profile)
    }

    fn load_advice(&self) -> Result<Vec<String>> {
        self.read_doc(ADVICE_FILE)
    }
}

/// Storage that loads defaults and discards writes. Used by tests and by
/// embeddings that want a purely in-memory assistant.
pub struct NullStorage;

impl Storage for NullStorage {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(Vec::new())
    }

    fn save_tasks(&self, _tasks: &[Task]) -> Result<()> {
        Ok(())
    }

    fn load_reminders(&self) -> Result<Vec<Reminder>> {
        Ok(Vec::new())
    }

    fn save_reminders(&self, _reminders: &[Reminder]) -> Result<()> {
        Ok(())
    }

    fn load_profile(&self) -> Result<UserProfile> {
        Ok(UserProfile::default())
    }

    fn save_profile(&self, _profile: &UserProfile) -> Result<()> {
        Ok(())
    }

    fn load_advice(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
