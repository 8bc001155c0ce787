//! cortex_core - voice-driven personal task and reminder assistant
//!
//! Modules:
//! - extract: typed field extraction out of matched command fragments
//! - tasks: ordered in-memory task store with positional ids
//! - reminders: daily reminder store and the priority-tiered due-date check
//! - intents: ordered pattern table, first match wins
//! - conversation: idle vs. awaiting yes/no follow-up
//! - engine: the assistant context object and its handlers
//! - storage: JSON document persistence collaborator
//! - speech: voice input/output collaborator traits and the console impls
//! - search: site URL templates and the browser launcher
//! - logging: structured JSON log lines
//! - error: the engine's error taxonomy

pub mod conversation;
pub mod engine;
pub mod error;
pub mod extract;
pub mod intents;
pub mod logging;
pub mod reminders;
pub mod search;
pub mod speech;
pub mod storage;
pub mod tasks;

// Re-export key types for convenience
pub use conversation::{classify_follow_up, ConversationState, FollowUp};
pub use engine::{Assistant, Turn, UserProfile};
pub use error::AssistantError;
pub use extract::{NewTaskFields, ReminderFields, TaskUpdateFields};
pub use intents::{classify, Intent, SearchSite};
pub use reminders::{task_due_alert, Reminder, ReminderStore};
pub use search::{site_url, SystemOpener, UrlOpener};
pub use speech::{ConsoleInput, ConsoleOutput, VoiceInput, VoiceOutput};
pub use storage::{JsonFileStorage, NullStorage, Storage};
pub use tasks::{Priority, Task, TaskStatus, TaskStore};
