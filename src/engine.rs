//! Assistant engine - owns the domain state and drives every turn
//!
//! One explicit context object holds the task store, reminder store, user
//! profile, advice pool, and conversation flag; collaborators (storage,
//! browser) are injected at boot. Handlers never panic and never leak an
//! error past their boundary - every failure becomes a spoken message and
//! the loop keeps cycling until the exit intent.

use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::conversation::{classify_follow_up, ConversationState, FollowUp};
use crate::extract;
use crate::intents::{classify, Intent, SearchSite};
use crate::logging;
use crate::reminders::ReminderStore;
use crate::search::{site_url, UrlOpener};
use crate::storage::Storage;
use crate::tasks::TaskStore;

// =============================================================================
// TYPES
// =============================================================================

/// The singleton user profile, persisted on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
        }
    }
}

/// Outcome of one utterance: the messages to speak, in order, and whether
/// the session is over. The shell maps `end` to process exit.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    pub replies: Vec<String>,
    pub end: bool,
}

impl Turn {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            replies: vec![message.into()],
            end: false,
        }
    }

    fn ending(message: impl Into<String>) -> Self {
        Self {
            replies: vec![message.into()],
            end: true,
        }
    }
}

const FOLLOW_UP_PROMPT: &str = "Is there anything else I can assist you with?";
const FAREWELL: &str = "Goodbye!";

// =============================================================================
// ASSISTANT ENGINE
// =============================================================================

pub struct Assistant<S: Storage> {
    storage: S,
    opener: Box<dyn UrlOpener>,
    profile: UserProfile,
    tasks: TaskStore,
    reminders: ReminderStore,
    advice: Vec<String>,
    state: ConversationState,
}

impl<S: Storage> Assistant<S> {
    /// Load every document from storage and start idle. Load failures are
    /// logged and replaced with defaults; startup never fails.
    pub fn boot(storage: S, opener: Box<dyn UrlOpener>) -> Self {
        let profile = storage.load_profile().unwrap_or_else(|e| {
            logging::error("ENGINE", "load_profile", &e.to_string());
            UserProfile::default()
        });
        let tasks = storage.load_tasks().unwrap_or_else(|e| {
            logging::error("ENGINE", "load_tasks", &e.to_string());
            Vec::new()
        });
        let reminders = storage.load_reminders().unwrap_or_else(|e| {
            logging::error("ENGINE", "load_reminders", &e.to_string());
            Vec::new()
        });
        let advice = storage.load_advice().unwrap_or_else(|e| {
            logging::error("ENGINE", "load_advice", &e.to_string());
            Vec::new()
        });

        Self {
            storage,
            opener,
            profile,
            tasks: TaskStore::from_loaded(tasks),
            reminders: ReminderStore::from_loaded(reminders),
            advice,
            state: ConversationState::Idle,
        }
    }

    /// Opening greeting; the session starts waiting for a yes/no reply.
    pub fn open_session(&mut self) -> Turn {
        self.state = ConversationState::AwaitingFollowUp;
        Turn::reply("Hey, How can I help you?")
    }

    /// Route one utterance according to the conversation state.
    pub fn handle_utterance(&mut self, text: &str, now: NaiveDateTime) -> Turn {
        match self.state {
            ConversationState::AwaitingFollowUp => self.handle_follow_up(text),
            ConversationState::Idle => self.dispatch(text, now),
        }
    }

    /// Fire due reminders. Called once per cycle by the shell, independent
    /// of whether an utterance arrived.
    pub fn check_reminders(&mut self, now: NaiveDateTime) -> Vec<String> {
        self.reminders.check_due(now, &self.storage)
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn reminders(&self) -> &ReminderStore {
        &self.reminders
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    // ==========================================================================
    // Follow-up interpretation
    // ==========================================================================

    fn handle_follow_up(&mut self, text: &str) -> Turn {
        match classify_follow_up(text) {
            FollowUp::Affirmative => Turn::reply(FOLLOW_UP_PROMPT),
            FollowUp::Negative => {
                self.state = ConversationState::Idle;
                Turn::reply("Alright, I'll be here if you need anything.")
            }
            FollowUp::Exit => Turn::ending(FAREWELL),
            FollowUp::Unrecognized => Turn::reply(
                "Sorry, I didn't understand that. Can you please respond with 'yes' or 'no'?",
            ),
        }
    }

    // ==========================================================================
    // Intent dispatch
    // ==========================================================================

    fn dispatch(&mut self, text: &str, now: NaiveDateTime) -> Turn {
        let Some(intent) = classify(text) else {
            return self.ask_more(Turn::reply("I didn't understand that command."));
        };

        let turn = match intent {
            Intent::Greeting => Turn::reply(self.pick_greeting()),
            Intent::NameQuery => Turn::reply(self.name_query()),
            Intent::NameUpdate { name } => Turn::reply(self.name_update(name)),
            Intent::TimeQuery => {
                Turn::reply(format!("The current time is {}.", now.format("%H:%M")))
            }
            Intent::WebSearch { site, term } => Turn::reply(self.web_search(site, &term)),
            Intent::TaskAdd { details } => Turn::reply(self.task_add(&details, now)),
            Intent::TaskUpdate { id, details } => Turn::reply(self.task_update(id, &details)),
            Intent::TaskDelete { id } => Turn::reply(self.task_delete(id)),
            Intent::TaskSearch { keyword } => Turn::reply(self.task_search(&keyword)),
            Intent::TaskView => Turn::reply(self.task_view()),
            Intent::Advice => Turn::reply(self.pick_advice()),
            Intent::ReminderAdd { details } => Turn::reply(self.reminder_add(&details, now)),
            Intent::Exit => return Turn::ending(FAREWELL),
        };

        self.ask_more(turn)
    }

    // Every non-exit handler ends the same way: ask whether more help is
    // needed and wait for the yes/no reply.
    fn ask_more(&mut self, mut turn: Turn) -> Turn {
        turn.replies.push(FOLLOW_UP_PROMPT.to_string());
        self.state = ConversationState::AwaitingFollowUp;
        turn
    }

    // ==========================================================================
    // Handlers
    // ==========================================================================

    fn pick_greeting(&self) -> String {
        let name = &self.profile.name;
        let pool = [
            format!("Hey, how can I help you {}?", name),
            format!("Hello {}!", name),
            "I'm here to help. What do you need?".to_string(),
            "How can I assist you today?".to_string(),
        ];
        pool.choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "How can I assist you today?".to_string())
    }

    fn name_query(&self) -> String {
        if self.profile.name.is_empty() {
            "My name is Cortex. What's your name?".to_string()
        } else {
            format!("My name is Cortex. You can call me {}.", self.profile.name)
        }
    }

    fn name_update(&mut self, name: String) -> String {
        self.profile.name = name;
        if let Err(e) = self.storage.save_profile(&self.profile) {
            logging::error("STORAGE", "save_profile", &e.to_string());
        }
        format!("Okay, I'll remember that your name is {}.", self.profile.name)
    }

    fn web_search(&mut self, site: SearchSite, term: &str) -> String {
        match site_url(site.key(), term) {
            Some(url) => {
                if let Err(e) = self.opener.open(&url) {
                    logging::error("SEARCH", "open_url", &e.to_string());
                }
                format!("Here is what I found for {} on {}.", term, site.key())
            }
            None => "Sorry, I couldn't find the site.".to_string(),
        }
    }

    fn task_add(&mut self, details: &str, now: NaiveDateTime) -> String {
        match extract::parse_new_task(details) {
            Ok(fields) => self.tasks.add(fields, now, &self.storage),
            Err(e) => e.spoken_message(),
        }
    }

    fn task_update(&mut self, id: usize, details: &str) -> String {
        match extract::parse_task_update(details) {
            Ok(updates) => match self.tasks.update(id, &updates, &self.storage) {
                Ok(confirmation) => confirmation,
                Err(e) => e.spoken_message(),
            },
            Err(e) => e.spoken_message(),
        }
    }

    fn task_delete(&mut self, id: usize) -> String {
        match self.tasks.delete(id, &self.storage) {
            Ok(confirmation) => confirmation,
            Err(e) => e.spoken_message(),
        }
    }

    fn task_search(&self, keyword: &str) -> String {
        let hits = self.tasks.search(keyword);
        if hits.is_empty() {
            return "No tasks found matching your query.".to_string();
        }
        let listing: Vec<String> = hits
            .iter()
            .map(|(id, task)| format!("ID {}: {}", id, task.summary()))
            .collect();
        format!("Tasks found: {}", listing.join(", "))
    }

    fn task_view(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks available.".to_string();
        }
        let listing: Vec<String> = self
            .tasks
            .view_all()
            .iter()
            .map(|(id, task)| format!("ID {}: {}", id, task.summary()))
            .collect();
        format!("All tasks: {}", listing.join(", "))
    }

    fn pick_advice(&self) -> String {
        self.advice
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "I don't have any advice to offer at the moment.".to_string())
    }

    fn reminder_add(&mut self, details: &str, now: NaiveDateTime) -> String {
        match extract::parse_reminder(details) {
            Ok(fields) => {
                self.reminders
                    .add(fields.text, fields.trigger_at, now, &self.storage)
            }
            Err(e) => e.spoken_message(),
        }
    }
}
