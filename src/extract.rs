//! Field extraction - typed values out of matched command fragments
//!
//! Each command template is compiled once and read back through named
//! capture groups, so optional-segment presence is checked by field name.
//! Extraction failures carry the exact prompt to speak back; no partial
//! state is ever created from a half-matched command.

use chrono::{NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AssistantError;
use crate::tasks::{Priority, TaskStatus};

/// Fields of a fully specified new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskFields {
    pub description: String,
    pub due_at: NaiveDateTime,
    pub priority: Priority,
}

/// Partial update to an existing task. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdateFields {
    pub due_at: Option<NaiveDateTime>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

/// Fields of a new daily reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderFields {
    pub text: String,
    pub trigger_at: NaiveTime,
}

lazy_static! {
    static ref NEW_TASK: Regex = Regex::new(
        r"^(?P<desc>.*)\s+due\s+on\s+(?P<date>\d{4}-\d{2}-\d{2})\s+at\s+(?P<time>\d{2}:\d{2})\s+with\s+priority\s+(?P<priority>low|medium|high)"
    )
    .unwrap();
    static ref TASK_UPDATE: Regex = Regex::new(
        r"^(?:due\s+on\s+(?P<date>\d{4}-\d{2}-\d{2})\s+at\s+(?P<time>\d{2}:\d{2}))?\s*(?:priority\s+(?P<priority>low|medium|high))?\s*(?:status\s+(?P<status>completed|pending))?"
    )
    .unwrap();
    static ref REMINDER: Regex =
        Regex::new(r"^(?P<text>.*)\s+at\s+(?P<time>\d{2}:\d{2})").unwrap();
}

const NEW_TASK_PROMPT: &str =
    "Please provide the task description, due date, time, and priority level.";
const UPDATE_PROMPT: &str = "Could not parse the update details.";
const REMINDER_PROMPT: &str =
    "Please specify the reminder text and time in the format 'reminder for <text> at HH:MM'.";
const TIME_PROMPT: &str = "Invalid time format. Please use HH:MM.";

/// Parse the fragment after "add task": description, due date, time, and
/// priority must all be present and valid.
pub fn parse_new_task(fragment: &str) -> Result<NewTaskFields, AssistantError> {
    let caps = NEW_TASK
        .captures(fragment)
        .ok_or_else(|| AssistantError::Extraction(NEW_TASK_PROMPT.to_string()))?;

    let due_at = parse_due_at(&caps["date"], &caps["time"])
        .ok_or_else(|| AssistantError::Extraction(NEW_TASK_PROMPT.to_string()))?;
    let priority: Priority = caps["priority"]
        .parse()
        .map_err(|_| AssistantError::Extraction(NEW_TASK_PROMPT.to_string()))?;

    Ok(NewTaskFields {
        description: caps["desc"].trim().to_string(),
        due_at,
        priority,
    })
}

/// Parse the fragment after "update task <id>". Segments are recognized in
/// the order due-date, priority, status; each is independently optional and
/// anything after the first unrecognized word is ignored.
pub fn parse_task_update(fragment: &str) -> Result<TaskUpdateFields, AssistantError> {
    let caps = TASK_UPDATE
        .captures(fragment)
        .ok_or_else(|| AssistantError::Extraction(UPDATE_PROMPT.to_string()))?;

    let mut updates = TaskUpdateFields::default();
    if let (Some(date), Some(time)) = (caps.name("date"), caps.name("time")) {
        let due_at = parse_due_at(date.as_str(), time.as_str())
            .ok_or_else(|| AssistantError::Extraction(UPDATE_PROMPT.to_string()))?;
        updates.due_at = Some(due_at);
    }
    if let Some(priority) = caps.name("priority") {
        updates.priority = priority.as_str().parse().ok();
    }
    if let Some(status) = caps.name("status") {
        updates.status = status.as_str().parse().ok();
    }
    Ok(updates)
}

/// Parse the fragment after "reminder for": trailing "at HH:MM" is split
/// off and must be a valid 24-hour wall-clock time.
pub fn parse_reminder(fragment: &str) -> Result<ReminderFields, AssistantError> {
    let caps = REMINDER
        .captures(fragment)
        .ok_or_else(|| AssistantError::Extraction(REMINDER_PROMPT.to_string()))?;

    let trigger_at = NaiveTime::parse_from_str(&caps["time"], "%H:%M")
        .map_err(|_| AssistantError::Extraction(TIME_PROMPT.to_string()))?;

    Ok(ReminderFields {
        text: caps["text"].to_string(),
        trigger_at,
    })
}

fn parse_due_at(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").ok()
}
