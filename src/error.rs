//! Error taxonomy for the assistant engine.
//!
//! Every handler-level failure is converted to a spoken message at the
//! handler boundary; nothing here propagates out of the dispatch loop.

use thiserror::Error;

/// Errors raised by the domain engine.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Malformed or incomplete command text. The payload is the exact
    /// user-facing retry prompt.
    #[error("{0}")]
    Extraction(String),

    /// Task id outside the live range of the task list.
    #[error("Task ID {0} not found.")]
    NotFound(usize),

    /// The persistence collaborator failed. Logged; the in-memory result
    /// is still reported to the user (known divergence, see DESIGN.md).
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),

    /// The speech/text output collaborator failed. Logged and degraded,
    /// never surfaced to the conversation.
    #[error("output failure: {0}")]
    Output(#[source] anyhow::Error),
}

impl AssistantError {
    /// The message to speak back to the user for this failure.
    pub fn spoken_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AssistantError::NotFound(7);
        assert_eq!(err.spoken_message(), "Task ID 7 not found.");
    }

    #[test]
    fn test_extraction_carries_prompt() {
        let err = AssistantError::Extraction("Invalid time format. Please use HH:MM.".into());
        assert_eq!(err.spoken_message(), "Invalid time format. Please use HH:MM.");
    }
}
