//! Conversation state - idle vs. awaiting a yes/no follow-up
//!
//! After almost every handler the assistant asks whether more help is
//! needed and waits for a yes/no/exit reply. The classifier below walks its
//! three sub-patterns in order; anything else asks for a literal yes or no.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    Idle,
    AwaitingFollowUp,
}

/// Interpretation of an utterance received while awaiting follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Affirmative,
    Negative,
    Exit,
    Unrecognized,
}

lazy_static! {
    static ref AFFIRMATIVE: Regex = Regex::new(r"\b(?:yes|yeah|yep|sure|okay)\b").unwrap();
    static ref NEGATIVE: Regex =
        Regex::new(r"\b(?:no|thanks|not at the moment|not now|nope)\b").unwrap();
    static ref EXIT: Regex = Regex::new(r"\b(?:exit|quit|goodbye)\b").unwrap();
}

/// Classify a follow-up reply. Sub-patterns are checked in order:
/// affirmative, negative, exit.
pub fn classify_follow_up(text: &str) -> FollowUp {
    if AFFIRMATIVE.is_match(text) {
        FollowUp::Affirmative
    } else if NEGATIVE.is_match(text) {
        FollowUp::Negative
    } else if EXIT.is_match(text) {
        FollowUp::Exit
    } else {
        FollowUp::Unrecognized
    }
}
