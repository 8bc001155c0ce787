//! Intent dispatch - ordered pattern table over utterance text
//!
//! Rules are walked top to bottom and the first pattern that matches
//! anywhere in the utterance wins; overlapping patterns are resolved by
//! position in the table, nothing else. A miss means the fallback reply.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Sites the web-search intents are parameterized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSite {
    Google,
    Youtube,
    Maps,
    Weather,
}

impl SearchSite {
    /// Key into the site URL map, also spoken back in the response.
    pub fn key(&self) -> &'static str {
        match self {
            SearchSite::Google => "google",
            SearchSite::Youtube => "youtube",
            SearchSite::Maps => "maps",
            SearchSite::Weather => "weather",
        }
    }
}

/// A recognized user intent with its extracted fragments. Multi-field
/// fragments (task details, reminder details) are carried raw and parsed
/// by the extractor at the handler boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Greeting,
    NameQuery,
    NameUpdate { name: String },
    TimeQuery,
    WebSearch { site: SearchSite, term: String },
    TaskAdd { details: String },
    TaskUpdate { id: usize, details: String },
    TaskDelete { id: usize },
    TaskSearch { keyword: String },
    TaskView,
    Advice,
    ReminderAdd { details: String },
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum Tag {
    Greeting,
    NameQuery,
    NameUpdate,
    TimeQuery,
    SearchGoogle,
    SearchYoutube,
    SearchMaps,
    SearchWeather,
    TaskAdd,
    TaskUpdate,
    TaskDelete,
    TaskSearch,
    TaskView,
    Advice,
    ReminderAdd,
    Exit,
}

lazy_static! {
    static ref RULES: Vec<(Tag, Regex)> = {
        let rule = |tag, pattern| (tag, Regex::new(pattern).unwrap());
        vec![
            rule(Tag::Greeting, r"\b(?:hey|hi|hello)\b"),
            rule(
                Tag::NameQuery,
                r"\b(?:what is your name|what's your name|tell me your name)\b",
            ),
            rule(Tag::NameUpdate, r"\bmy name is\b\s+(?P<name>.*)"),
            rule(Tag::TimeQuery, r"\bwhat'?s the time\b"),
            rule(Tag::SearchGoogle, r"\bsearch on google for\b\s+(?P<term>.*)"),
            rule(Tag::SearchYoutube, r"\bsearch on youtube for\b\s+(?P<term>.*)"),
            rule(
                Tag::SearchMaps,
                r"\bfind location on google map for\b\s+(?P<term>.*)",
            ),
            rule(Tag::SearchWeather, r"\bshow the weather for\b\s+(?P<term>.*)"),
            rule(Tag::TaskAdd, r"\b(?:add|create)\b\s+task\s+(?P<details>.*)"),
            rule(
                Tag::TaskUpdate,
                r"\b(?:update|modify)\s+task\s+(?P<id>\d+)\s+(?P<details>.*)",
            ),
            rule(Tag::TaskDelete, r"\b(?:delete|remove)\s+task\s+(?P<id>\d+)\b"),
            rule(Tag::TaskSearch, r"\b(?:search|find)\s+task\s+(?P<keyword>.*)\b"),
            rule(Tag::TaskView, r"\b(?:view|show)\s+tasks\b"),
            rule(Tag::Advice, r"\b(?:give me advice|advice)\b"),
            rule(Tag::ReminderAdd, r"\breminder\b\s+for\s+(?P<details>.*)"),
            rule(Tag::Exit, r"\b(?:exit|quit|goodbye)\b"),
        ]
    };
}

/// First-match classification of an utterance. `None` means no rule
/// matched and the caller should fall back.
pub fn classify(text: &str) -> Option<Intent> {
    for (tag, pattern) in RULES.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(intent) = build(*tag, &caps) {
                return Some(intent);
            }
        }
    }
    None
}

fn build(tag: Tag, caps: &Captures<'_>) -> Option<Intent> {
    let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    let id = |caps: &Captures<'_>| caps.name("id")?.as_str().parse::<usize>().ok();

    let intent = match tag {
        Tag::Greeting => Intent::Greeting,
        Tag::NameQuery => Intent::NameQuery,
        Tag::NameUpdate => Intent::NameUpdate {
            name: field("name")?,
        },
        Tag::TimeQuery => Intent::TimeQuery,
        Tag::SearchGoogle => Intent::WebSearch {
            site: SearchSite::Google,
            term: field("term")?,
        },
        Tag::SearchYoutube => Intent::WebSearch {
            site: SearchSite::Youtube,
            term: field("term")?,
        },
        Tag::SearchMaps => Intent::WebSearch {
            site: SearchSite::Maps,
            term: field("term")?,
        },
        Tag::SearchWeather => Intent::WebSearch {
            site: SearchSite::Weather,
            term: field("term")?,
        },
        Tag::TaskAdd => Intent::TaskAdd {
            details: field("details")?,
        },
        Tag::TaskUpdate => Intent::TaskUpdate {
            id: id(caps)?,
            details: field("details")?,
        },
        Tag::TaskDelete => Intent::TaskDelete { id: id(caps)? },
        Tag::TaskSearch => Intent::TaskSearch {
            keyword: field("keyword")?,
        },
        Tag::TaskView => Intent::TaskView,
        Tag::Advice => Intent::Advice,
        Tag::ReminderAdd => Intent::ReminderAdd {
            details: field("details")?,
        },
        Tag::Exit => Intent::Exit,
    };
    Some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        assert_eq!(classify("hey there"), Some(Intent::Greeting));
        assert_eq!(classify("hello"), Some(Intent::Greeting));
    }

    #[test]
    fn test_first_match_wins_over_later_rules() {
        // "hello" sits earlier in the table than "goodbye".
        assert_eq!(classify("hello goodbye"), Some(Intent::Greeting));
    }

    #[test]
    fn test_name_update_captures_name() {
        assert_eq!(
            classify("my name is ada"),
            Some(Intent::NameUpdate {
                name: "ada".to_string()
            })
        );
    }

    #[test]
    fn test_time_query_with_and_without_apostrophe() {
        assert_eq!(classify("what's the time"), Some(Intent::TimeQuery));
        assert_eq!(classify("whats the time"), Some(Intent::TimeQuery));
    }

    #[test]
    fn test_web_search_sites() {
        assert_eq!(
            classify("search on google for rust closures"),
            Some(Intent::WebSearch {
                site: SearchSite::Google,
                term: "rust closures".to_string()
            })
        );
        assert_eq!(
            classify("find location on google map for alexanderplatz"),
            Some(Intent::WebSearch {
                site: SearchSite::Maps,
                term: "alexanderplatz".to_string()
            })
        );
        assert_eq!(
            classify("show the weather for berlin"),
            Some(Intent::WebSearch {
                site: SearchSite::Weather,
                term: "berlin".to_string()
            })
        );
    }

    #[test]
    fn test_task_intents() {
        assert_eq!(
            classify("add task write report due on 2025-03-01 at 09:00 with priority low"),
            Some(Intent::TaskAdd {
                details: "write report due on 2025-03-01 at 09:00 with priority low".to_string()
            })
        );
        assert_eq!(
            classify("update task 2 priority low"),
            Some(Intent::TaskUpdate {
                id: 2,
                details: "priority low".to_string()
            })
        );
        assert_eq!(classify("delete task 7"), Some(Intent::TaskDelete { id: 7 }));
        assert_eq!(
            classify("find task report"),
            Some(Intent::TaskSearch {
                keyword: "report".to_string()
            })
        );
        assert_eq!(classify("show tasks"), Some(Intent::TaskView));
    }

    #[test]
    fn test_reminder_without_leading_verb() {
        assert_eq!(
            classify("reminder for call mom at 18:30"),
            Some(Intent::ReminderAdd {
                details: "call mom at 18:30".to_string()
            })
        );
        assert_eq!(
            classify("set reminder for stretch at 15:00"),
            Some(Intent::ReminderAdd {
                details: "stretch at 15:00".to_string()
            })
        );
    }

    #[test]
    fn test_exit() {
        assert_eq!(classify("quit"), Some(Intent::Exit));
        assert_eq!(classify("goodbye"), Some(Intent::Exit));
    }

    #[test]
    fn test_unmatched_is_none() {
        assert_eq!(classify("make me a sandwich"), None);
    }
}
