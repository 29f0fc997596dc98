//! Task attribute parser: owner, due date and base description.
//!
//! Recognized leading phrases:
//! - `<owner> 在 <YYYY-MM-DD> 前完成 <description>`
//! - `<owner> by <YYYY-MM-DD> <description>`
//!
//! Extraction is best-effort; anything unrecognized leaves the optional
//! fields empty and the description equal to the raw text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Task;

static OWNER_ZH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+在\s+[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("owner (zh) regex is valid")
});

static OWNER_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\S+)\s+by\s+[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("owner (en) regex is valid")
});

static DUE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("due date regex is valid"));

static PREFIX_ZH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+\s+在\s+[0-9]{4}-[0-9]{2}-[0-9]{2}\s*前?完成\s*").expect("prefix (zh) regex is valid")
});

static PREFIX_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\S+\s+by\s+[0-9]{4}-[0-9]{2}-[0-9]{2}\s+").expect("prefix (en) regex is valid")
});

/// Build a [`Task`] from its captured text.
pub fn parse_task(raw_text: String) -> Task {
    Task {
        description: parse_description(&raw_text),
        owner: parse_owner(&raw_text),
        due_at: parse_due_at(&raw_text),
        raw_text,
    }
}

/// Owner from the leading phrase. Chinese form is tried first.
pub fn parse_owner(raw_text: &str) -> Option<String> {
    [&*OWNER_ZH, &*OWNER_EN]
        .into_iter()
        .find_map(|re| re.captures(raw_text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First date-shaped substring anywhere in the text.
///
/// Not necessarily the date next to the owner phrase, and not validated as a
/// calendar date; see [`Task::due_date`] for that.
pub fn parse_due_at(raw_text: &str) -> Option<String> {
    DUE_DATE.find(raw_text).map(|m| m.as_str().to_string())
}

/// Raw text minus the leading owner/date phrase, or the raw text unchanged.
pub fn parse_description(raw_text: &str) -> String {
    for prefix in [&*PREFIX_ZH, &*PREFIX_EN] {
        if let Some(m) = prefix.find(raw_text) {
            return raw_text[m.end()..].trim().to_string();
        }
    }
    raw_text.to_string()
}
