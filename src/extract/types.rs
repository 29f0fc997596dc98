//! Shared types for transcript extraction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attributes;

// ── Task ────────────────────────────────────────────────────────────

/// An action item captured from a `待办：` / `action:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Captured task content. Identity for dedup.
    #[serde(rename = "text")]
    pub raw_text: String,
    /// `raw_text` with the leading owner/date phrase stripped. Conflict grouping key.
    pub description: String,
    /// Owner named by the leading phrase, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// First `YYYY-MM-DD` shaped substring of `raw_text`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
}

impl Task {
    /// Parse a task from its captured text. Never fails.
    pub fn parse(raw_text: impl Into<String>) -> Self {
        attributes::parse_task(raw_text.into())
    }

    /// The due date as a real calendar date.
    ///
    /// `None` when there is no `due_at` or it is date-shaped but not a valid
    /// date (e.g. `2026-02-30`).
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_at
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Which attributes disagree with `other`.
    ///
    /// An attribute only disagrees when both sides carry it and the values differ.
    pub fn conflicts_with(&self, other: &Task) -> Vec<ConflictType> {
        let mut conflicts = Vec::new();
        if differs(&self.owner, &other.owner) {
            conflicts.push(ConflictType::OwnerConflict);
        }
        if differs(&self.due_at, &other.due_at) {
            conflicts.push(ConflictType::DateConflict);
        }
        conflicts
    }
}

fn differs(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a != b)
}

// ── Conflicts ───────────────────────────────────────────────────────

/// Which attribute two tasks sharing a description disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    OwnerConflict,
    DateConflict,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OwnerConflict => write!(f, "owner_conflict"),
            Self::DateConflict => write!(f, "date_conflict"),
        }
    }
}

/// A queued bundle of disagreeing task variants awaiting a human decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub conflict_type: ConflictType,
    pub description: String,
    /// Disputing variants in arrival order, unique by `raw_text`.
    pub candidates: Vec<Task>,
}

impl PendingConfirmation {
    pub fn new(conflict_type: ConflictType, description: impl Into<String>) -> Self {
        Self {
            conflict_type,
            description: description.into(),
            candidates: Vec::new(),
        }
    }

    /// Add a candidate unless one with the same `raw_text` is already queued.
    ///
    /// Returns `true` if the candidate was added.
    pub fn add_candidate(&mut self, task: &Task) -> bool {
        if self.candidates.iter().any(|c| c.raw_text == task.raw_text) {
            return false;
        }
        self.candidates.push(task.clone());
        true
    }
}

// ── Deltas & result ─────────────────────────────────────────────────

/// Per-chunk change in the decision and confirmed-task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalUpdate {
    pub chunk_index: usize,
    pub decisions_added: usize,
    /// Net change in confirmed tasks. Negative when the chunk only evicted.
    pub tasks_added: i64,
    pub total_decisions: usize,
    pub total_tasks: usize,
}

/// Everything extracted from one transcript or transcript stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub decisions: Vec<String>,
    /// Confirmed, non-conflicted tasks in first-confirmation order.
    pub tasks: Vec<Task>,
    pub pending_confirmations: Vec<PendingConfirmation>,
    pub incremental_updates: Vec<IncrementalUpdate>,
}

impl ExtractionResult {
    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty() && self.tasks.is_empty() && self.pending_confirmations.is_empty()
    }
}
