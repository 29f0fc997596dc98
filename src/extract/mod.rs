//! Transcript extraction engine.
//!
//! Each chunk of transcript text flows through:
//! 1. `rules::split_lines()` + `SignalRules::classify()` — lexical markers only
//! 2. `attributes::parse_task()` — owner, due date, base description
//! 3. `MeetingExtractor` — dedup, conflict detection, per-chunk deltas
//!
//! The engine is total: unmatched lines are dropped and missing attributes
//! stay empty. It never resolves conflicts; those are queued for a human.

pub mod attributes;
pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{MeetingExtractor, extract_chunks};
pub use types::{ConflictType, ExtractionResult, IncrementalUpdate, PendingConfirmation, Task};
