//! Cross-chunk extraction state: dedup, conflict detection and deltas.
//!
//! A [`MeetingExtractor`] is an owned accumulator folded over the ordered
//! chunks of one transcript. Chunk order matters: a later task can evict a
//! task confirmed by an earlier chunk.
//!
//! Conflict handling for a non-duplicate task, keyed by `description`:
//! 1. No confirmed task and never conflicted → confirm.
//! 2. No confirmed task but conflicted → add as a candidate to every pending
//!    bucket for that description. Never confirmed again.
//! 3. Confirmed task exists → compare owner and due date. Agreement drops the
//!    new task; disagreement evicts the confirmed task and opens one bucket per
//!    differing attribute holding both variants.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::rules::{Signal, SignalRules};
use super::types::{ConflictType, ExtractionResult, IncrementalUpdate, PendingConfirmation, Task};

/// Owned extraction state for one invocation.
pub struct MeetingExtractor {
    rules: &'static SignalRules,
    seen_decisions: HashSet<String>,
    seen_tasks: HashSet<String>,
    decisions: Vec<String>,
    /// Confirmed tasks in first-confirmation order.
    confirmed: Vec<Task>,
    /// `description` → its currently confirmed task.
    confirmed_index: HashMap<String, Task>,
    conflicted: HashSet<String>,
    pending: Vec<PendingConfirmation>,
    updates: Vec<IncrementalUpdate>,
}

impl MeetingExtractor {
    /// Create an extractor using the standard marker rules.
    pub fn new() -> Self {
        Self::with_rules(SignalRules::standard())
    }

    /// Create an extractor using the given marker rules.
    pub fn with_rules(rules: &'static SignalRules) -> Self {
        Self {
            rules,
            seen_decisions: HashSet::new(),
            seen_tasks: HashSet::new(),
            decisions: Vec::new(),
            confirmed: Vec::new(),
            confirmed_index: HashMap::new(),
            conflicted: HashSet::new(),
            pending: Vec::new(),
            updates: Vec::new(),
        }
    }

    /// Feed the next chunk and return its delta.
    pub fn ingest(&mut self, chunk: &str) -> IncrementalUpdate {
        let chunk_index = self.updates.len();
        let decisions_before = self.decisions.len();
        let tasks_before = self.confirmed.len();

        for signal in self.rules.classify_chunk(chunk) {
            match signal {
                Signal::Decision(text) => self.admit_decision(text),
                Signal::Task(raw) => self.admit_task(raw),
            }
        }

        let update = IncrementalUpdate {
            chunk_index,
            decisions_added: self.decisions.len() - decisions_before,
            tasks_added: self.confirmed.len() as i64 - tasks_before as i64,
            total_decisions: self.decisions.len(),
            total_tasks: self.confirmed.len(),
        };
        debug!(
            chunk_index,
            decisions_added = update.decisions_added,
            tasks_added = update.tasks_added,
            "Chunk ingested"
        );
        self.updates.push(update);
        update
    }

    /// Confirmed tasks so far.
    pub fn confirmed_tasks(&self) -> &[Task] {
        &self.confirmed
    }

    /// Pending confirmations so far.
    pub fn pending_confirmations(&self) -> &[PendingConfirmation] {
        &self.pending
    }

    /// Whether `description` has been flagged as conflicted.
    pub fn is_conflicted(&self, description: &str) -> bool {
        self.conflicted.contains(description)
    }

    /// Consume the extractor and return the final result.
    pub fn finish(self) -> ExtractionResult {
        ExtractionResult {
            decisions: self.decisions,
            tasks: self.confirmed,
            pending_confirmations: self.pending,
            incremental_updates: self.updates,
        }
    }

    fn admit_decision(&mut self, text: String) {
        if !self.seen_decisions.insert(text.clone()) {
            debug!(decision = %text, "Duplicate decision skipped");
            return;
        }
        self.decisions.push(text);
    }

    fn admit_task(&mut self, raw_text: String) {
        if !self.seen_tasks.insert(raw_text.clone()) {
            debug!(task = %raw_text, "Duplicate task skipped");
            return;
        }
        let task = Task::parse(raw_text);

        let Some(confirmed) = self.confirmed_index.get(&task.description).cloned() else {
            if self.conflicted.contains(&task.description) {
                self.queue_variant(&task);
            } else {
                self.confirm(task);
            }
            return;
        };

        let conflicts = confirmed.conflicts_with(&task);
        if conflicts.is_empty() {
            debug!(
                description = %task.description,
                task = %task.raw_text,
                "Task agrees with confirmed task, dropped"
            );
            return;
        }

        let evicted = confirmed;
        self.confirmed_index.remove(&task.description);
        self.confirmed.retain(|t| t.description != task.description);
        self.conflicted.insert(task.description.clone());
        warn!(
            description = %task.description,
            evicted = %evicted.raw_text,
            incoming = %task.raw_text,
            conflicts = ?conflicts,
            "Conflicting task evicted confirmed task"
        );

        for conflict_type in conflicts {
            let bucket = self.bucket_mut(conflict_type, &task.description);
            bucket.add_candidate(&evicted);
            bucket.add_candidate(&task);
        }
    }

    fn confirm(&mut self, task: Task) {
        debug!(
            description = %task.description,
            owner = task.owner.as_deref().unwrap_or(""),
            due_at = task.due_at.as_deref().unwrap_or(""),
            "Task confirmed"
        );
        self.confirmed_index
            .insert(task.description.clone(), task.clone());
        self.confirmed.push(task);
    }

    /// Add a variant of an already-conflicted description to its buckets.
    fn queue_variant(&mut self, task: &Task) {
        for bucket in self
            .pending
            .iter_mut()
            .filter(|p| p.description == task.description)
        {
            if bucket.add_candidate(task) {
                debug!(
                    description = %task.description,
                    conflict_type = %bucket.conflict_type,
                    task = %task.raw_text,
                    "Queued variant of conflicted task"
                );
            }
        }
    }

    fn bucket_mut(
        &mut self,
        conflict_type: ConflictType,
        description: &str,
    ) -> &mut PendingConfirmation {
        let index = match self
            .pending
            .iter()
            .position(|p| p.conflict_type == conflict_type && p.description == description)
        {
            Some(index) => index,
            None => {
                self.pending
                    .push(PendingConfirmation::new(conflict_type, description));
                self.pending.len() - 1
            }
        };
        &mut self.pending[index]
    }
}

impl Default for MeetingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold an ordered chunk sequence into a final result.
pub fn extract_chunks<S: AsRef<str>>(chunks: &[S]) -> ExtractionResult {
    let mut extractor = MeetingExtractor::new();
    for chunk in chunks {
        extractor.ingest(chunk.as_ref());
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptions(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = extract_chunks::<&str>(&[]);
        assert_eq!(result, ExtractionResult::default());
        assert!(result.is_empty());
    }

    #[test]
    fn repeated_chunk_adds_nothing() {
        let chunk = "决策：上线\n待办：张三 在 2026-02-25 前完成 签约材料";
        let result = extract_chunks(&[chunk, chunk]);
        assert_eq!(result.incremental_updates[0].decisions_added, 1);
        assert_eq!(result.incremental_updates[0].tasks_added, 1);
        assert_eq!(result.incremental_updates[1].decisions_added, 0);
        assert_eq!(result.incremental_updates[1].tasks_added, 0);
        assert_eq!(result.incremental_updates[1].total_tasks, 1);
    }

    #[test]
    fn owner_disagreement_evicts_and_queues() {
        let result = extract_chunks(&[
            "待办：张三 在 2026-02-25 前完成 签约材料",
            "待办：李四 在 2026-02-25 前完成 签约材料",
        ]);
        assert!(result.tasks.is_empty());
        assert_eq!(result.pending_confirmations.len(), 1);
        let pending = &result.pending_confirmations[0];
        assert_eq!(pending.conflict_type, ConflictType::OwnerConflict);
        assert_eq!(pending.description, "签约材料");
        let owners: Vec<_> = pending
            .candidates
            .iter()
            .map(|c| c.owner.as_deref().unwrap())
            .collect();
        assert_eq!(owners, vec!["张三", "李四"]);
        assert_eq!(result.incremental_updates[1].tasks_added, -1);
        assert_eq!(result.incremental_updates[1].total_tasks, 0);
    }

    #[test]
    fn date_only_disagreement_opens_one_bucket() {
        let result = extract_chunks(&[
            "待办：王五 在 2026-02-26 前完成 预算复核\n待办：王五 在 2026-02-27 前完成 预算复核",
        ]);
        assert!(result.tasks.is_empty());
        assert_eq!(result.pending_confirmations.len(), 1);
        assert_eq!(
            result.pending_confirmations[0].conflict_type,
            ConflictType::DateConflict
        );
        // Confirmed then evicted inside the same chunk nets to zero.
        assert_eq!(result.incremental_updates[0].tasks_added, 0);
    }

    #[test]
    fn owner_and_date_disagreement_opens_two_buckets() {
        let result = extract_chunks(&[
            "待办：张三 在 2026-02-25 前完成 合同",
            "待办：李四 在 2026-02-28 前完成 合同",
        ]);
        let kinds: Vec<_> = result
            .pending_confirmations
            .iter()
            .map(|p| p.conflict_type)
            .collect();
        assert_eq!(
            kinds,
            vec![ConflictType::OwnerConflict, ConflictType::DateConflict]
        );
        assert!(
            result
                .pending_confirmations
                .iter()
                .all(|p| p.candidates.len() == 2)
        );
    }

    #[test]
    fn agreeing_duplicate_collapses_to_one() {
        let result = extract_chunks(&[
            "待办：张三 在 2026-02-25 前完成 签约材料\n待办：张三 在 2026-02-25 前完成  签约材料",
        ]);
        assert_eq!(descriptions(&result.tasks), vec!["签约材料"]);
        assert!(result.pending_confirmations.is_empty());
    }

    #[test]
    fn missing_attribute_is_not_a_conflict() {
        let result = extract_chunks(&["待办：张三 在 2026-02-25 前完成 签约材料\n待办：签约材料"]);
        // Same description, but the second task carries no owner or date to compare.
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.tasks[0].owner.as_deref(), Some("张三"));
        assert!(result.pending_confirmations.is_empty());
    }

    #[test]
    fn conflict_is_sticky() {
        let mut extractor = MeetingExtractor::new();
        extractor.ingest("待办：张三 在 2026-02-25 前完成 签约材料");
        extractor.ingest("待办：李四 在 2026-02-25 前完成 签约材料");
        assert!(extractor.is_conflicted("签约材料"));

        // Exact repeat is a no-op.
        let update = extractor.ingest("待办：张三 在 2026-02-25 前完成 签约材料");
        assert_eq!(update.tasks_added, 0);
        // A new phrasing matching an existing candidate is still queued, not confirmed.
        let update = extractor.ingest("待办：张三  在 2026-02-25 前完成 签约材料");
        assert_eq!(update.tasks_added, 0);
        assert!(extractor.confirmed_tasks().is_empty());

        let result = extractor.finish();
        assert_eq!(result.pending_confirmations.len(), 1);
        assert_eq!(result.pending_confirmations[0].candidates.len(), 3);
    }

    #[test]
    fn late_variant_joins_every_bucket_for_description() {
        let result = extract_chunks(&[
            "待办：张三 在 2026-02-25 前完成 合同",
            "待办：李四 在 2026-02-28 前完成 合同",
            "待办：合同",
        ]);
        // "合同" has no phrase, so its description is "合同" too.
        assert_eq!(result.pending_confirmations.len(), 2);
        for pending in &result.pending_confirmations {
            assert_eq!(pending.candidates.len(), 3);
            assert_eq!(pending.candidates[2].raw_text, "合同");
        }
        assert!(result.tasks.is_empty());
    }

    #[test]
    fn eviction_keeps_survivor_order() {
        let result = extract_chunks(&[
            "待办：甲 在 2026-01-01 前完成 一\n待办：乙 在 2026-01-02 前完成 二\n待办：丙 在 2026-01-03 前完成 三",
            "待办：丁 在 2026-01-02 前完成 二\n待办：戊 在 2026-01-04 前完成 四",
        ]);
        assert_eq!(descriptions(&result.tasks), vec!["一", "三", "四"]);
        assert_eq!(result.incremental_updates[1].tasks_added, 0);
        assert_eq!(result.incremental_updates[1].total_tasks, 3);
    }

    #[test]
    fn full_width_date_does_not_evict_confirmed_task() {
        let result = extract_chunks(&[
            "待办：张三 在 2026-02-25 前完成 签约材料",
            "待办：张三 在 ２０２６-０２-２５ 前完成 签约材料",
        ]);
        assert!(result.pending_confirmations.is_empty());
        assert_eq!(result.tasks.len(), 2);
        assert_eq!(result.tasks[0].description, "签约材料");
        assert!(result.tasks[1].owner.is_none());
        assert!(result.tasks[1].due_at.is_none());
    }

    #[test]
    fn evicted_description_can_not_be_reconfirmed() {
        let mut extractor = MeetingExtractor::new();
        extractor.ingest("待办：甲 在 2026-01-01 前完成 一\n待办：乙 在 2026-01-01 前完成 一");
        assert!(extractor.confirmed_tasks().is_empty());
        extractor.ingest("待办：丙 在 2026-01-02 前完成 二");
        let update = extractor.ingest("待办：甲 在 2026-01-01 前完成一");
        assert_eq!(update.tasks_added, 0);
        assert_eq!(descriptions(extractor.confirmed_tasks()), vec!["二"]);
        assert_eq!(extractor.pending_confirmations()[0].candidates.len(), 3);
    }

    #[test]
    fn decisions_dedup_across_chunks() {
        let result = extract_chunks(&["决策：采用方案B", "decision: 采用方案B\n决策：采用方案B"]);
        assert_eq!(result.decisions, vec!["采用方案B"]);
        assert_eq!(result.incremental_updates[0].decisions_added, 1);
        assert_eq!(result.incremental_updates[1].decisions_added, 0);
    }

    #[test]
    fn chunk_indexes_follow_arrival_order() {
        let result = extract_chunks(&["", "noise", "决策：x"]);
        let indexes: Vec<_> = result
            .incremental_updates
            .iter()
            .map(|u| u.chunk_index)
            .collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }
}
