//! Dispatch card builder — renders extraction output for chat delivery.
//!
//! Pure presentation: no I/O, no side effects.

use tracing::debug;

use crate::extract::types::{PendingConfirmation, Task};

use super::model::{CardAction, CardType, DispatchCard, DispatchItem};

/// Default number of confirmed tasks rendered as items.
pub const DEFAULT_ITEM_LIMIT: usize = 8;

/// Build a dispatch card with the default item limit.
pub fn build_dispatch_card(
    meeting_id: &str,
    tasks: &[Task],
    pending: &[PendingConfirmation],
) -> DispatchCard {
    build_dispatch_card_with_limit(meeting_id, tasks, pending, DEFAULT_ITEM_LIMIT)
}

/// Build a dispatch card rendering at most `limit` confirmed tasks.
pub fn build_dispatch_card_with_limit(
    meeting_id: &str,
    tasks: &[Task],
    pending: &[PendingConfirmation],
    limit: usize,
) -> DispatchCard {
    let items: Vec<DispatchItem> = tasks
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, task)| render_item(meeting_id, i + 1, task))
        .collect();

    if items.len() < tasks.len() {
        debug!(
            meeting_id,
            rendered = items.len(),
            total = tasks.len(),
            "Dispatch card truncated"
        );
    }

    DispatchCard {
        card_type: CardType::MeetingDispatch,
        title: format!("Meeting {} dispatch", meeting_id),
        meeting_id: meeting_id.to_string(),
        task_count: tasks.len(),
        pending_count: pending.len(),
        items,
    }
}

fn render_item(meeting_id: &str, n: usize, task: &Task) -> DispatchItem {
    let title = if task.description.is_empty() {
        task.raw_text.clone()
    } else {
        task.description.clone()
    };

    DispatchItem {
        id: format!("{}-task-{}", meeting_id, n),
        title,
        owner: task.owner.clone(),
        due_at: task.due_at.clone(),
        due_at_valid: task.due_at.as_ref().map(|_| task.due_date().is_some()),
        actions: CardAction::ALL.to_vec(),
    }
}
