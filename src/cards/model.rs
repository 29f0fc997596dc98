//! Dispatch card data model — the post-meeting summary posted to chat.

use serde::{Deserialize, Serialize};

/// What kind of card this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Post-meeting task dispatch.
    #[default]
    MeetingDispatch,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeetingDispatch => write!(f, "meeting_dispatch"),
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting_dispatch" => Ok(Self::MeetingDispatch),
            _ => Err(format!("Unknown card type: {}", s)),
        }
    }
}

/// Actions a recipient can take on a dispatched task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    /// Take ownership of the task as stated.
    Accept,
    /// Drop the task.
    Ignore,
    /// Ask for a different due date.
    Reschedule,
}

impl CardAction {
    /// The fixed action set offered on every item, in display order.
    pub const ALL: [CardAction; 3] = [Self::Accept, Self::Ignore, Self::Reschedule];
}

impl std::fmt::Display for CardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Ignore => write!(f, "ignore"),
            Self::Reschedule => write!(f, "reschedule"),
        }
    }
}

impl std::str::FromStr for CardAction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Self::Accept),
            "ignore" => Ok(Self::Ignore),
            "reschedule" => Ok(Self::Reschedule),
            _ => Err(format!("Unknown card action: {}", s)),
        }
    }
}

/// One confirmed task rendered on a dispatch card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchItem {
    /// `<meetingId>-task-<n>`, 1-based.
    pub id: String,
    /// Task description, or its raw text when the description is empty.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    /// Present only alongside `due_at`; `false` flags a date-shaped but impossible date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at_valid: Option<bool>,
    pub actions: Vec<CardAction>,
}

/// Post-meeting dispatch card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCard {
    pub card_type: CardType,
    pub title: String,
    pub meeting_id: String,
    /// Number of confirmed tasks, including those beyond the rendered items.
    pub task_count: usize,
    pub pending_count: usize,
    pub items: Vec<DispatchItem>,
}

impl DispatchCard {
    /// True when confirmed tasks were left off the card.
    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.task_count
    }
}
