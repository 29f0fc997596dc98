//! Request/response types at the workflow boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::DispatchCard;
use crate::error::RequestError;
use crate::extract::types::{IncrementalUpdate, PendingConfirmation, Task};

// ── Request ─────────────────────────────────────────────────────────

/// One transcript stream item: a bare string or a `{ "text": ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamItem {
    Text(String),
    Chunk { text: String },
}

impl StreamItem {
    /// The chunk text, whatever the wire shape.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Chunk { text } => text,
        }
    }
}

impl From<&str> for StreamItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Extraction request from the workflow layer or a channel event handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Whole transcript as a single block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Ordered chunks. Takes precedence over `raw_text` when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_stream: Option<Vec<StreamItem>>,
    /// Correlation id. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
}

impl ExtractionRequest {
    /// Request for a single block of text.
    pub fn from_text(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(raw_text.into()),
            ..Default::default()
        }
    }

    /// Request for an ordered chunk stream.
    pub fn from_stream<I, T>(chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StreamItem>,
    {
        Self {
            transcript_stream: Some(chunks.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Builder: set the meeting id.
    pub fn with_meeting_id(mut self, meeting_id: impl Into<String>) -> Self {
        self.meeting_id = Some(meeting_id.into());
        self
    }

    /// Parse a request from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request JSON file.
    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        let json = std::fs::read_to_string(path).map_err(|source| RequestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Normalize the input into plain chunk strings.
    ///
    /// A non-empty stream wins; otherwise non-blank `raw_text` is one chunk;
    /// otherwise there are no chunks.
    pub fn normalize(&self) -> NormalizedInput {
        if let Some(stream) = self.transcript_stream.as_ref().filter(|s| !s.is_empty()) {
            return NormalizedInput {
                source_type: SourceType::TranscriptStream,
                chunks: stream.iter().map(|item| item.text().to_string()).collect(),
            };
        }

        let chunks = match self.raw_text.as_deref() {
            Some(text) if !text.trim().is_empty() => vec![text.to_string()],
            _ => Vec::new(),
        };
        NormalizedInput {
            source_type: SourceType::Text,
            chunks,
        }
    }
}

/// Where the transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Text,
    TranscriptStream,
}

/// Request input reduced to ordered plain-text chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub source_type: SourceType,
    pub chunks: Vec<String>,
}

impl NormalizedInput {
    /// The full transcript as one string.
    pub fn transcript_text(&self) -> String {
        self.chunks.join("\n")
    }
}

// ── Response ────────────────────────────────────────────────────────

/// Extraction response handed back to the workflow layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub source_type: SourceType,
    pub transcript_text: String,
    pub decision_count: usize,
    pub task_count: usize,
    pub decisions: Vec<String>,
    pub tasks: Vec<Task>,
    pub pending_confirmations: Vec<PendingConfirmation>,
    pub incremental_updates: Vec<IncrementalUpdate>,
    pub post_meeting_card: DispatchCard,
}
