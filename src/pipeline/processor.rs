//! Meeting processor — turns an extraction request into a response.
//!
//! Flow:
//! 1. Normalize the request into ordered plain-text chunks
//! 2. Fold the chunks through a fresh `MeetingExtractor`
//! 3. Build the post-meeting dispatch card
//!
//! Each call owns its own extraction state, so one processor can serve
//! concurrent meetings without locking.

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cards::build_dispatch_card_with_limit;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::extract::extract_chunks;
use crate::pipeline::types::{ExtractionRequest, ExtractionResponse};

/// Stateless request processor.
#[derive(Debug, Clone, Default)]
pub struct MeetingProcessor {
    config: ExtractorConfig,
}

impl MeetingProcessor {
    /// Create a processor with the given config.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create a processor configured from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ExtractorConfig::from_env()?))
    }

    /// Load a request JSON file and process it.
    pub fn process_path(&self, path: &Path) -> Result<ExtractionResponse> {
        let request = ExtractionRequest::from_path(path)?;
        Ok(self.process(&request))
    }

    /// Parse a request from JSON and process it.
    pub fn process_json(&self, json: &str) -> Result<ExtractionResponse> {
        let request = ExtractionRequest::from_json_str(json)?;
        Ok(self.process(&request))
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Process one request end to end. Never fails.
    pub fn process(&self, request: &ExtractionRequest) -> ExtractionResponse {
        let meeting_id = self.resolve_meeting_id(request);
        let input = request.normalize();

        info!(
            meeting_id = %meeting_id,
            source_type = ?input.source_type,
            chunks = input.chunks.len(),
            "Processing transcript"
        );

        let result = extract_chunks(&input.chunks);

        let card = build_dispatch_card_with_limit(
            &meeting_id,
            &result.tasks,
            &result.pending_confirmations,
            self.config.card_item_limit,
        );

        if result.is_empty() {
            debug!(meeting_id = %meeting_id, "Nothing extracted from transcript");
        }
        info!(
            meeting_id = %meeting_id,
            decisions = result.decisions.len(),
            tasks = result.tasks.len(),
            pending = result.pending_confirmations.len(),
            "Transcript processed"
        );

        ExtractionResponse {
            source_type: input.source_type,
            transcript_text: input.transcript_text(),
            decision_count: result.decisions.len(),
            task_count: result.tasks.len(),
            decisions: result.decisions,
            tasks: result.tasks,
            pending_confirmations: result.pending_confirmations,
            incremental_updates: result.incremental_updates,
            post_meeting_card: card,
        }
    }

    /// The caller's meeting id, or a generated request-scoped one.
    fn resolve_meeting_id(&self, request: &ExtractionRequest) -> String {
        match request.meeting_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}-{}", self.config.meeting_id_prefix, Uuid::new_v4()),
        }
    }
}
