//! Request pipeline around the extraction engine.
//!
//! Every request flows through:
//! 1. `ExtractionRequest::normalize()` — stream items or text → plain chunks
//! 2. `MeetingExtractor` — ordered fold over the chunks
//! 3. `build_dispatch_card()` — presentation for chat delivery
//!
//! **No conflict is ever auto-resolved.** Disputed tasks stay queued as
//! pending confirmations for a human to decide.

pub mod processor;
pub mod types;

pub use processor::MeetingProcessor;
pub use types::{ExtractionRequest, ExtractionResponse, NormalizedInput, SourceType, StreamItem};
