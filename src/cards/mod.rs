//! Dispatch cards — human-facing summaries of extraction output.

pub mod builder;
pub mod model;

pub use builder::{build_dispatch_card, build_dispatch_card_with_limit};
pub use model::{CardAction, CardType, DispatchCard, DispatchItem};
