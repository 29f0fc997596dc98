//! Meeting Assist — rule-based meeting transcript extraction.

pub mod cards;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
