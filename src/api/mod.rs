//! Moderation endpoint client and the library's error types.

mod client;
mod error;

pub use client::{flagged, ModerationClient};
pub use error::{ConfigError, ModerationError, RunError, StoreError};

/// Outcome of a completed batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of prompts moderated and persisted.
    pub moderated: usize,
    /// How many of them the provider flagged.
    pub flagged: usize,
}
