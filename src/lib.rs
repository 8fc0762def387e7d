pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use api::{ModerationClient, RunError, RunSummary, StoreError};
