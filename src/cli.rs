//! Defines the command-line interface structure using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prompt-moderator",
    version,
    about = "Submit delimited prompts to a moderation API and record the results"
)]
pub struct Cli {
    /// Settings file (defaults to ./moderator.toml when present)
    #[arg(long, env = "MODERATOR_CONFIG")]
    pub config: Option<PathBuf>,
}
