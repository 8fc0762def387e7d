pub mod config;
pub mod prompts;
pub mod storage;
pub mod utils;
