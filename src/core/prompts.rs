//! Parsing of `---` separated prompt files.

use std::fs;
use std::path::Path;

use crate::api::StoreError;

/// Separator between prompt blocks. Matches anywhere in the text.
pub const BLOCK_DELIMITER: &str = "---";
/// Optional first-line tag carrying the prompt's label.
pub const LABEL_TAG: &str = "#LABEL:";

/// One prompt read from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBlock {
    pub label: Option<String>,
    pub content: String,
}

impl PromptBlock {
    /// The label, if present and not blank.
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// Reads and parses a prompt file.
pub fn load_prompts(path: &Path) -> Result<Vec<PromptBlock>, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(parse_prompts(&text))
}

pub fn parse_prompts(text: &str) -> Vec<PromptBlock> {
    text.split(BLOCK_DELIMITER)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> PromptBlock {
    let (head, rest) = match block.split_once('\n') {
        Some((head, rest)) => (head, Some(rest)),
        None => (block, None),
    };

    if head.starts_with(LABEL_TAG) {
        PromptBlock {
            label: Some(head.replace(LABEL_TAG, "").trim().to_string()),
            content: rest.map(str::trim).unwrap_or_default().to_string(),
        }
    } else {
        PromptBlock {
            label: None,
            content: block.to_string(),
        }
    }
}
