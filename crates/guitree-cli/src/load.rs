//! Loading documents, command lists and merge policies from disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use guitree_merge::{CommandSet, MergeConfig};
use guitree_types::Element;
use tracing::debug;

/// Read a JSON document and check that it is well formed.
pub fn read_document(path: &Path) -> anyhow::Result<Element> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let element: Element = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse document {}", path.display()))?;
    element
        .validate()
        .with_context(|| format!("malformed document {}", path.display()))?;
    debug!(path = %path.display(), elements = element.count(), "loaded document");
    Ok(element)
}

/// Parse a command list: one name per line, `#` starts a comment line.
pub fn parse_command_list(text: &str) -> CommandSet {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Read a command list file.
pub fn read_command_file(path: &Path) -> anyhow::Result<CommandSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read command list {}", path.display()))?;
    Ok(parse_command_list(&text))
}

/// Read a TOML merge policy.
pub fn read_config(path: &Path) -> anyhow::Result<MergeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}
