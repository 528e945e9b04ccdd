use std::fs;
use std::path::Path;

use thiserror::Error;

pub const DEFAULT_KNOWLEDGE_PATH: &str = "data/knowledge.json";

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge document at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("knowledge document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("knowledge document must be a JSON object")]
    NotAnObject,
}

/// Load the static institute knowledge document and render it for prompt
/// injection. Read fresh on every request; a missing or malformed document is
/// a fatal request failure, there is no fallback knowledge source.
pub fn load_knowledge(path: &Path) -> Result<String, KnowledgeError> {
    let raw = fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let document: serde_json::Value = serde_json::from_str(&raw)?;
    if !document.is_object() {
        return Err(KnowledgeError::NotAnObject);
    }

    Ok(serde_json::to_string_pretty(&document)?)
}
