use std::path::PathBuf;

use crate::gemini::{ApiVersion, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::knowledge::DEFAULT_KNOWLEDGE_PATH;

/// Environment-provided settings, read once at startup. A missing API key is
/// not fatal here; the handler reports it per request so the error surfaces
/// as JSON instead of a dead process.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub version_override: Option<ApiVersion>,
    pub knowledge_path: PathBuf,
    pub base_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let version_override = std::env::var("GEMINI_API_VERSION")
            .ok()
            .and_then(|raw| match ApiVersion::parse(&raw) {
                Some(version) => Some(version),
                None => {
                    eprintln!("⚠️  Ignoring unrecognized GEMINI_API_VERSION: {}", raw);
                    None
                }
            });

        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: std::env::var("GEMINI_MODEL")
                .ok()
                .filter(|model| !model.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            version_override,
            knowledge_path: std::env::var("KNOWLEDGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_KNOWLEDGE_PATH)),
            base_url: DEFAULT_BASE_URL.to_string(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
        }
    }
}
