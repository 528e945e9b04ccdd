mod client;
mod parsing;
mod prompts;
mod resolver;

// ===== MODEL CONFIGURATION =====

// Default logical model when GEMINI_MODEL is not set.
// Flash is the cheapest combination that free-tier keys reliably have access to.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

// ===== PUBLIC API =====

pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use parsing::{GenerateContentResponse, ModelInfo, ModelsListResponse, APOLOGY_REPLY};
pub use prompts::build_chat_prompt;
pub use resolver::{
    family_prefix, pick_fallback_model, resolve_default_spec, with_latest_suffix, ApiVersion,
    ModelSpec,
};
