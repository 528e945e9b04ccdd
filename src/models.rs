use serde::Serialize;

// ===== CHAT WIDGET TYPES =====

// Inbound bodies are validated field by field in the handler, so only the
// success shape gets a struct.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
