use serde::Deserialize;

// ===== API RESPONSE STRUCTURES =====

// generateContent response structure
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    // Absent when the candidate was blocked or truncated before any content
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

// Model listing response structure
#[derive(Debug, Deserialize)]
pub struct ModelsListResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Listing names arrive as "models/<short-name>"; comparisons use the short name.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }

    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

// ===== RESPONSE EXTRACTORS =====

/// Reply substituted when a 2xx response carries no text candidate.
pub const APOLOGY_REPLY: &str =
    "Sorry, I couldn't come up with an answer for that. Please try rephrasing your question.";

/// Extract the first candidate's first text part from a generation response.
pub fn extract_reply_text(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .map(|part| part.text.clone())
        .filter(|text| !text.is_empty())
}

// ===== HELPERS =====

/// Truncate text for logging
pub(super) fn truncate_for_log(text: &str, max_len: usize) -> String {
    let clean_text = text.replace('\n', " ");
    if clean_text.chars().count() <= max_len {
        clean_text
    } else {
        format!("{}...", clean_text.chars().take(max_len).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_text() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "We offer X, Y, Z." } ] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            extract_reply_text(&response).as_deref(),
            Some("We offer X, Y, Z.")
        );
    }

    #[test]
    fn test_extract_reply_text_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(extract_reply_text(&response), None);

        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_reply_text(&response), None);
    }

    #[test]
    fn test_extract_reply_text_blocked_candidate() {
        let raw = r#"{"candidates": [ { "finishReason": "SAFETY" } ]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_reply_text(&response), None);
    }

    #[test]
    fn test_model_info_short_name() {
        let model = ModelInfo {
            name: "models/gemini-1.5-flash".to_string(),
            supported_generation_methods: vec!["generateContent".to_string()],
        };
        assert_eq!(model.short_name(), "gemini-1.5-flash");
        assert!(model.supports_generate_content());

        let bare = ModelInfo {
            name: "gemini-1.5-flash".to_string(),
            supported_generation_methods: vec!["embedContent".to_string()],
        };
        assert_eq!(bare.short_name(), "gemini-1.5-flash");
        assert!(!bare.supports_generate_content());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(
            truncate_for_log("this is a very long text", 10),
            "this is a ..."
        );
    }
}
