use serde_json::json;

use crate::error::ChatError;

use super::parsing::{
    extract_reply_text, truncate_for_log, GenerateContentResponse, ModelInfo, ModelsListResponse,
    APOLOGY_REPLY,
};
use super::resolver::{
    pick_fallback_model, resolve_default_spec, with_latest_suffix, ApiVersion, ModelSpec,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the generateContent / model-listing endpoints.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

// Outcome of a single generation attempt. A 404 keeps the fallback chain
// alive; any other non-2xx aborts it.
enum Attempt {
    Reply(String),
    NotFound(String),
    Failed { status: u16, body: String },
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    // ===== SINGLE ATTEMPT =====

    async fn try_generate(&self, spec: &ModelSpec, prompt: &str) -> Result<Attempt, ChatError> {
        let url = format!(
            "{}/{}/models/{}:generateContent?key={}",
            self.base_url, spec.version, spec.model, self.api_key
        );

        let request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ChatError::Internal(format!("generation request failed: {}", e)))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ChatError::Internal(format!("failed to read response body: {}", e)))?;

        if status.is_success() {
            let parsed: GenerateContentResponse = serde_json::from_str(&raw)
                .map_err(|e| ChatError::Internal(format!("malformed generation response: {}", e)))?;
            let reply =
                extract_reply_text(&parsed).unwrap_or_else(|| APOLOGY_REPLY.to_string());
            return Ok(Attempt::Reply(reply));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Attempt::NotFound(raw));
        }

        Ok(Attempt::Failed {
            status: status.as_u16(),
            body: raw,
        })
    }

    // ===== MODEL LISTING =====

    /// List the models available under a surface version. Any failure here
    /// (transport, non-2xx, unparseable body) degrades to an empty list so
    /// the caller can move on to the next candidate version.
    pub async fn list_models(&self, version: ApiVersion) -> Vec<ModelInfo> {
        let url = format!("{}/{}/models?key={}", self.base_url, version, self.api_key);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("│ ⚠️  Listing {} unreachable: {}", version, e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            eprintln!("│ ⚠️  Listing {} returned {}", version, response.status());
            return Vec::new();
        }

        match response.json::<ModelsListResponse>().await {
            Ok(list) => list.models,
            Err(e) => {
                eprintln!("│ ⚠️  Listing {} unparseable: {}", version, e);
                Vec::new()
            }
        }
    }

    // ===== FALLBACK CHAIN =====

    /// Resolve the requested identifier and walk the 404 fallback chain:
    /// primary attempt, `-latest` suffix, version toggle, then a model-listing
    /// lookup under each version. Strictly sequential; first success wins.
    pub async fn generate_with_fallback(
        &self,
        requested: &str,
        version_override: Option<ApiVersion>,
        prompt: &str,
    ) -> Result<String, ChatError> {
        let primary = resolve_default_spec(requested, version_override);

        println!("\x1b[1;30m┌── 🤖 GEMINI GENERATE ────────────────────────\x1b[0m");
        println!("│ 🎯 Requested : {}", requested);
        println!("│ 🔄 Attempt   : {} (primary)", primary);

        let mut last_body = match self.try_generate(&primary, prompt).await? {
            Attempt::Reply(reply) => {
                println!("│ \x1b[32m✅ SUCCESS\x1b[0m   : {}", primary);
                println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                return Ok(reply);
            }
            Attempt::Failed { status, body } => {
                eprintln!("│ ❌ ERROR     : {} - {}", status, truncate_for_log(&body, 60));
                println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                return Err(ChatError::Upstream {
                    status,
                    body,
                    spec: primary,
                });
            }
            Attempt::NotFound(body) => {
                println!("│ ⚠️  NOT FOUND : {}", primary);
                body
            }
        };
        let mut last_spec = primary.clone();

        // Simple candidates: "-latest" suffix first, then the unsuffixed name
        // under the other surface version.
        let mut candidates = Vec::new();
        if let Some(latest) = with_latest_suffix(&primary.model) {
            candidates.push(ModelSpec::new(latest, primary.version));
        }
        candidates.push(ModelSpec::new(primary.model.clone(), primary.version.toggled()));

        for spec in candidates {
            println!("│ 🔄 Attempt   : {}", spec);
            match self.try_generate(&spec, prompt).await? {
                Attempt::Reply(reply) => {
                    println!("│ \x1b[32m✅ SUCCESS\x1b[0m   : {}", spec);
                    println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                    return Ok(reply);
                }
                Attempt::Failed { status, body } => {
                    eprintln!("│ ❌ ERROR     : {} - {}", status, truncate_for_log(&body, 60));
                    println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                    return Err(ChatError::Upstream { status, body, spec });
                }
                Attempt::NotFound(body) => {
                    println!("│ ⚠️  NOT FOUND : {}", spec);
                    last_body = body;
                    last_spec = spec;
                }
            }
        }

        // Both simple fallbacks 404'd: consult the listing endpoint, current
        // version first, and retry with the closest match it offers.
        for version in [primary.version, primary.version.toggled()] {
            println!("│ 📋 Listing   : {} models", version);
            let models = self.list_models(version).await;
            if models.is_empty() {
                println!("│ ⚠️  Listing   : {} empty, skipping", version);
                continue;
            }

            let Some(name) = pick_fallback_model(&primary.model, &models) else {
                println!("│ ⚠️  Listing   : {} has no usable model", version);
                continue;
            };

            let spec = ModelSpec::new(name, version);
            println!("│ 🔄 Attempt   : {} (from listing)", spec);
            match self.try_generate(&spec, prompt).await? {
                Attempt::Reply(reply) => {
                    println!("│ \x1b[32m✅ SUCCESS\x1b[0m   : {}", spec);
                    println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                    return Ok(reply);
                }
                Attempt::Failed { status, body } => {
                    eprintln!("│ ❌ ERROR     : {} - {}", status, truncate_for_log(&body, 60));
                    println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
                    return Err(ChatError::Upstream { status, body, spec });
                }
                Attempt::NotFound(body) => {
                    println!("│ ⚠️  NOT FOUND : {}", spec);
                    last_body = body;
                    last_spec = spec;
                }
            }
        }

        eprintln!("│ ❌ EXHAUSTED : no candidate succeeded");
        println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
        Err(ChatError::Upstream {
            status: 404,
            body: last_body,
            spec: last_spec,
        })
    }
}
