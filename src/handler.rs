use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::time::Instant;

use crate::config::Config;
use crate::error::ChatError;
use crate::gemini::{build_chat_prompt, GeminiClient};
use crate::knowledge::load_knowledge;
use crate::models::ChatResponse;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}

/// POST /chat — forward one widget message to the model and return its reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ChatResponse>, ChatError> {
    let request_start = Instant::now();

    // Validate before anything that touches the network.
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .ok_or(ChatError::InvalidMessage)?;

    let api_key = state
        .config
        .api_key
        .clone()
        .ok_or(ChatError::MissingApiKey)?;

    println!("\n| Message : \x1b[32m{}\x1b[0m", message);
    println!(
        "| Model   : \x1b[32m{}\x1b[0m{}",
        state.config.model,
        state
            .config
            .version_override
            .map(|v| format!(" (forced {})", v))
            .unwrap_or_default()
    );

    let knowledge = load_knowledge(&state.config.knowledge_path)?;
    let prompt = build_chat_prompt(&knowledge, message);

    let client =
        GeminiClient::new(state.http.clone(), api_key).with_base_url(state.config.base_url.clone());
    let reply = client
        .generate_with_fallback(&state.config.model, state.config.version_override, &prompt)
        .await?;

    println!("⏱️  Request processed in: {:.2?}\n", request_start.elapsed());

    Ok(Json(ChatResponse { reply }))
}
