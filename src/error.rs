use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::gemini::ModelSpec;
use crate::knowledge::KnowledgeError;

// ===== REQUEST ERROR TAXONOMY =====

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message must be a non-empty string")]
    InvalidMessage,
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("knowledge base unavailable: {0}")]
    Knowledge(#[from] KnowledgeError),
    #[error("upstream returned {status} for {spec}")]
    Upstream {
        status: u16,
        body: String,
        spec: ModelSpec,
    },
    #[error("{0}")]
    Internal(String),
}

/// Human-readable hint attached to 502 responses for upstream statuses a
/// caller can usually fix themselves.
pub fn hint_for_status(status: u16) -> Option<&'static str> {
    match status {
        404 => Some(
            "Model or API version not found. Known-good combinations: \
             gemini-1.5-flash on v1, or gemini-1.0-pro on v1beta.",
        ),
        403 => Some(
            "Access denied. Check that your API key type matches the endpoint: \
             free-tier AI Studio keys only work with the Generative Language API.",
        ),
        _ => None,
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match self {
            ChatError::InvalidMessage => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Field 'message' must be a non-empty string" })),
            )
                .into_response(),

            ChatError::MissingApiKey => {
                eprintln!("❌ GEMINI_API_KEY is not set, refusing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Server is missing its GEMINI_API_KEY configuration" })),
                )
                    .into_response()
            }

            // Diagnostic detail stays in the server log, not the response.
            ChatError::Knowledge(e) => {
                eprintln!("❌ Knowledge base error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }

            ChatError::Internal(e) => {
                eprintln!("❌ Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }

            ChatError::Upstream { status, body, spec } => {
                eprintln!("❌ Upstream failure {} from {}", status, spec);
                let mut payload = json!({
                    "error": "Upstream model call failed",
                    "status": status,
                    "details": body,
                    "model": spec.model,
                    "apiVersion": spec.version.as_str(),
                });
                if let Some(hint) = hint_for_status(status) {
                    payload["hint"] = json!(hint);
                }
                (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
            }
        }
    }
}
