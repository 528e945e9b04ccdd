pub mod config;
pub mod error;
pub mod gemini;
pub mod handler;
pub mod knowledge;
pub mod models;
