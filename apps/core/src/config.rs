//! Environment-driven configuration for the collaborator clients.
//!
//! All endpoints and credentials come from the environment (optionally via a
//! `.env` file). Nothing here is persisted; the core never writes config.

use crate::error::AppError;
use std::env;

/// Default Gemini-family model used for companion text generation.
const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// Default public endpoints. Tests override these to point at a mock server.
const DEFAULT_SPEECH_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Resolved configuration for every external collaborator.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Base URL of the datastore REST API.
    pub store_url: String,
    /// Service key for the datastore.
    pub store_key: String,
    /// API key for the speech-synthesis service.
    pub speech_api_key: String,
    /// Voice identifier used for all synthesized speech.
    pub speech_voice_id: String,
    /// Base URL of the speech-synthesis service.
    pub speech_base_url: String,
    /// API key for the text-generation service.
    pub generation_api_key: String,
    /// Model identifier for text generation.
    pub generation_model: String,
    /// Base URL of the text-generation service.
    pub generation_base_url: String,
    /// Workflow webhook URL for care-circle notifications.
    pub webhook_url: String,
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("Missing environment variable: {}", key)))
}

fn required_url(key: &str) -> Result<String, AppError> {
    let raw = required(key)?;
    url::Url::parse(&raw)
        .map_err(|e| AppError::Config(format!("Invalid URL in {}: {}", key, e)))?;
    Ok(raw)
}

impl CoreConfig {
    /// Loads configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        Ok(Self {
            store_url: required_url("SUPABASE_URL")?,
            store_key: required("SUPABASE_SERVICE_KEY")?,
            speech_api_key: required("ELEVENLABS_API_KEY")?,
            speech_voice_id: required("ELEVENLABS_VOICE_ID")?,
            speech_base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SPEECH_BASE_URL.to_string()),
            generation_api_key: required("GEMINI_API_KEY")?,
            generation_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            generation_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_BASE_URL.to_string()),
            webhook_url: required_url("CARE_WEBHOOK_URL")?,
        })
    }
}
