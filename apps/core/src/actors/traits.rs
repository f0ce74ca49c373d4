use crate::error::AppError;
use crate::models::AudioRef;
use async_trait::async_trait;

/// Defines the public interface for the speech-synthesis collaborator.
///
/// Abstracts the concrete TTS backend so tests can inject a mock and the
/// production ElevenLabs-shaped actor stays swappable.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesizes the given text into an audio payload. May fail.
    async fn synthesize(&self, text: &str) -> Result<AudioRef, AppError>;
}

/// Defines the public interface for the generative-text collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Generates a text completion for a prompt with optional persona
    /// instructions and temperature.
    async fn generate(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError>;
}

/// Defines the public interface for the datastore collaborator.
///
/// Persistence is best-effort: `save` never returns an error. Failures are
/// logged by the implementation and reported as `false`.
#[async_trait]
pub trait CareStore: Send + Sync + 'static {
    /// Saves a record into the named collection, returning whether it stuck.
    async fn save(&self, collection: &str, record: serde_json::Value) -> bool;
}

/// Defines the public interface for the care-circle notification collaborator.
#[async_trait]
pub trait CareCircleNotifier: Send + Sync + 'static {
    /// Delivers an event to the workflow webhook. Transport failure is an
    /// error; a non-success response is `Ok(false)`.
    async fn notify(&self, event: &str, payload: serde_json::Value) -> Result<bool, AppError>;
}
