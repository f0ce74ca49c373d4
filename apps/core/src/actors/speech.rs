use crate::actors::messages::SpeechMessage;
use crate::actors::traits::SpeechSynthesizer;
use crate::config::CoreConfig;
use crate::error::AppError;
use crate::models::AudioRef;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info};

const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);
const SPEECH_MODEL: &str = "eleven_multilingual_v2";

/// A handle to the speech-synthesis actor.
///
/// Cloneable interface for sending synthesis requests to the running actor;
/// abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct SpeechActorHandle {
    sender: mpsc::Sender<SpeechMessage>,
}

impl SpeechActorHandle {
    /// Creates a new speech actor and returns a handle to it.
    pub fn new(base_url: String, api_key: String, voice_id: String) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SpeechActorRunner::new(receiver, base_url, api_key, voice_id);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Convenience constructor from the resolved configuration.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            config.speech_base_url.clone(),
            config.speech_api_key.clone(),
            config.speech_voice_id.clone(),
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechActorHandle {
    async fn synthesize(&self, text: &str) -> Result<AudioRef, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SpeechMessage::Synthesize {
            text: text.to_string(),
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(SYNTHESIS_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct SpeechActorRunner {
    receiver: mpsc::Receiver<SpeechMessage>,
    base_url: String,
    api_key: String,
    voice_id: String,
    client: Client,
}

impl SpeechActorRunner {
    fn new(
        receiver: mpsc::Receiver<SpeechMessage>,
        base_url: String,
        api_key: String,
        voice_id: String,
    ) -> Self {
        Self {
            receiver,
            base_url,
            api_key,
            voice_id,
            client: Client::new(),
        }
    }

    async fn run(mut self) {
        info!("SpeechActor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }
        info!("SpeechActor stopped");
    }

    async fn handle_message(&mut self, msg: SpeechMessage) {
        match msg {
            SpeechMessage::Synthesize { text, responder } => {
                let result = self.synthesize_speech(&text).await;
                let _ = responder.send(result);
            }
        }
    }

    async fn synthesize_speech(&self, text: &str) -> Result<AudioRef, AppError> {
        info!("Synthesizing speech for {} chars", text.len());

        let payload = serde_json::json!({
            "text": text,
            "model_id": SPEECH_MODEL,
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75
            }
        });

        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        let request_future = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&payload)
            .send();

        let res = timeout(SYNTHESIS_TIMEOUT, request_future).await??;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Speech synthesis failed with status {}", status);
            return Err(AppError::Collaborator(format!(
                "Speech synthesis failed with status {}: {}",
                status, body
            )));
        }

        let bytes = res.bytes().await?;
        Ok(AudioRef {
            mime: "audio/mpeg".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(&bytes),
        })
    }
}
