use crate::actors::messages::GeneratorMessage;
use crate::actors::traits::TextGenerator;
use crate::config::CoreConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info};

const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// A handle to the text-generation actor.
///
/// Wraps a Gemini-shaped `generateContent` API behind the [`TextGenerator`]
/// trait so the supervisor never sees the wire format.
#[derive(Clone)]
pub struct GeneratorActorHandle {
    sender: mpsc::Sender<GeneratorMessage>,
}

impl GeneratorActorHandle {
    /// Creates a new generator actor and returns a handle to it.
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = GeneratorActorRunner::new(receiver, base_url, api_key, model);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Convenience constructor from the resolved configuration.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            config.generation_base_url.clone(),
            config.generation_api_key.clone(),
            config.generation_model.clone(),
        )
    }
}

#[async_trait]
impl TextGenerator for GeneratorActorHandle {
    async fn generate(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = GeneratorMessage::Generate {
            prompt,
            system_prompt,
            temperature,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(GENERATION_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct GeneratorActorRunner {
    receiver: mpsc::Receiver<GeneratorMessage>,
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeneratorActorRunner {
    fn new(
        receiver: mpsc::Receiver<GeneratorMessage>,
        base_url: String,
        api_key: String,
        model: String,
    ) -> Self {
        Self {
            receiver,
            base_url,
            api_key,
            model,
            client: Client::new(),
        }
    }

    async fn run(mut self) {
        info!("GeneratorActor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }
        info!("GeneratorActor stopped");
    }

    async fn handle_message(&mut self, msg: GeneratorMessage) {
        match msg {
            GeneratorMessage::Generate {
                prompt,
                system_prompt,
                temperature,
                responder,
            } => {
                let result = self
                    .generate_completion(prompt, system_prompt, temperature)
                    .await;
                let _ = responder.send(result);
            }
        }
    }

    async fn generate_completion(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        info!("Generating companion text for prompt: {}", prompt);

        let mut payload = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        if let Some(system) = system_prompt {
            payload["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system }]
            });
        }

        if let Some(temp) = temperature {
            payload["generationConfig"] = serde_json::json!({ "temperature": temp });
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request_future = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send();

        let res = timeout(GENERATION_TIMEOUT, request_future).await??;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Text generation failed with status {}", status);
            return Err(AppError::Collaborator(format!(
                "Text generation failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;
        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        if text.is_empty() {
            return Err(AppError::Collaborator(
                "Text generation returned no candidates".to_string(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn setup_test_actor(server_url: String) -> GeneratorActorHandle {
        GeneratorActorHandle::new(server_url, "test-key".to_string(), "test-model".to_string())
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri());

        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "What a lovely day, Margaret!" }] }
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let result = handle
            .generate("Say something kind".to_string(), None, Some(0.7))
            .await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "What a lovely day, Margaret!");
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&mock_server)
            .await;

        let result = handle.generate("Hello".to_string(), None, None).await;
        assert!(result.is_err());
        if let Err(AppError::Collaborator(err_msg)) = result {
            assert!(err_msg.contains("status 429"));
        } else {
            panic!("Expected AppError::Collaborator, got something else.");
        }
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let mock_server = MockServer::start().await;
        let handle = setup_test_actor(mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;

        let result = handle.generate("Hello".to_string(), None, None).await;
        assert!(result.is_err());
    }
}
