use crate::actors::traits::CareCircleNotifier;
use crate::config::CoreConfig;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(15);

/// Workflow-webhook notifier for the care circle.
///
/// Posts `{ event, payload, sent_at }` to an n8n-style webhook. Unlike the
/// datastore, transport failure here is an error the orchestrator must
/// decide about (it logs and carries on so reassurance is never blocked).
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    /// Convenience constructor from the resolved configuration.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.webhook_url.clone())
    }
}

#[async_trait]
impl CareCircleNotifier for WebhookNotifier {
    async fn notify(&self, event: &str, payload: serde_json::Value) -> Result<bool, AppError> {
        let body = serde_json::json!({
            "event": event,
            "payload": payload,
            "sent_at": Utc::now().to_rfc3339(),
        });

        let request_future = self.client.post(&self.webhook_url).json(&body).send();
        let res = timeout(NOTIFY_TIMEOUT, request_future).await??;

        if res.status().is_success() {
            info!("Care circle notified of '{}'", event);
            Ok(true)
        } else {
            warn!(
                "Care circle webhook rejected '{}' with status {}",
                event,
                res.status()
            );
            Ok(false)
        }
    }
}
