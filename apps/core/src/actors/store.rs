use crate::actors::traits::CareStore;
use crate::config::CoreConfig;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

const SAVE_TIMEOUT: Duration = Duration::from_secs(10);

/// A Supabase-shaped REST datastore client.
///
/// Persistence is best-effort by contract: `save` never surfaces an error
/// to callers. Failures are logged at `warn` and reported as `false`.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            service_key,
        }
    }

    /// Convenience constructor from the resolved configuration.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.store_url.clone(), config.store_key.clone())
    }

    /// Stamps a record with an id and creation timestamp if missing.
    fn stamped(mut record: serde_json::Value) -> serde_json::Value {
        if let Some(map) = record.as_object_mut() {
            map.entry("id")
                .or_insert_with(|| serde_json::Value::String(Uuid::new_v4().to_string()));
            map.entry("created_at")
                .or_insert_with(|| serde_json::Value::String(Utc::now().to_rfc3339()));
        }
        record
    }
}

#[async_trait]
impl CareStore for SupabaseStore {
    async fn save(&self, collection: &str, record: serde_json::Value) -> bool {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        let record = Self::stamped(record);

        let request_future = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(&record)
            .send();

        match timeout(SAVE_TIMEOUT, request_future).await {
            Ok(Ok(res)) if res.status().is_success() => {
                info!("Saved record to collection '{}'", collection);
                true
            }
            Ok(Ok(res)) => {
                warn!(
                    "Datastore rejected record for '{}' with status {}",
                    collection,
                    res.status()
                );
                false
            }
            Ok(Err(e)) => {
                warn!("Datastore request for '{}' failed: {}", collection, e);
                false
            }
            Err(_) => {
                warn!("Datastore request for '{}' timed out", collection);
                false
            }
        }
    }
}
