use super::AppConfig;
use crate::hit_type::{SharedAbilityCache, XivApiClient};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Fills the shared ability cache from the remote lookup.
pub struct AbilityFetcher {
    client: XivApiClient,
    cache: SharedAbilityCache,
}

impl AbilityFetcher {
    /// `None` when lookups are disabled or the HTTP client can't be built.
    pub fn from_config(config: &AppConfig, cache: SharedAbilityCache) -> Option<Self> {
        if !config.xivapi.enabled {
            return None;
        }
        let client = XivApiClient::new(
            &config.xivapi.base_url,
            Duration::from_secs(config.xivapi.timeout_secs),
            config.xivapi.batch_size,
        );
        match client {
            Ok(client) => Some(Self { client, cache }),
            Err(e) => {
                tracing::warn!(error = %e, "Ability lookups disabled");
                None
            }
        }
    }

    pub fn cache(&self) -> &SharedAbilityCache {
        &self.cache
    }

    /// Look up every ID that isn't cached yet. Returns how many were added.
    pub async fn prefetch(&self, ability_ids: &[String]) -> usize {
        self.client.fetch_missing(&self.cache, ability_ids).await
    }

    /// Drain ability IDs seen while tailing until the sender goes away.
    /// IDs that arrive together are looked up in one request.
    pub async fn run(self, mut rx: UnboundedReceiver<String>) {
        while let Some(first) = rx.recv().await {
            let mut ids = vec![first];
            while let Ok(id) = rx.try_recv() {
                ids.push(id);
            }
            ids.sort_unstable();
            ids.dedup();
            self.prefetch(&ids).await;
        }
        tracing::debug!("Ability fetcher stopped");
    }
}
