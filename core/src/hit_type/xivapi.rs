use super::{CachedAbility, HitTypeError, SharedAbilityCache};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("xivlog/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct ActionResponse {
    #[serde(rename = "Results", default)]
    results: Vec<ActionRow>,
}

#[derive(Deserialize)]
struct ActionRow {
    #[serde(rename = "ID")]
    id: Option<u64>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "AttackType")]
    attack_type: Option<AttackTypeRow>,
}

#[derive(Deserialize)]
struct AttackTypeRow {
    #[serde(rename = "ID")]
    id: Option<u32>,
    #[serde(rename = "Name")]
    name: Option<String>,
}

/// Remote lookup of ability attack types.
///
/// Failures never propagate to callers of [`XivApiClient::fetch_missing`]:
/// they are logged and the affected abilities simply stay uncached, which
/// resolves them as `Unknown`.
pub struct XivApiClient {
    client: reqwest::Client,
    base_url: String,
    batch_size: usize,
}

impl XivApiClient {
    pub fn new(base_url: &str, timeout: Duration, batch_size: usize) -> Result<Self, HitTypeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            batch_size: batch_size.max(1),
        })
    }

    /// Fetch every ID not already cached, merge the results and persist the
    /// cache. Returns the number of abilities added.
    pub async fn fetch_missing(&self, cache: &SharedAbilityCache, ability_ids: &[String]) -> usize {
        let missing = match cache.read() {
            Ok(cache) => cache.missing(ability_ids.iter().map(String::as_str)),
            Err(_) => return 0,
        };
        if missing.is_empty() {
            return 0;
        }

        // (decimal row id, id as logged)
        let mut lookups: Vec<(u64, &str)> = Vec::with_capacity(missing.len());
        for id in &missing {
            match parse_ability_id(id) {
                Ok(decimal) => lookups.push((decimal, id)),
                Err(e) => tracing::warn!(error = %e, "Skipping ability lookup"),
            }
        }

        tracing::info!(count = lookups.len(), "Fetching ability attack types");

        let mut added = 0;
        for batch in lookups.chunks(self.batch_size) {
            let decimal_ids: Vec<u64> = batch.iter().map(|(decimal, _)| *decimal).collect();
            let rows = match self.fetch_batch(&decimal_ids).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(error = %e, batch = batch.len(), "Ability lookup failed");
                    continue;
                }
            };

            let Ok(mut guard) = cache.write() else {
                return added;
            };
            for row in rows {
                let Some(hex_id) = row
                    .id
                    .and_then(|id| batch.iter().find(|(decimal, _)| *decimal == id))
                    .map(|(_, hex_id)| *hex_id)
                else {
                    continue;
                };
                let attack_type = row.attack_type.unwrap_or(AttackTypeRow { id: None, name: None });
                guard.insert(
                    hex_id,
                    CachedAbility {
                        name: row.name,
                        attack_type_id: attack_type.id,
                        attack_type_name: attack_type.name,
                    },
                );
                added += 1;
            }
        }

        if added > 0
            && let Ok(guard) = cache.read()
            && let Err(e) = guard.save()
        {
            tracing::warn!(error = %e, "Failed to persist ability cache");
        }

        added
    }

    async fn fetch_batch(&self, decimal_ids: &[u64]) -> Result<Vec<ActionRow>, HitTypeError> {
        let ids = decimal_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/action?ids={}&columns=ID,Name,AttackType.ID,AttackType.Name",
            self.base_url, ids
        );

        let response: ActionResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results)
    }
}

/// Hex ability ID as logged to the decimal row ID used by the API.
pub(crate) fn parse_ability_id(id: &str) -> Result<u64, HitTypeError> {
    u64::from_str_radix(id, 16).map_err(|_| HitTypeError::InvalidAbilityId { id: id.to_string() })
}
