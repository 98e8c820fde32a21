use super::{HitType, HitTypeError, HitTypeResolver};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};


/// One ability as stored in the cache file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedAbility {
    pub name: Option<String>,
    pub attack_type_id: Option<u32>,
    pub attack_type_name: Option<String>,
}

impl CachedAbility {
    pub fn hit_type(&self) -> HitType {
        HitType::from_attack_type(self.attack_type_id)
    }
}

/// Ability metadata keyed by uppercase hex ability ID, persisted as JSON.
#[derive(Debug, Default)]
pub struct AbilityCache {
    path: Option<PathBuf>,
    entries: HashMap<String, CachedAbility>,
}

/// Cache shared between the processor (reads) and the fetcher (writes).
pub type SharedAbilityCache = Arc<RwLock<AbilityCache>>;

impl AbilityCache {
    /// Cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file yields an empty cache; an unreadable
    /// or corrupt one is logged and also yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = if path.exists() {
            match Self::read_entries(&path) {
                Ok(entries) => {
                    tracing::debug!(path = %path.display(), count = entries.len(), "Loaded ability cache");
                    entries
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring ability cache");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, CachedAbility>, HitTypeError> {
        let text = fs::read_to_string(path).map_err(|source| HitTypeError::ReadCache {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| HitTypeError::DecodeCache {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the cache to its file. No-op for in-memory caches.
    pub fn save(&self) -> Result<(), HitTypeError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| HitTypeError::WriteCache {
                path: path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(HitTypeError::EncodeCache)?;
        fs::write(path, json).map_err(|source| HitTypeError::WriteCache {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), count = self.entries.len(), "Saved ability cache");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn insert(&mut self, ability_id: &str, ability: CachedAbility) {
        self.entries.insert(ability_id.to_ascii_uppercase(), ability);
    }

    pub fn get(&self, ability_id: &str) -> Option<&CachedAbility> {
        self.entries.get(ability_id.to_ascii_uppercase().as_str())
    }

    pub fn contains(&self, ability_id: &str) -> bool {
        self.get(ability_id).is_some()
    }

    pub fn hit_type(&self, ability_id: &str) -> HitType {
        self.get(ability_id)
            .map_or(HitType::Unknown, CachedAbility::hit_type)
    }

    /// Uppercased, de-duplicated IDs that have no cache entry, in first-seen order.
    pub fn missing<'a>(&self, ability_ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for id in ability_ids {
            let id = id.to_ascii_uppercase();
            if !self.entries.contains_key(id.as_str()) && !missing.contains(&id) {
                missing.push(id);
            }
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_shared(self) -> SharedAbilityCache {
        Arc::new(RwLock::new(self))
    }
}

impl HitTypeResolver for AbilityCache {
    fn resolve(&self, ability_ids: &[&str]) -> HashMap<String, HitType> {
        ability_ids
            .iter()
            .map(|id| (id.to_ascii_uppercase(), self.hit_type(id)))
            .collect()
    }
}

impl HitTypeResolver for SharedAbilityCache {
    fn resolve(&self, ability_ids: &[&str]) -> HashMap<String, HitType> {
        match self.read() {
            Ok(cache) => cache.resolve(ability_ids),
            Err(_) => {
                tracing::warn!("Ability cache lock poisoned, hit types left unknown");
                super::UnknownResolver.resolve(ability_ids)
            }
        }
    }
}
