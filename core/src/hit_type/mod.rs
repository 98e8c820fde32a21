//! Physical/magical classification of enemy abilities.
//!
//! The processor asks a [`HitTypeResolver`] once per finalized attempt. The
//! resolver must answer from memory; anything that needs the network is done
//! ahead of time by an [`XivApiClient`] filling a [`SharedAbilityCache`].

mod cache;
mod error;
mod xivapi;

pub use cache::{AbilityCache, CachedAbility, SharedAbilityCache};
pub use error::HitTypeError;
pub use xivapi::XivApiClient;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    Physical,
    Magical,
    Special,
    Unknown,
}

impl HitType {
    /// Map an attack type row ID to a hit type.
    /// Slash, thrust, blunt and shot are physical; magic, breath and sound are magical.
    pub fn from_attack_type(attack_type_id: Option<u32>) -> Self {
        match attack_type_id {
            Some(1..=4) => HitType::Physical,
            Some(5..=7) => HitType::Magical,
            Some(8) => HitType::Special,
            _ => HitType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HitType::Physical => "Physical",
            HitType::Magical => "Magical",
            HitType::Special => "Special",
            HitType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch lookup of ability hit types. Keys of the returned map are the
/// uppercased ability IDs; IDs the resolver cannot classify map to `Unknown`.
pub trait HitTypeResolver {
    fn resolve(&self, ability_ids: &[&str]) -> HashMap<String, HitType>;
}

/// Resolver that knows nothing. Every ability is `Unknown`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownResolver;

impl HitTypeResolver for UnknownResolver {
    fn resolve(&self, ability_ids: &[&str]) -> HashMap<String, HitType> {
        ability_ids
            .iter()
            .map(|id| (id.to_ascii_uppercase(), HitType::Unknown))
            .collect()
    }
}
