//! Reverse the damage reduction that was active when a hit landed.
//!
//! Mitigations stack multiplicatively on the damage multiplier: 10% and 20%
//! together leave `0.9 * 0.8 = 0.72` of the damage, a 28% reduction.

use crate::combat_log::ActiveMitigation;
use crate::game_data::{boss_debuff, effective_mitigation_percent, mitigation_buff};
use crate::hit_type::HitType;
use serde::Serialize;


/// Percent a mitigation contributes against a hit of the given kind.
///
/// Catalogued effects go through the damage-kind rules of the catalog.
/// Anything else contributes its recorded percent unchanged.
pub fn effective_percent(mitigation: &ActiveMitigation, hit_type: Option<HitType>) -> f64 {
    let catalogued = if mitigation.is_boss_debuff {
        boss_debuff(&mitigation.effect_id).is_some()
    } else {
        mitigation_buff(&mitigation.effect_id).is_some()
    };

    if catalogued {
        effective_mitigation_percent(&mitigation.effect_id, hit_type, mitigation.is_boss_debuff)
    } else {
        mitigation.mitigation_percent
    }
}

/// Total reduction as a fraction (`0.28` for 28%). Zero with nothing active.
pub fn total_mitigation(mitigations: &[&ActiveMitigation], hit_type: Option<HitType>) -> f64 {
    if mitigations.is_empty() {
        return 0.0;
    }

    let multiplier: f64 = mitigations
        .iter()
        .map(|m| 1.0 - effective_percent(m, hit_type) / 100.0)
        .product();

    1.0 - multiplier
}

/// Estimate the damage a hit would have dealt with nothing active.
///
/// A total of 100% or more cannot be reversed; the actual damage is returned
/// as the estimate in that case.
pub fn unmitigated_damage(
    actual_damage: i64,
    mitigations: &[&ActiveMitigation],
    hit_type: Option<HitType>,
) -> i64 {
    if actual_damage <= 0 {
        return 0;
    }

    let total = total_mitigation(mitigations, hit_type);
    if total <= 0.0 || total >= 1.0 {
        return actual_damage;
    }

    (actual_damage as f64 / (1.0 - total)).round() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MitigationEntry {
    pub name: String,
    pub percent: f64,
}

/// Display breakdown of a set of active mitigations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MitigationSummary {
    pub player_buffs: Vec<MitigationEntry>,
    pub boss_debuffs: Vec<MitigationEntry>,
    /// Total ignoring damage kind, as a percentage
    pub total_mitigation_percent: f64,
}

impl MitigationSummary {
    pub fn from_active(mitigations: &[&ActiveMitigation]) -> Self {
        let entry = |m: &&ActiveMitigation| MitigationEntry {
            name: m.effect_name.clone(),
            percent: m.mitigation_percent,
        };

        Self {
            player_buffs: mitigations
                .iter()
                .filter(|m| !m.is_boss_debuff)
                .map(entry)
                .collect(),
            boss_debuffs: mitigations
                .iter()
                .filter(|m| m.is_boss_debuff)
                .map(entry)
                .collect(),
            total_mitigation_percent: total_mitigation(mitigations, None) * 100.0,
        }
    }
}
