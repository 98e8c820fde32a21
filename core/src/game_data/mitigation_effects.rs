//! Mitigation reference data: buffs that reduce damage a player takes, and
//! debuffs that reduce damage a boss deals.
//!
//! Effect IDs are uppercase hex as they appear in status lines. Percentages
//! are positive (`20.0` means 20% less damage). Values as of patch 7.1.

use crate::hit_type::HitType;
use phf::{phf_map, phf_set};
use serde::Serialize;

/// Which incoming damage a mitigation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageKind {
    All,
    Physical,
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MitigationEffect {
    pub name: &'static str,
    pub mitigation_percent: f64,
    pub damage_kind: DamageKind,
    /// Source job abbreviation, or a role name for role actions
    pub job: &'static str,
    pub is_party_wide: bool,
}

impl MitigationEffect {
    const fn new(name: &'static str, mitigation_percent: f64, job: &'static str) -> Self {
        Self {
            name,
            mitigation_percent,
            damage_kind: DamageKind::All,
            job,
            is_party_wide: false,
        }
    }

    const fn magic(mut self) -> Self {
        self.damage_kind = DamageKind::Magic;
        self
    }

    const fn physical(mut self) -> Self {
        self.damage_kind = DamageKind::Physical;
        self
    }

    const fn party(mut self) -> Self {
        self.is_party_wide = true;
        self
    }

    /// Zero when the effect is restricted to the other damage kind and the hit kind is known.
    fn percent_against(&self, hit_type: Option<HitType>) -> f64 {
        match (self.damage_kind, hit_type) {
            (DamageKind::Physical, Some(HitType::Magical)) => 0.0,
            (DamageKind::Magic, Some(HitType::Physical)) => 0.0,
            _ => self.mitigation_percent,
        }
    }
}

pub const FEINT_ID: &str = "4AB";
pub const ADDLE_ID: &str = "4B3";
/// Feint against magical damage (10% against physical)
pub const FEINT_MAGIC_MITIGATION: f64 = 5.0;
/// Addle against physical damage (10% against magical)
pub const ADDLE_PHYSICAL_MITIGATION: f64 = 5.0;

/// Tank job codes: PLD, WAR, DRK, GNB
pub static TANK_JOB_IDS: phf::Set<&'static str> = phf_set! { "13", "15", "20", "25" };

pub static MITIGATION_BUFFS: phf::Map<&'static str, MitigationEffect> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════
    // Tanks
    // ═══════════════════════════════════════════════════════════════════════
    "4A7" => MitigationEffect::new("Rampart", 20.0, "Tank"),
    "4A" => MitigationEffect::new("Sentinel", 30.0, "PLD"),
    "EF5" => MitigationEffect::new("Guardian", 40.0, "PLD"),
    "740" => MitigationEffect::new("Sheltron", 15.0, "PLD"),
    "A72" => MitigationEffect::new("Holy Sheltron", 15.0, "PLD"),
    "498" => MitigationEffect::new("Arms Up", 15.0, "PLD").party(),
    "496" => MitigationEffect::new("Intervention", 10.0, "PLD"),
    "A73" => MitigationEffect::new("Knight's Resolve", 10.0, "PLD"),
    "59" => MitigationEffect::new("Vengeance", 30.0, "WAR"),
    "EF8" => MitigationEffect::new("Damnation", 40.0, "WAR"),
    "2DF" => MitigationEffect::new("Raw Intuition", 10.0, "WAR"),
    "A76" => MitigationEffect::new("Bloodwhetting", 10.0, "WAR"),
    "A77" => MitigationEffect::new("Stem the Flow", 10.0, "WAR"),
    "742" => MitigationEffect::new("Nascent Glint", 10.0, "WAR"),
    "57" => MitigationEffect::new("Thrill of Battle", 0.0, "WAR"),
    "2EB" => MitigationEffect::new("Shadow Wall", 30.0, "DRK"),
    "EFB" => MitigationEffect::new("Shadowed Vigil", 40.0, "DRK"),
    "2EA" => MitigationEffect::new("Dark Mind", 20.0, "DRK").magic(),
    "A7A" => MitigationEffect::new("Oblation", 10.0, "DRK"),
    "766" => MitigationEffect::new("Dark Missionary", 10.0, "DRK").magic().party(),
    "728" => MitigationEffect::new("Camouflage", 10.0, "GNB"),
    "72A" => MitigationEffect::new("Nebula", 30.0, "GNB"),
    "EFE" => MitigationEffect::new("Great Nebula", 40.0, "GNB"),
    "730" => MitigationEffect::new("Heart of Stone", 15.0, "GNB"),
    "A7B" => MitigationEffect::new("Heart of Corundum", 15.0, "GNB"),
    "A7C" => MitigationEffect::new("Clarity of Corundum", 15.0, "GNB"),
    "72F" => MitigationEffect::new("Heart of Light", 10.0, "GNB").magic().party(),

    // ═══════════════════════════════════════════════════════════════════════
    // Healers
    // ═══════════════════════════════════════════════════════════════════════
    "751" => MitigationEffect::new("Temperance", 10.0, "WHM").party(),
    "A94" => MitigationEffect::new("Aquaveil", 15.0, "WHM"),
    "12B" => MitigationEffect::new("Sacred Soil", 10.0, "SCH").party(),
    "A98" => MitigationEffect::new("Expedience", 10.0, "SCH").party(),
    "13D" => MitigationEffect::new("Fey Illumination", 5.0, "SCH").magic().party(),
    "753" => MitigationEffect::new("Seraphic Illumination", 5.0, "SCH").magic().party(),
    "351" => MitigationEffect::new("Collective Unconscious", 10.0, "AST").party(),
    "A9D" => MitigationEffect::new("Exaltation", 10.0, "AST"),
    "75D" => MitigationEffect::new("The Spear", 10.0, "AST"),
    "F38" => MitigationEffect::new("Sun Sign", 10.0, "AST").party(),
    "A3A" => MitigationEffect::new("Kerachole", 10.0, "SGE").party(),
    "A3B" => MitigationEffect::new("Taurochole", 10.0, "SGE"),
    "BBB" => MitigationEffect::new("Holos", 10.0, "SGE").party(),

    // ═══════════════════════════════════════════════════════════════════════
    // DPS
    // ═══════════════════════════════════════════════════════════════════════
    "78E" => MitigationEffect::new("Troubadour", 15.0, "BRD").party(),
    "79F" => MitigationEffect::new("Tactician", 15.0, "MCH").party(),
    "722" => MitigationEffect::new("Shield Samba", 15.0, "DNC").party(),
    "A93" => MitigationEffect::new("Magick Barrier", 10.0, "RDM").magic().party(),
};

pub static BOSS_DEBUFFS: phf::Map<&'static str, MitigationEffect> = phf_map! {
    "4A9" => MitigationEffect::new("Reprisal", 10.0, "Tank"),
    // primary value only, see FEINT_MAGIC_MITIGATION
    "4AB" => MitigationEffect::new("Feint", 10.0, "Melee").physical(),
    // primary value only, see ADDLE_PHYSICAL_MITIGATION
    "4B3" => MitigationEffect::new("Addle", 10.0, "Caster").magic(),
    "35C" => MitigationEffect::new("Dismantle", 10.0, "MCH"),
};

pub fn mitigation_buff(effect_id: &str) -> Option<&'static MitigationEffect> {
    MITIGATION_BUFFS.get(effect_id.to_ascii_uppercase().as_str())
}

pub fn boss_debuff(effect_id: &str) -> Option<&'static MitigationEffect> {
    BOSS_DEBUFFS.get(effect_id.to_ascii_uppercase().as_str())
}

pub fn party_wide_mitigations() -> impl Iterator<Item = &'static MitigationEffect> {
    MITIGATION_BUFFS.values().filter(|m| m.is_party_wide)
}

pub fn is_tank_job(job_id: &str) -> bool {
    TANK_JOB_IDS.contains(job_id.to_ascii_uppercase().as_str())
}

/// Percent an effect actually contributes against a hit of the given kind.
///
/// Feint and Addle carry split values; other type-restricted effects
/// contribute nothing against the other kind. An unknown hit kind gets the
/// primary value. Unknown effect IDs contribute 0.
pub fn effective_mitigation_percent(
    effect_id: &str,
    hit_type: Option<HitType>,
    is_boss_debuff: bool,
) -> f64 {
    let id = effect_id.to_ascii_uppercase();

    if !is_boss_debuff {
        return MITIGATION_BUFFS
            .get(id.as_str())
            .map_or(0.0, |buff| buff.percent_against(hit_type));
    }

    let Some(debuff) = BOSS_DEBUFFS.get(id.as_str()) else {
        return 0.0;
    };

    match (id.as_str(), hit_type) {
        (FEINT_ID, Some(HitType::Magical)) => FEINT_MAGIC_MITIGATION,
        (FEINT_ID, _) => debuff.mitigation_percent,
        (ADDLE_ID, Some(HitType::Physical)) => ADDLE_PHYSICAL_MITIGATION,
        (ADDLE_ID, _) => debuff.mitigation_percent,
        _ => debuff.percent_against(hit_type),
    }
}
