use phf::phf_set;

/// Zones that never host a fight (lowercase). Every other zone is treated as
/// combat-capable, so a new instance is never missed at the cost of the
/// occasional empty fight entry.
pub static NON_COMBAT_ZONES: phf::Set<&'static str> = phf_set! {
    "solution nine",
    "limsa lominsa",
    "ul'dah",
    "gridania",
    "ishgard",
    "kugane",
    "crystarium",
    "eulmore",
    "old sharlayan",
    "radz-at-han",
    "tuliyollal",
};

/// Player-summoned pets. They carry enemy-range IDs but never apply boss debuffs.
pub static PLAYER_PET_NAMES: phf::Set<&'static str> = phf_set! {
    "eos",
    "selene",
    "seraph",
    "earthly star",
    "carbuncle",
    "emerald carbuncle",
    "topaz carbuncle",
    "ruby carbuncle",
    "ifrit-egi",
    "titan-egi",
    "garuda-egi",
    "demi-bahamut",
    "demi-phoenix",
    "solar bahamut",
    "automaton queen",
    "rook autoturret",
};

pub fn is_combat_zone(zone_name: &str) -> bool {
    !NON_COMBAT_ZONES.contains(zone_name.to_lowercase().as_str())
}

pub fn is_player_pet(name: &str) -> bool {
    PLAYER_PET_NAMES.contains(name.to_lowercase().as_str())
}
