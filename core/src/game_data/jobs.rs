use phf::phf_map;

/// Job code (hex, as logged on combatant lines) to job name.
pub static JOB_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "00" => "Adventurer",
    // base classes
    "01" => "Gladiator",
    "02" => "Pugilist",
    "03" => "Marauder",
    "04" => "Lancer",
    "05" => "Archer",
    "06" => "Conjurer",
    "07" => "Thaumaturge",
    "1A" => "Arcanist",
    "1D" => "Rogue",
    // tanks
    "13" => "Paladin",
    "15" => "Warrior",
    "20" => "Dark Knight",
    "25" => "Gunbreaker",
    // healers
    "18" => "White Mage",
    "1C" => "Scholar",
    "21" => "Astrologian",
    "28" => "Sage",
    // melee
    "14" => "Monk",
    "16" => "Dragoon",
    "1E" => "Ninja",
    "22" => "Samurai",
    "27" => "Reaper",
    "29" => "Viper",
    // physical ranged
    "17" => "Bard",
    "1F" => "Machinist",
    "26" => "Dancer",
    // magical ranged
    "19" => "Black Mage",
    "1B" => "Summoner",
    "23" => "Red Mage",
    "2A" => "Pictomancer",
    // crafters and gatherers
    "08" => "Carpenter",
    "09" => "Blacksmith",
    "0A" => "Armorer",
    "0B" => "Goldsmith",
    "0C" => "Leatherworker",
    "0D" => "Weaver",
    "0E" => "Alchemist",
    "0F" => "Culinarian",
    "10" => "Miner",
    "11" => "Botanist",
    "12" => "Fisher",
    "24" => "Blue Mage",
};

pub fn job_name(job_id: &str) -> &'static str {
    JOB_NAMES
        .get(job_id.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or("Unknown")
}
