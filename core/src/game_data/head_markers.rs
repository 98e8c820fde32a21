//! Head marker names.
//!
//! High-end content shifts marker IDs per instance, so these raw IDs are
//! only reliable for identifying mechanics within a single log.

use phf::phf_map;

pub static HEAD_MARKER_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "0017" => "Spread",
    "0064" => "Stack",
    "003E" => "Stack",
    "00A1" => "Stack",
    "0048" => "Stack",
    "005D" => "Tank Stack",
    "0057" => "Flare",
    "0028" => "Earth Shaker",
    "004B" => "Acceleration Bomb",
    "0061" => "Chain Tether",
    "0037" => "Red Dorito",
    "0039" => "Spread (Purple Large)",
    "008A" => "Spread (Orange Large)",
    "008B" => "Spread (Purple Small)",
    "0060" => "Spread (Orange Small)",
    "0078" => "Spread (Orange Large)",
    "00A9" => "Spread (Orange Small)",
    "00BD" => "Spread (Purple Giant)",
    "004C" => "Purple Fire Circle",
    "0001" => "Prey (Orange)",
    "0002" => "Prey (Orange)",
    "0004" => "Prey (Orange)",
    "000E" => "Prey (Blue)",
    "001E" => "Prey Sphere (Orange)",
    "001F" => "Prey Sphere (Blue)",
    "005C" => "Prey (Dark)",
    "0076" => "Prey (Dark)",
    "0087" => "Prey Sphere (Blue)",
    "0007" => "Green Meteor",
    "0008" => "Ghost Meteor",
    "0009" => "Red Meteor",
    "000A" => "Yellow Meteor",
    "015A" => "Meteor",
    "0046" => "Green Pinwheel",
    "00AE" => "Blue Pinwheel",
    "004F" => "Limit Cut 1",
    "0050" => "Limit Cut 2",
    "0051" => "Limit Cut 3",
    "0052" => "Limit Cut 4",
    "0053" => "Limit Cut 5",
    "0054" => "Limit Cut 6",
    "0055" => "Limit Cut 7",
    "0056" => "Limit Cut 8",
    "000D" => "Devour Flower",
    "0010" => "Teal Crystal",
    "0011" => "Heavenly Laser",
    "001C" => "Gravity Puddle",
    "0032" => "Sword Marker 1",
    "0033" => "Sword Marker 2",
    "0034" => "Sword Marker 3",
    "0035" => "Sword Marker 4",
    "0065" => "Spread Bubble",
    "006E" => "Levinbolt",
    "007B" => "Scatter",
    "007C" => "Turn Away",
    "007E" => "Green Crystal",
    "0083" => "Sword Meteor",
    "008E" => "Death From Above",
    "008F" => "Death From Below",
    "00AB" => "Green Poison",
    "00AC" => "Reprobation Tether",
    "00B9" => "Yellow Triangle",
    "00BA" => "Orange Square",
    "00BB" => "Blue Square",
    "00BF" => "Granite Gaol",
    "01A0" => "Circle (Playstation)",
    "01A1" => "Triangle (Playstation)",
    "01A2" => "Square (Playstation)",
    "01A3" => "Cross (Playstation)",
    "0157" => "Tank Buster",
    "01D4" => "Duality of Death",
    "014A" => "Defamation",
    "01B3" => "Comet Marker",
};

/// Falls back to `Head Marker 0x{ID}` for markers not in the table.
pub fn head_marker_name(marker_id: &str) -> String {
    let id = marker_id.to_ascii_uppercase();
    match HEAD_MARKER_NAMES.get(id.as_str()) {
        Some(name) => (*name).to_string(),
        None => format!("Head Marker 0x{id}"),
    }
}
