//! Decoding of the packed damage and flag fields carried by ability lines.
//!
//! The damage field is not a literal number. It is left-padded to four bytes
//! `ABCD`; when byte `C` carries the `0x40` marker the amount spans three
//! bytes and is reassembled as `D A B`, otherwise it is the top two bytes.


/// Action category codes found in the low byte of the flags field.
pub mod category {
    pub const MISS: u8 = 0x01;
    pub const DAMAGE: u8 = 0x03;
    pub const HEAL: u8 = 0x04;
    pub const BLOCKED: u8 = 0x05;
    pub const PARRIED: u8 = 0x06;
    pub const INSTANT_DEATH: u8 = 0x33;
}

/// Severity bits found in the second byte of the flags field.
pub const SEVERITY_CRIT: u8 = 0x20;
pub const SEVERITY_DIRECT_HIT: u8 = 0x40;

const BIG_DAMAGE_MARKER: u64 = 0x40;

/// Decoded view of an ability flags field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags {
    pub category: u8,
    /// Plain damage only (category `DAMAGE`), see [`ActionFlags::is_damage_action`]
    pub is_damage: bool,
    pub is_critical: bool,
    pub is_direct_hit: bool,
    pub is_blocked_or_parried: bool,
}

impl ActionFlags {
    /// True for every category that removes HP: damage, blocked, parried, instant death.
    pub fn is_damage_action(&self) -> bool {
        matches!(
            self.category,
            category::DAMAGE | category::BLOCKED | category::PARRIED | category::INSTANT_DEATH
        )
    }

    pub fn is_miss(&self) -> bool {
        self.category == category::MISS
    }
}

fn parse_hex(field: &str) -> Option<u64> {
    if field.is_empty() || field == "0" {
        return None;
    }
    u64::from_str_radix(field, 16).ok()
}

/// Decode the damage amount of an ability line. Empty, `"0"` or malformed input yields 0.
pub fn decode_damage(field: &str) -> u32 {
    let Some(value) = parse_hex(field) else {
        return 0;
    };

    let byte_c = (value >> 8) & 0xFF;
    if byte_c & BIG_DAMAGE_MARKER != 0 {
        let byte_a = (value >> 24) & 0xFF;
        let byte_b = (value >> 16) & 0xFF;
        let byte_d = value & 0xFF;
        ((byte_d << 16) | (byte_a << 8) | byte_b) as u32
    } else {
        ((value >> 16) & 0xFFFF) as u32
    }
}

/// Decode the flags field. Empty or malformed input yields the all-false default.
pub fn decode_flags(field: &str) -> ActionFlags {
    let Some(value) = parse_hex(field) else {
        return ActionFlags::default();
    };

    let category = (value & 0xFF) as u8;
    let severity = ((value >> 8) & 0xFF) as u8;

    ActionFlags {
        category,
        is_damage: category == category::DAMAGE,
        is_critical: severity & SEVERITY_CRIT != 0,
        is_direct_hit: severity & SEVERITY_DIRECT_HIT != 0,
        is_blocked_or_parried: matches!(category, category::BLOCKED | category::PARRIED),
    }
}

pub fn is_damage_action(flags: &str) -> bool {
    decode_flags(flags).is_damage_action()
}

pub fn is_miss(flags: &str) -> bool {
    decode_flags(flags).is_miss()
}
