use super::*;
use crate::game_data::{boss_debuff, head_marker_name, is_player_pet, mitigation_buff};
use chrono::NaiveDateTime;
use memchr::memchr_iter;


macro_rules! parse_u64 {
    ($s:expr) => {
        $s.parse::<u64>().unwrap_or_default()
    };
}
macro_rules! parse_u32 {
    ($s:expr) => {
        $s.parse::<u32>().unwrap_or_default()
    };
}

/// Leading field of every line.
pub mod line_type {
    pub const ZONE_CHANGE: &str = "01";
    pub const ADD_COMBATANT: &str = "03";
    pub const START_CAST: &str = "20";
    pub const ABILITY: &str = "21";
    pub const AOE_ABILITY: &str = "22";
    pub const DEATH: &str = "25";
    pub const STATUS_ADD: &str = "26";
    pub const HEAD_MARKER: &str = "27";
    pub const ACTOR_CONTROL: &str = "33";
    pub const EFFECT_RESULT: &str = "37";
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const TIMESTAMP_FORMAT_WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Auto-attacks share one generic name across every enemy.
fn is_auto_attack(ability_name: &str) -> bool {
    ability_name.eq_ignore_ascii_case("attack")
}

/// Stateless decoder for pipe-delimited network log lines.
///
/// Every decoder takes the already-split fields, including the line type at
/// index 0, and returns `None` when the line doesn't qualify.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogParser;

impl LogParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_line(&self, line: &str) -> Option<LogLine> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let fields = split_fields(line);
        if fields.len() < 2 {
            return None;
        }

        match fields[0] {
            line_type::ZONE_CHANGE => Self::parse_zone_change(&fields).map(LogLine::ZoneChange),
            line_type::ADD_COMBATANT => {
                Self::parse_add_combatant(&fields).map(LogLine::AddCombatant)
            }
            line_type::ABILITY | line_type::AOE_ABILITY => {
                Self::parse_ability_line(&fields).map(LogLine::Ability)
            }
            line_type::DEATH => Self::parse_death(&fields).map(LogLine::Death),
            line_type::STATUS_ADD => Self::parse_status_line(&fields).map(LogLine::Status),
            line_type::ACTOR_CONTROL => {
                Self::parse_actor_control(&fields).map(LogLine::ActorControl)
            }
            line_type::EFFECT_RESULT => {
                Self::parse_effect_result(&fields).map(LogLine::EffectResult)
            }
            line_type::START_CAST => Self::parse_cast_start(&fields).map(LogLine::Targeting),
            line_type::HEAD_MARKER => Self::parse_head_marker(&fields).map(LogLine::Targeting),
            _ => None,
        }
    }

    pub fn parse_zone_change(fields: &[&str]) -> Option<ZoneChange> {
        if fields.len() < 4 {
            return None;
        }

        Some(ZoneChange {
            timestamp: parse_timestamp(fields[1])?,
            zone_id: fields[2].to_string(),
            zone_name: fields[3].to_string(),
        })
    }

    pub fn parse_add_combatant(fields: &[&str]) -> Option<AddCombatant> {
        if fields.len() < 12 || fields[3].is_empty() {
            return None;
        }

        Some(AddCombatant {
            timestamp: parse_timestamp(fields[1])?,
            id: fields[2].to_string(),
            name: fields[3].to_string(),
            job_id: fields[4].to_string(),
            level: fields[5].to_string(),
            max_hp: parse_u64!(fields[11]),
            is_player: is_player_id(fields[2]),
        })
    }

    /// An ability line may carry a player-damage anchor, an enemy hit, or neither.
    pub fn parse_ability_line(fields: &[&str]) -> Option<AbilityLine> {
        let player_damage_at = Self::parse_player_damage_timestamp(fields);
        let hit = Self::parse_ability(fields);

        if player_damage_at.is_none() && hit.is_none() {
            return None;
        }
        Some(AbilityLine {
            player_damage_at,
            hit,
        })
    }

    /// Damaging enemy ability landing on a player.
    pub fn parse_ability(fields: &[&str]) -> Option<AbilityHit> {
        if fields.len() < 24 {
            return None;
        }

        let (source_id, source_name) = (fields[2], fields[3]);
        let (ability_id, ability_name) = (fields[4], fields[5]);
        let (target_id, target_name) = (fields[6], fields[7]);
        let flags = fields[8];

        if !is_enemy_id(source_id) || !is_player_id(target_id) || target_name.is_empty() {
            return None;
        }
        if is_auto_attack(ability_name) {
            return None;
        }

        let action_flags = decode_flags(flags);
        if !action_flags.is_damage_action() {
            return None;
        }

        let sequence_id = fields
            .get(44)
            .filter(|seq| !seq.is_empty())
            .map(|seq| seq.to_string());

        Some(AbilityHit {
            timestamp: parse_timestamp(fields[1])?,
            ability_id: ability_id.to_string(),
            ability_name: ability_name.to_string(),
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            target_id: target_id.to_string(),
            target_name: target_name.to_string(),
            damage: i64::from(decode_damage(fields[9])),
            flags: flags.to_string(),
            is_critical: action_flags.is_critical,
            is_direct_hit: action_flags.is_direct_hit,
            sequence_id,
            shield_percent_before: 0,
            absorbed_damage: None,
            hit_type: None,
            unmitigated_damage: None,
        })
    }

    /// Timestamp of a damaging player-to-enemy ability, used to anchor the
    /// combat timeline.
    pub fn parse_player_damage_timestamp(fields: &[&str]) -> Option<NaiveDateTime> {
        if fields.len() < 10 {
            return None;
        }
        if !is_player_id(fields[2]) || !is_enemy_id(fields[6]) {
            return None;
        }
        if !is_damage_action(fields[8]) {
            return None;
        }
        parse_timestamp(fields[1])
    }

    pub fn parse_death(fields: &[&str]) -> Option<PlayerDeath> {
        if fields.len() < 5 || !is_player_id(fields[2]) {
            return None;
        }

        let killer_id = fields
            .get(4)
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string());
        let killer_name = fields
            .get(5)
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string());

        Some(PlayerDeath {
            timestamp: parse_timestamp(fields[1])?,
            player_id: fields[2].to_string(),
            player_name: fields[3].to_string(),
            killer_id,
            killer_name,
        })
    }

    /// Runs all three status decoders; each reads the line independently.
    pub fn parse_status_line(fields: &[&str]) -> Option<StatusLine> {
        let status = StatusLine {
            debuff: Self::parse_status_debuff(fields),
            mitigation_buff: Self::parse_mitigation_buff(fields),
            boss_debuff: Self::parse_boss_debuff(fields),
        };

        if status.debuff.is_none() && status.mitigation_buff.is_none() && status.boss_debuff.is_none() {
            return None;
        }
        Some(status)
    }

    /// Debuff applied to a player by an enemy or the environment. Player pets
    /// are excluded even if they carry an enemy-range ID.
    pub fn parse_status_debuff(fields: &[&str]) -> Option<DebuffApplied> {
        if fields.len() < 10 {
            return None;
        }

        let (effect_id, effect_name) = (fields[2], fields[3]);
        let (source_id, source_name) = (fields[5], fields[6]);
        let (target_id, target_name) = (fields[7], fields[8]);

        let source_kind = match ActorKind::classify(source_id) {
            ActorKind::Enemy => DebuffSource::Enemy,
            ActorKind::Environment => DebuffSource::Environment,
            _ => return None,
        };
        if !is_player_id(target_id) || is_player_pet(source_name) || effect_name.is_empty() {
            return None;
        }

        Some(DebuffApplied {
            timestamp: parse_timestamp(fields[1])?,
            effect_id: effect_id.to_string(),
            effect_name: effect_name.to_string(),
            duration: parse_duration(fields[4]),
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            target_id: target_id.to_string(),
            target_name: target_name.to_string(),
            stacks: parse_stacks(fields[9]),
            source_kind,
        })
    }

    /// Catalogued mitigation buff landing on a player.
    pub fn parse_mitigation_buff(fields: &[&str]) -> Option<ActiveMitigation> {
        if fields.len() < 10 || !is_player_id(fields[7]) {
            return None;
        }

        let effect_id = fields[2].to_ascii_uppercase();
        let effect = mitigation_buff(&effect_id)?;
        let duration = parse_duration(fields[4]);
        if duration <= 0.0 {
            return None;
        }

        let effect_name = if fields[3].is_empty() {
            effect.name.to_string()
        } else {
            fields[3].to_string()
        };

        Some(ActiveMitigation {
            effect_id,
            effect_name,
            target_id: fields[7].to_string(),
            target_name: fields[8].to_string(),
            source_id: fields[5].to_string(),
            source_name: fields[6].to_string(),
            start_time: parse_timestamp(fields[1])?,
            duration,
            mitigation_percent: effect.mitigation_percent,
            is_boss_debuff: false,
        })
    }

    /// Catalogued damage-down debuff a player puts on an enemy.
    pub fn parse_boss_debuff(fields: &[&str]) -> Option<ActiveMitigation> {
        if fields.len() < 10 || !is_player_id(fields[5]) || !is_enemy_id(fields[7]) {
            return None;
        }

        let effect_id = fields[2].to_ascii_uppercase();
        let effect = boss_debuff(&effect_id)?;
        let duration = parse_duration(fields[4]);
        if duration <= 0.0 {
            return None;
        }

        let effect_name = if fields[3].is_empty() {
            effect.name.to_string()
        } else {
            fields[3].to_string()
        };

        Some(ActiveMitigation {
            effect_id,
            effect_name,
            target_id: fields[7].to_string(),
            target_name: fields[8].to_string(),
            source_id: fields[5].to_string(),
            source_name: fields[6].to_string(),
            start_time: parse_timestamp(fields[1])?,
            duration,
            mitigation_percent: effect.mitigation_percent,
            is_boss_debuff: true,
        })
    }

    pub fn parse_actor_control(fields: &[&str]) -> Option<ActorControl> {
        if fields.len() < 8 {
            return None;
        }

        Some(ActorControl {
            timestamp: parse_timestamp(fields[1])?,
            instance: fields[2].to_string(),
            command_code: fields[3].to_string(),
            data: [
                fields[4].to_string(),
                fields[5].to_string(),
                fields[6].to_string(),
                fields[7].to_string(),
            ],
        })
    }

    pub fn parse_effect_result(fields: &[&str]) -> Option<EffectResult> {
        if fields.len() < 10 || !is_player_id(fields[2]) || fields[3].is_empty() {
            return None;
        }

        Some(EffectResult {
            timestamp: parse_timestamp(fields[1])?,
            target_id: fields[2].to_string(),
            target_name: fields[3].to_string(),
            sequence_id: fields[4].to_string(),
            current_hp: parse_u64!(fields[5]),
            max_hp: parse_u64!(fields[6]),
            current_mp: parse_u64!(fields[7]),
            max_mp: parse_u64!(fields[8]),
            shield_percent: parse_u32!(fields[9]).min(100),
        })
    }

    /// Enemy starting a cast aimed at a specific player.
    pub fn parse_cast_start(fields: &[&str]) -> Option<TargetingEvent> {
        if fields.len() < 8 {
            return None;
        }

        let (source_id, source_name) = (fields[2], fields[3]);
        let (ability_id, ability_name) = (fields[4], fields[5]);
        let (target_id, target_name) = (fields[6], fields[7]);

        if !is_enemy_id(source_id) || !is_player_id(target_id) || source_id == target_id {
            return None;
        }
        if ability_name.is_empty() || target_name.is_empty() || is_auto_attack(ability_name) {
            return None;
        }

        Some(TargetingEvent {
            timestamp: parse_timestamp(fields[1])?,
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            target_id: target_id.to_string(),
            target_name: target_name.to_string(),
            ability_id: ability_id.to_string(),
            ability_name: ability_name.to_string(),
            kind: TargetingKind::CastTarget,
        })
    }

    /// Head marker placed over a player. The marker ID stands in for the ability.
    pub fn parse_head_marker(fields: &[&str]) -> Option<TargetingEvent> {
        if fields.len() < 7 {
            return None;
        }

        let (target_id, target_name) = (fields[2], fields[3]);
        let marker_id = fields[6];

        if !is_player_id(target_id) || target_name.is_empty() || marker_id.is_empty() {
            return None;
        }

        Some(TargetingEvent {
            timestamp: parse_timestamp(fields[1])?,
            source_id: String::new(),
            source_name: String::new(),
            target_id: target_id.to_string(),
            target_name: target_name.to_string(),
            ability_id: marker_id.to_string(),
            ability_name: head_marker_name(marker_id),
            kind: TargetingKind::HeadMarker,
        })
    }
}

/// Split a line on `|`. Trailing fields are kept even when empty.
pub fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(48);
    let mut start = 0;
    for sep in memchr_iter(b'|', bytes) {
        fields.push(&line[start..sep]);
        start = sep + 1;
    }
    fields.push(&line[start..]);
    fields
}

/// Parse `2026-01-03T14:22:22.5320000-06:00`.
///
/// The UTC offset is dropped and the wall-clock time kept. Fractions longer
/// than microseconds are truncated, shorter ones zero-padded.
pub fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    let field = field.trim();
    let base = strip_utc_offset(field);

    match base.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let micros: String = fraction.chars().chain(std::iter::repeat('0')).take(6).collect();
            NaiveDateTime::parse_from_str(&format!("{whole}.{micros}"), TIMESTAMP_FORMAT).ok()
        }
        None => NaiveDateTime::parse_from_str(base, TIMESTAMP_FORMAT_WHOLE_SECONDS).ok(),
    }
}

fn strip_utc_offset(field: &str) -> &str {
    let b = field.as_bytes();
    if b.len() < 6 {
        return field;
    }
    let tail = &b[b.len() - 6..];
    if matches!(tail[0], b'+' | b'-') && tail[3] == b':' {
        &field[..field.len() - 6]
    } else {
        field
    }
}

/// Seconds; unparseable or non-finite values count as 0.
fn parse_duration(field: &str) -> f64 {
    field
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .unwrap_or_default()
}

fn parse_stacks(field: &str) -> u32 {
    u32::from_str_radix(field, 16).unwrap_or_default()
}
