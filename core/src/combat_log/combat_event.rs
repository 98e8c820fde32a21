use crate::hit_type::HitType;
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

/// One enemy ability landing on a player.
///
/// `damage` is the amount actually removed from HP as logged. The three
/// optional fields are filled in later: `absorbed_damage` when the matching
/// effect result arrives, `hit_type` and `unmitigated_damage` once when the
/// attempt is finalized (in that order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityHit {
    pub timestamp: NaiveDateTime,
    pub ability_id: String,
    pub ability_name: String,
    pub source_id: String,
    pub source_name: String,
    pub target_id: String,
    pub target_name: String,
    pub damage: i64,
    pub flags: String,
    pub is_critical: bool,
    pub is_direct_hit: bool,
    pub sequence_id: Option<String>,
    pub shield_percent_before: u32,
    pub absorbed_damage: Option<i64>,
    pub hit_type: Option<HitType>,
    pub unmitigated_damage: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DebuffSource {
    Enemy,
    Environment,
}

/// A debuff placed on a player by an enemy or by the environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebuffApplied {
    pub timestamp: NaiveDateTime,
    pub effect_id: String,
    pub effect_name: String,
    pub duration: f64,
    pub source_id: String,
    pub source_name: String,
    pub target_id: String,
    pub target_name: String,
    pub stacks: u32,
    pub source_kind: DebuffSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDeath {
    pub timestamp: NaiveDateTime,
    pub player_id: String,
    pub player_name: String,
    pub killer_id: Option<String>,
    pub killer_name: Option<String>,
}

/// A time-boxed damage reduction: a buff on a player or a debuff on the boss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveMitigation {
    pub effect_id: String,
    pub effect_name: String,
    pub target_id: String,
    pub target_name: String,
    pub source_id: String,
    pub source_name: String,
    pub start_time: NaiveDateTime,
    /// Seconds
    pub duration: f64,
    pub mitigation_percent: f64,
    pub is_boss_debuff: bool,
}

impl ActiveMitigation {
    /// Saturates at the calendar bounds for absurd durations.
    pub fn end_time(&self) -> NaiveDateTime {
        let micros = (self.duration * 1_000_000.0).round() as i64;
        self.start_time
            .checked_add_signed(TimeDelta::microseconds(micros))
            .unwrap_or(if micros < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            })
    }

    /// Half-open window: active from `start_time` up to, not including, `end_time`.
    pub fn is_active_at(&self, timestamp: NaiveDateTime) -> bool {
        self.start_time <= timestamp && timestamp < self.end_time()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetingKind {
    CastTarget,
    HeadMarker,
}

/// Targeting intent: an enemy cast aimed at a player, or a head marker on a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetingEvent {
    pub timestamp: NaiveDateTime,
    pub source_id: String,
    pub source_name: String,
    pub target_id: String,
    pub target_name: String,
    pub ability_id: String,
    pub ability_name: String,
    pub kind: TargetingKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneChange {
    pub timestamp: NaiveDateTime,
    pub zone_id: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCombatant {
    pub timestamp: NaiveDateTime,
    pub id: String,
    pub name: String,
    pub job_id: String,
    pub level: String,
    pub max_hp: u64,
    pub is_player: bool,
}

/// Fight lifecycle signals carried by actor-control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorCommand {
    Commence,
    Victory,
    WipeFadeout,
    Recommence,
    BarrierUp,
}

impl ActorCommand {
    pub const COMMENCE: &'static str = "40000001";
    pub const VICTORY: &'static str = "40000003";
    pub const WIPE_FADEOUT: &'static str = "40000005";
    pub const RECOMMENCE: &'static str = "40000006";
    pub const BARRIER_UP: &'static str = "40000011";

    pub fn from_code(code: &str) -> Option<Self> {
        [
            (Self::COMMENCE, ActorCommand::Commence),
            (Self::VICTORY, ActorCommand::Victory),
            (Self::WIPE_FADEOUT, ActorCommand::WipeFadeout),
            (Self::RECOMMENCE, ActorCommand::Recommence),
            (Self::BARRIER_UP, ActorCommand::BarrierUp),
        ]
        .into_iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, command)| command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorControl {
    pub timestamp: NaiveDateTime,
    pub instance: String,
    pub command_code: String,
    pub data: [String; 4],
}

impl ActorControl {
    /// `None` for commands outside the fight lifecycle set.
    pub fn command(&self) -> Option<ActorCommand> {
        ActorCommand::from_code(&self.command_code)
    }
}

/// Confirmation that an action's effects landed on a player, with the
/// target's resources after the effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectResult {
    pub timestamp: NaiveDateTime,
    pub target_id: String,
    pub target_name: String,
    pub sequence_id: String,
    pub current_hp: u64,
    pub max_hp: u64,
    pub current_mp: u64,
    pub max_mp: u64,
    /// Shield as a percentage (0-100) of max HP
    pub shield_percent: u32,
}

/// Everything an ability line can tell the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityLine {
    /// Set when this is a damaging player-to-enemy hit (combat timeline anchor)
    pub player_damage_at: Option<NaiveDateTime>,
    /// Set when this is a damaging enemy-to-player hit
    pub hit: Option<AbilityHit>,
}

/// Three independent readings of one status-application line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub debuff: Option<DebuffApplied>,
    pub mitigation_buff: Option<ActiveMitigation>,
    pub boss_debuff: Option<ActiveMitigation>,
}

/// A decoded log line. Lines that decode to nothing are not represented.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    ZoneChange(ZoneChange),
    AddCombatant(AddCombatant),
    Ability(AbilityLine),
    Death(PlayerDeath),
    Status(StatusLine),
    ActorControl(ActorControl),
    EffectResult(EffectResult),
    Targeting(TargetingEvent),
}

impl LogLine {
    /// Enemy ability ID carried by this line, if any.
    pub fn enemy_ability_id(&self) -> Option<&str> {
        match self {
            LogLine::Ability(AbilityLine { hit: Some(hit), .. }) => Some(&hit.ability_id),
            _ => None,
        }
    }
}
