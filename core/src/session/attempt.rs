use crate::combat_log::{
    AbilityHit, ActiveMitigation, DebuffApplied, PlayerDeath, TargetingEvent,
};
use crate::hit_type::{HitType, HitTypeResolver};
use crate::mitigation::unmitigated_damage;
use chrono::NaiveDateTime;
use hashbrown::{HashMap, HashSet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    InProgress,
    Wipe,
    Victory,
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::InProgress => "in_progress",
            AttemptOutcome::Wipe => "wipe",
            AttemptOutcome::Victory => "victory",
        }
    }
}

/// One pull, from the commence signal to a wipe or victory.
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub attempt_number: u32,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub outcome: AttemptOutcome,
    pub boss_name: String,
    /// First player damage on an enemy; pre-pull downtime ends here
    pub first_damage_time: Option<NaiveDateTime>,
    pub ability_hits: Vec<AbilityHit>,
    pub debuffs_applied: Vec<DebuffApplied>,
    pub deaths: Vec<PlayerDeath>,
    pub active_mitigations: Vec<ActiveMitigation>,
    pub targeting_events: Vec<TargetingEvent>,
}

impl Attempt {
    pub fn new(attempt_number: u32, start_time: NaiveDateTime, boss_name: &str) -> Self {
        Self {
            attempt_number,
            start_time,
            end_time: None,
            outcome: AttemptOutcome::InProgress,
            boss_name: boss_name.to_string(),
            first_damage_time: None,
            ability_hits: Vec::new(),
            debuffs_applied: Vec::new(),
            deaths: Vec::new(),
            active_mitigations: Vec::new(),
            targeting_events: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome != AttemptOutcome::InProgress
    }

    /// Start of the combat timeline: first player damage if seen, else the commence signal.
    pub fn timeline_start(&self) -> NaiveDateTime {
        self.first_damage_time.unwrap_or(self.start_time)
    }

    /// Zero until the attempt has ended.
    pub fn duration_seconds(&self) -> f64 {
        let Some(end) = self.end_time else {
            return 0.0;
        };
        seconds_between(self.timeline_start(), end)
    }

    /// Seconds since the timeline start, clamped at zero for pre-pull events.
    pub fn relative_time(&self, timestamp: NaiveDateTime) -> f64 {
        seconds_between(self.timeline_start(), timestamp).max(0.0)
    }

    pub fn abilities_by_name(&self) -> HashMap<&str, Vec<&AbilityHit>> {
        let mut grouped: HashMap<&str, Vec<&AbilityHit>> = HashMap::new();
        for hit in &self.ability_hits {
            grouped.entry(hit.ability_name.as_str()).or_default().push(hit);
        }
        grouped
    }

    /// Hits grouped by target player name.
    pub fn hits_by_player(&self) -> HashMap<&str, Vec<&AbilityHit>> {
        let mut grouped: HashMap<&str, Vec<&AbilityHit>> = HashMap::new();
        for hit in &self.ability_hits {
            grouped.entry(hit.target_name.as_str()).or_default().push(hit);
        }
        grouped
    }

    pub fn debuffs_by_player(&self) -> HashMap<&str, Vec<&DebuffApplied>> {
        let mut grouped: HashMap<&str, Vec<&DebuffApplied>> = HashMap::new();
        for debuff in &self.debuffs_applied {
            grouped
                .entry(debuff.target_name.as_str())
                .or_default()
                .push(debuff);
        }
        grouped
    }

    /// Buffs on the player plus every boss debuff, active at `timestamp`.
    pub fn active_mitigations_at(
        &self,
        player_id: &str,
        timestamp: NaiveDateTime,
    ) -> Vec<&ActiveMitigation> {
        self.active_mitigations
            .iter()
            .filter(|m| m.is_active_at(timestamp))
            .filter(|m| m.is_boss_debuff || m.target_id == player_id)
            .collect()
    }

    pub fn total_absorbed(&self) -> i64 {
        self.ability_hits
            .iter()
            .filter_map(|hit| hit.absorbed_damage)
            .sum()
    }

    pub fn unique_abilities(&self) -> usize {
        self.ability_hits
            .iter()
            .map(|hit| hit.ability_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Close the attempt and run the post-hoc passes. Hit types are resolved
    /// first because the unmitigated estimate depends on them.
    pub(crate) fn finalize(
        &mut self,
        end_time: NaiveDateTime,
        outcome: AttemptOutcome,
        resolver: &dyn HitTypeResolver,
    ) {
        self.end_time = Some(end_time);
        self.outcome = outcome;
        self.resolve_hit_types(resolver);
        self.calculate_unmitigated_damage();
    }

    /// One batch lookup for every distinct unresolved ability.
    pub fn resolve_hit_types(&mut self, resolver: &dyn HitTypeResolver) {
        let mut seen = HashSet::new();
        let ability_ids: Vec<&str> = self
            .ability_hits
            .iter()
            .filter(|hit| hit.hit_type.is_none())
            .map(|hit| hit.ability_id.as_str())
            .filter(|id| seen.insert(id.to_ascii_uppercase()))
            .collect();

        if ability_ids.is_empty() {
            return;
        }

        let resolved = resolver.resolve(&ability_ids);

        for hit in self.ability_hits.iter_mut().filter(|h| h.hit_type.is_none()) {
            let hit_type = resolved
                .get(hit.ability_id.to_ascii_uppercase().as_str())
                .copied()
                .unwrap_or(HitType::Unknown);
            hit.hit_type = Some(hit_type);
        }
    }

    pub fn calculate_unmitigated_damage(&mut self) {
        let estimates: Vec<i64> = self
            .ability_hits
            .iter()
            .map(|hit| {
                if hit.damage <= 0 {
                    return 0;
                }
                let active = self.active_mitigations_at(&hit.target_id, hit.timestamp);
                unmitigated_damage(hit.damage, &active, hit.hit_type)
            })
            .collect();

        for (hit, estimate) in self.ability_hits.iter_mut().zip(estimates) {
            hit.unmitigated_damage = Some(estimate);
        }
    }
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_microseconds().unwrap_or_default() as f64 / 1_000_000.0
}
