//! Shield absorption inferred from effect-result confirmations.
//!
//! A hit only carries the damage that got through. The shield it chewed
//! through shows up later, on the effect result with the same sequence ID,
//! as a drop in the target's shield percentage.

use crate::combat_log::EffectResult;
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShieldState {
    /// Percent of max HP
    pub shield_percent: u32,
    pub max_hp: u64,
}

/// A hit waiting for its effect result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHit {
    /// Index into the current attempt's ability hits
    pub hit_index: usize,
    pub target_id: String,
    pub before: ShieldState,
}

/// Last known shield per player, plus hits awaiting confirmation keyed by
/// sequence ID. An area ability puts one entry per target under a single ID.
#[derive(Debug, Clone, Default)]
pub struct ShieldTracker {
    shields: HashMap<String, ShieldState>,
    pending: HashMap<String, Vec<PendingHit>>,
}

impl ShieldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed for players with no effect result yet.
    pub fn shield_of(&self, player_id: &str) -> ShieldState {
        self.shields.get(player_id).copied().unwrap_or_default()
    }

    pub fn track(&mut self, sequence_id: &str, hit: PendingHit) {
        self.pending
            .entry(sequence_id.to_string())
            .or_default()
            .push(hit);
    }

    /// Record the new shield state and settle pending hits on this target.
    ///
    /// Returns `(hit_index, absorbed)` for every settled hit that lost shield.
    /// Entries for other targets under the same sequence ID stay pending.
    pub fn confirm(&mut self, result: &EffectResult) -> Vec<(usize, i64)> {
        self.shields.insert(
            result.target_id.clone(),
            ShieldState {
                shield_percent: result.shield_percent,
                max_hp: result.max_hp,
            },
        );

        let Some(bucket) = self.pending.get_mut(&result.sequence_id) else {
            return Vec::new();
        };

        let mut absorbed = Vec::new();
        bucket.retain(|hit| {
            if hit.target_id != result.target_id {
                return true;
            }
            let max_hp = if result.max_hp > 0 {
                result.max_hp
            } else {
                hit.before.max_hp
            };
            if let Some(amount) =
                absorbed_amount(hit.before.shield_percent, result.shield_percent, max_hp)
            {
                absorbed.push((hit.hit_index, amount));
            }
            false
        });

        if bucket.is_empty() {
            self.pending.remove(&result.sequence_id);
        }
        absorbed
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.shields.clear();
        self.pending.clear();
    }
}

/// HP absorbed by a shield drop, each side floored to whole HP first.
/// `None` when the shield didn't shrink or the result rounds to nothing.
pub fn absorbed_amount(shield_before: u32, shield_after: u32, max_hp: u64) -> Option<i64> {
    if max_hp == 0 || shield_before <= shield_after {
        return None;
    }
    let hp_at = |percent: u32| u128::from(percent) * u128::from(max_hp) / 100;
    let absorbed = hp_at(shield_before) - hp_at(shield_after);
    (absorbed > 0).then(|| i64::try_from(absorbed).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn result(target_id: &str, sequence_id: &str, shield_percent: u32, max_hp: u64) -> EffectResult {
        EffectResult {
            timestamp: NaiveDateTime::parse_from_str("2026-01-03 14:23:32", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            target_id: target_id.to_string(),
            target_name: "Someone".to_string(),
            sequence_id: sequence_id.to_string(),
            current_hp: max_hp,
            max_hp,
            current_mp: 10000,
            max_mp: 10000,
            shield_percent,
        }
    }

    fn pending(hit_index: usize, target_id: &str, shield_percent: u32, max_hp: u64) -> PendingHit {
        PendingHit {
            hit_index,
            target_id: target_id.to_string(),
            before: ShieldState {
                shield_percent,
                max_hp,
            },
        }
    }

    #[test]
    fn absorbed_amount_floors_each_side() {
        // 30% of 287465 = 86239, 10% = 28746
        assert_eq!(absorbed_amount(30, 10, 287465), Some(57493));
        assert_eq!(absorbed_amount(10, 10, 287465), None);
        assert_eq!(absorbed_amount(5, 20, 287465), None);
        assert_eq!(absorbed_amount(30, 0, 0), None);
    }

    #[test]
    fn huge_max_hp_does_not_overflow() {
        assert_eq!(absorbed_amount(100, 0, u64::MAX), Some(i64::MAX));
        assert_eq!(absorbed_amount(100, 0, 1_000_000_000_000), Some(1_000_000_000_000));
    }

    #[test]
    fn confirm_updates_shield_cache() {
        let mut tracker = ShieldTracker::new();
        assert_eq!(tracker.shield_of("106ECCE2"), ShieldState::default());

        tracker.confirm(&result("106ECCE2", "1", 25, 287465));

        assert_eq!(tracker.shield_of("106ECCE2").shield_percent, 25);
        assert_eq!(tracker.shield_of("106ECCE2").max_hp, 287465);
    }

    #[test]
    fn area_hit_settles_one_target_at_a_time() {
        let mut tracker = ShieldTracker::new();
        tracker.track("2C2D", pending(0, "106ECCE2", 30, 100000));
        tracker.track("2C2D", pending(1, "10764E7E", 20, 100000));
        assert_eq!(tracker.pending_count(), 2);

        let settled = tracker.confirm(&result("106ECCE2", "2C2D", 10, 100000));
        assert_eq!(settled, vec![(0, 20000)]);
        assert_eq!(tracker.pending_count(), 1);

        let settled = tracker.confirm(&result("10764E7E", "2C2D", 20, 100000));
        assert!(settled.is_empty());
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn falls_back_to_earlier_max_hp() {
        let mut tracker = ShieldTracker::new();
        tracker.track("9", pending(4, "106ECCE2", 50, 1000));

        let settled = tracker.confirm(&result("106ECCE2", "9", 0, 0));
        assert_eq!(settled, vec![(4, 500)]);
    }

    #[test]
    fn unknown_sequence_is_ignored() {
        let mut tracker = ShieldTracker::new();
        tracker.track("1", pending(0, "106ECCE2", 50, 1000));

        assert!(tracker.confirm(&result("106ECCE2", "2", 0, 1000)).is_empty());
        assert_eq!(tracker.pending_count(), 1);

        tracker.clear();
        assert_eq!(tracker.pending_count(), 0);
        assert_eq!(tracker.shield_of("106ECCE2"), ShieldState::default());
    }
}
