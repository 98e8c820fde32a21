use super::Session;
use hashbrown::HashMap;
use serde::Serialize;

/// Totals across every completed attempt of every fight in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub total_fights: usize,
    pub total_attempts: usize,
    pub total_wipes: usize,
    pub total_victories: usize,
    /// ability name -> target player name -> hits
    pub ability_hits_by_player: HashMap<String, HashMap<String, usize>>,
    /// player name -> deaths
    pub deaths_by_player: HashMap<String, usize>,
    /// debuff name -> target player name -> applications
    pub debuffs_by_player: HashMap<String, HashMap<String, usize>>,
}

impl SessionStats {
    pub fn collect(session: &Session) -> Self {
        let mut stats = SessionStats {
            total_fights: session.fights.len(),
            total_wipes: session.total_wipes(),
            total_victories: session.total_victories(),
            ..Default::default()
        };

        for attempt in session.attempts() {
            stats.total_attempts += 1;

            for hit in &attempt.ability_hits {
                *stats
                    .ability_hits_by_player
                    .entry(hit.ability_name.clone())
                    .or_default()
                    .entry(hit.target_name.clone())
                    .or_default() += 1;
            }

            for death in &attempt.deaths {
                *stats
                    .deaths_by_player
                    .entry(death.player_name.clone())
                    .or_default() += 1;
            }

            for debuff in &attempt.debuffs_applied {
                *stats
                    .debuffs_by_player
                    .entry(debuff.effect_name.clone())
                    .or_default()
                    .entry(debuff.target_name.clone())
                    .or_default() += 1;
            }
        }

        stats
    }
}
