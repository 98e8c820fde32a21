//! The parsed session tree: session → fights → attempts → events.

mod attempt;
mod fight;
mod player;
mod stats;


pub use attempt::{Attempt, AttemptOutcome};
pub use fight::{Fight, FightStats};
pub use player::Player;
pub use stats::SessionStats;

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use serde::Serialize;

/// Root of everything parsed from one log.
///
/// Players live in a directory keyed by actor ID that survives zone changes.
/// The current roster and each fight's roster hold IDs into it, so a renamed
/// or re-jobbed player reads the same from every view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub start_time: Option<NaiveDateTime>,
    pub players: HashMap<String, Player>,
    /// Players seen since the last zone change
    pub roster: Vec<String>,
    pub fights: Vec<Fight>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_fight(&self) -> Option<&Fight> {
        self.fights.last()
    }

    pub fn current_fight_mut(&mut self) -> Option<&mut Fight> {
        self.fights.last_mut()
    }

    pub fn current_attempt(&self) -> Option<&Attempt> {
        self.current_fight().and_then(Fight::current_attempt)
    }

    pub fn current_attempt_mut(&mut self) -> Option<&mut Attempt> {
        self.current_fight_mut().and_then(Fight::current_attempt_mut)
    }

    pub fn fight(&self, fight_id: u32) -> Option<&Fight> {
        self.fights.iter().find(|f| f.fight_id == fight_id)
    }

    /// Completed attempts across all fights, in order.
    pub fn attempts(&self) -> impl Iterator<Item = &Attempt> {
        self.fights.iter().flat_map(Fight::completed_attempts)
    }

    pub fn total_wipes(&self) -> usize {
        self.fights.iter().map(Fight::total_wipes).sum()
    }

    pub fn total_victories(&self) -> usize {
        self.fights.iter().map(Fight::total_victories).sum()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    /// Players on the current roster.
    pub fn roster_players(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().filter_map(|id| self.player(id))
    }

    /// Insert or update the directory entry and put the player on the roster.
    pub fn add_player(&mut self, player: Player) {
        if !self.roster.iter().any(|id| *id == player.id) {
            self.roster.push(player.id.clone());
        }
        self.players.insert(player.id.clone(), player);
    }

    pub fn start_fight(
        &mut self,
        zone_id: &str,
        zone_name: &str,
        start_time: Option<NaiveDateTime>,
    ) -> &mut Fight {
        let fight_id = self.fights.len() as u32 + 1;
        self.fights
            .push(Fight::new(fight_id, zone_id, zone_name, start_time));
        let last = self.fights.len() - 1;
        &mut self.fights[last]
    }

    pub fn cross_attempt_stats(&self) -> SessionStats {
        SessionStats::collect(self)
    }
}
