use super::{Attempt, AttemptOutcome, Player, Session};
use chrono::NaiveDateTime;
use hashbrown::HashMap;
use serde::Serialize;

/// One continuous stay in a combat zone. Holds every pull made there.
#[derive(Debug, Clone, Serialize)]
pub struct Fight {
    pub fight_id: u32,
    pub zone_id: String,
    pub zone_name: String,
    pub boss_name: String,
    pub start_time: Option<NaiveDateTime>,
    pub attempts: Vec<Attempt>,
    /// Player IDs present, resolved through the session's player directory
    pub roster: Vec<String>,
}

/// Per-fight totals over completed attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FightStats {
    pub total_attempts: usize,
    pub total_wipes: usize,
    pub total_victories: usize,
    pub deaths_by_player: HashMap<String, usize>,
}

impl Fight {
    pub fn new(
        fight_id: u32,
        zone_id: &str,
        zone_name: &str,
        start_time: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            fight_id,
            zone_id: zone_id.to_string(),
            zone_name: zone_name.to_string(),
            boss_name: String::new(),
            start_time,
            attempts: Vec::new(),
            roster: Vec::new(),
        }
    }

    pub fn current_attempt(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    pub fn current_attempt_mut(&mut self) -> Option<&mut Attempt> {
        self.attempts.last_mut()
    }

    pub fn completed_attempts(&self) -> impl Iterator<Item = &Attempt> {
        self.attempts.iter().filter(|a| a.is_complete())
    }

    pub fn attempt(&self, attempt_number: u32) -> Option<&Attempt> {
        self.attempts
            .iter()
            .find(|a| a.attempt_number == attempt_number)
    }

    pub fn total_wipes(&self) -> usize {
        self.count_outcome(AttemptOutcome::Wipe)
    }

    pub fn total_victories(&self) -> usize {
        self.count_outcome(AttemptOutcome::Victory)
    }

    /// Deaths across completed attempts only.
    pub fn total_deaths(&self) -> usize {
        self.completed_attempts().map(|a| a.deaths.len()).sum()
    }

    fn count_outcome(&self, outcome: AttemptOutcome) -> usize {
        self.attempts.iter().filter(|a| a.outcome == outcome).count()
    }

    /// New attempt numbered after the existing ones, inheriting the boss name.
    pub fn start_attempt(&mut self, start_time: NaiveDateTime) -> &mut Attempt {
        let number = self.attempts.len() as u32 + 1;
        self.attempts
            .push(Attempt::new(number, start_time, &self.boss_name));
        let last = self.attempts.len() - 1;
        &mut self.attempts[last]
    }

    pub fn add_player(&mut self, player_id: &str) {
        if !self.roster.iter().any(|id| id == player_id) {
            self.roster.push(player_id.to_string());
        }
    }

    /// Roster entries as they currently read in the session directory.
    pub fn players<'a>(&'a self, session: &'a Session) -> impl Iterator<Item = &'a Player> {
        self.roster.iter().filter_map(|id| session.player(id))
    }

    pub fn cross_attempt_stats(&self) -> FightStats {
        let mut deaths_by_player: HashMap<String, usize> = HashMap::new();
        for attempt in self.completed_attempts() {
            for death in &attempt.deaths {
                *deaths_by_player.entry(death.player_name.clone()).or_default() += 1;
            }
        }

        FightStats {
            total_attempts: self.completed_attempts().count(),
            total_wipes: self.total_wipes(),
            total_victories: self.total_victories(),
            deaths_by_player,
        }
    }
}
