use super::handler::{AttemptCompleteCallback, SignalHandler, StateChangeCallback};
use super::shielding::{PendingHit, ShieldTracker};
use super::{FightSignal, ParserState};
use crate::combat_log::{
    AbilityLine, ActorCommand, ActorControl, AddCombatant, DecodedLog, EffectResult, LogLine,
    LogParser, PlayerDeath, StatusLine, TargetingEvent, ZoneChange,
};
use crate::game_data::is_combat_zone;
use crate::hit_type::{HitTypeResolver, UnknownResolver};
use crate::session::{Attempt, AttemptOutcome, Player, Session};
use chrono::NaiveDateTime;

const PLACEHOLDER_ZONE_ID: &str = "unknown";
const PLACEHOLDER_ZONE_NAME: &str = "Unknown Zone";

pub type BoxedResolver = Box<dyn HitTypeResolver + Send + Sync>;
pub type BoxedHandler = Box<dyn SignalHandler + Send + Sync>;

/// Applies decoded lines, strictly in arrival order, to the session tree.
///
/// This is the fight state machine. It owns the session, the shield
/// correlation buffers and the pending-wipe latch. Callers serialize access;
/// nothing here blocks or does I/O.
pub struct FightProcessor {
    state: ParserState,
    session: Session,
    lines_processed: u64,
    /// Set once the current attempt has its boss name
    boss_detected: bool,
    /// Wipe time held until the barrier goes up so late deaths still land
    pending_wipe_time: Option<NaiveDateTime>,
    shields: ShieldTracker,
    parser: LogParser,
    resolver: BoxedResolver,
    handlers: Vec<BoxedHandler>,
}

impl Default for FightProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FightProcessor {
    /// Processor whose hit types all resolve to `Unknown`.
    pub fn new() -> Self {
        Self::with_resolver(Box::new(UnknownResolver))
    }

    pub fn with_resolver(resolver: BoxedResolver) -> Self {
        Self {
            state: ParserState::Idle,
            session: Session::new(),
            lines_processed: 0,
            boss_detected: false,
            pending_wipe_time: None,
            shields: ShieldTracker::new(),
            parser: LogParser::new(),
            resolver,
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: BoxedHandler) {
        self.handlers.push(handler);
    }

    pub fn on_state_change<F>(&mut self, callback: F)
    where
        F: FnMut(ParserState) + Send + Sync + 'static,
    {
        self.add_handler(Box::new(StateChangeCallback(callback)));
    }

    pub fn on_attempt_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&Attempt) + Send + Sync + 'static,
    {
        self.add_handler(Box::new(AttemptCompleteCallback(callback)));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    pub fn current_attempt(&self) -> Option<&Attempt> {
        self.session.current_attempt()
    }

    /// Back to a freshly constructed state. Handlers and the resolver stay registered.
    pub fn reset(&mut self) {
        self.state = ParserState::Idle;
        self.session = Session::new();
        self.lines_processed = 0;
        self.boss_detected = false;
        self.pending_wipe_time = None;
        self.shields.clear();
    }

    /// Decode and apply one raw line. Every call counts as processed.
    pub fn submit_line(&mut self, line: &str) {
        let decoded = self.parser.parse_line(line);
        self.process(decoded);
    }

    /// Apply a line decoded elsewhere; `None` stands for a skipped line.
    pub fn process(&mut self, decoded: Option<LogLine>) {
        self.lines_processed += 1;
        if let Some(line) = decoded {
            self.apply(line);
        }
    }

    /// Apply a whole decoded file in order.
    pub fn process_decoded_log(&mut self, log: DecodedLog) {
        self.lines_processed += log.line_count;
        for line in log.lines {
            self.apply(line);
        }
    }

    fn apply(&mut self, line: LogLine) {
        match line {
            LogLine::ZoneChange(zone) => self.handle_zone_change(zone),
            LogLine::AddCombatant(combatant) => self.handle_add_combatant(combatant),
            LogLine::Ability(ability) => self.handle_ability(ability),
            LogLine::Death(death) => self.handle_death(death),
            LogLine::Status(status) => self.handle_status(status),
            LogLine::ActorControl(control) => self.handle_actor_control(control),
            LogLine::EffectResult(result) => self.handle_effect_result(result),
            LogLine::Targeting(event) => self.handle_targeting(event),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_zone_change(&mut self, zone: ZoneChange) {
        if self.session.start_time.is_none() {
            self.session.start_time = Some(zone.timestamp);
        }

        self.session.roster.clear();
        self.boss_detected = false;

        if is_combat_zone(&zone.zone_name) {
            self.session
                .start_fight(&zone.zone_id, &zone.zone_name, Some(zone.timestamp));
            tracing::debug!(zone = %zone.zone_name, "Entered combat zone");
            self.change_state(ParserState::InInstance, zone.timestamp);
        } else {
            self.change_state(ParserState::Idle, zone.timestamp);
        }
    }

    fn handle_add_combatant(&mut self, combatant: AddCombatant) {
        if !combatant.is_player {
            return;
        }

        let player = Player::new(&combatant.id, &combatant.name, &combatant.job_id);
        self.session.add_player(player);
        if let Some(fight) = self.session.current_fight_mut() {
            fight.add_player(&combatant.id);
        }
    }

    fn handle_ability(&mut self, ability: AbilityLine) {
        if self.state != ParserState::InCombat {
            return;
        }
        let boss_detected = self.boss_detected;
        let Some(fight) = self.session.current_fight_mut() else {
            return;
        };
        let fight_boss = &mut fight.boss_name;
        let Some(attempt) = fight.attempts.last_mut() else {
            return;
        };

        if attempt.first_damage_time.is_none()
            && let Some(ts) = ability.player_damage_at
        {
            attempt.first_damage_time = Some(ts);
        }

        let Some(mut hit) = ability.hit else {
            return;
        };

        let before = self.shields.shield_of(&hit.target_id);
        hit.shield_percent_before = before.shield_percent;

        if !boss_detected && !hit.source_name.is_empty() {
            fight_boss.clone_from(&hit.source_name);
            attempt.boss_name.clone_from(&hit.source_name);
            self.boss_detected = true;
        }

        let hit_index = attempt.ability_hits.len();
        if let Some(sequence_id) = &hit.sequence_id {
            self.shields.track(
                sequence_id,
                PendingHit {
                    hit_index,
                    target_id: hit.target_id.clone(),
                    before,
                },
            );
        }
        attempt.ability_hits.push(hit);
    }

    fn handle_death(&mut self, death: PlayerDeath) {
        if !self.state.is_engaged() {
            return;
        }
        if let Some(attempt) = self.session.current_attempt_mut() {
            attempt.deaths.push(death);
        }
    }

    fn handle_status(&mut self, status: StatusLine) {
        if self.state != ParserState::InCombat {
            return;
        }
        let Some(attempt) = self.session.current_attempt_mut() else {
            return;
        };

        if let Some(debuff) = status.debuff {
            attempt.debuffs_applied.push(debuff);
        }
        if let Some(buff) = status.mitigation_buff {
            attempt.active_mitigations.push(buff);
        }
        if let Some(debuff) = status.boss_debuff {
            attempt.active_mitigations.push(debuff);
        }
    }

    fn handle_effect_result(&mut self, result: EffectResult) {
        if !self.state.is_engaged() {
            return;
        }

        let absorbed = self.shields.confirm(&result);
        if absorbed.is_empty() {
            return;
        }

        let Some(attempt) = self.session.current_attempt_mut() else {
            return;
        };
        for (hit_index, amount) in absorbed {
            if let Some(hit) = attempt.ability_hits.get_mut(hit_index) {
                hit.absorbed_damage = Some(amount);
            }
        }
    }

    fn handle_targeting(&mut self, event: TargetingEvent) {
        if self.state != ParserState::InCombat {
            return;
        }
        if let Some(attempt) = self.session.current_attempt_mut() {
            attempt.targeting_events.push(event);
        }
    }

    fn handle_actor_control(&mut self, control: ActorControl) {
        let Some(command) = control.command() else {
            return;
        };
        let ts = control.timestamp;

        match (command, self.state) {
            (ActorCommand::Commence, ParserState::InInstance | ParserState::Idle) => {
                self.start_attempt(ts);
                self.change_state(ParserState::InCombat, ts);
            }
            (ActorCommand::WipeFadeout, ParserState::InCombat) => {
                self.change_state(ParserState::WipePending, ts);
                self.pending_wipe_time = Some(ts);
            }
            (ActorCommand::Victory, ParserState::InCombat) => {
                self.finalize_attempt(ts, AttemptOutcome::Victory);
                self.change_state(ParserState::InInstance, ts);
            }
            (ActorCommand::BarrierUp, ParserState::WipePending) => {
                self.finalize_pending_wipe();
                self.change_state(ParserState::InInstance, ts);
            }
            (ActorCommand::Recommence, ParserState::WipePending | ParserState::InInstance) => {
                if self.state == ParserState::WipePending {
                    self.finalize_pending_wipe();
                }
                self.start_attempt(ts);
                self.change_state(ParserState::InCombat, ts);
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attempt lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    fn start_attempt(&mut self, start_time: NaiveDateTime) {
        self.boss_detected = false;
        self.shields.clear();

        if self.session.current_fight().is_none() {
            tracing::debug!("Commence without a zone, creating placeholder fight");
            self.session
                .start_fight(PLACEHOLDER_ZONE_ID, PLACEHOLDER_ZONE_NAME, Some(start_time));
        }
        if let Some(fight) = self.session.current_fight_mut() {
            let attempt = fight.start_attempt(start_time);
            tracing::debug!(attempt = attempt.attempt_number, "Attempt started");
        }
    }

    /// Runs at most once per pending wipe.
    fn finalize_pending_wipe(&mut self) {
        if let Some(wipe_time) = self.pending_wipe_time.take() {
            self.finalize_attempt(wipe_time, AttemptOutcome::Wipe);
        }
    }

    fn finalize_attempt(&mut self, end_time: NaiveDateTime, outcome: AttemptOutcome) {
        let Some(fight) = self.session.current_fight_mut() else {
            return;
        };
        let fight_id = fight.fight_id;
        let Some(attempt) = fight.current_attempt_mut() else {
            return;
        };

        attempt.finalize(end_time, outcome, self.resolver.as_ref());
        let attempt_number = attempt.attempt_number;

        tracing::debug!(
            fight_id,
            attempt = attempt_number,
            outcome = ?outcome,
            hits = attempt.ability_hits.len(),
            deaths = attempt.deaths.len(),
            "Attempt finalized"
        );

        self.emit(FightSignal::AttemptCompleted {
            fight_id,
            attempt_number,
            outcome,
        });
    }

    fn change_state(&mut self, new_state: ParserState, timestamp: NaiveDateTime) {
        let old_state = self.state;
        self.state = new_state;
        if old_state != new_state {
            tracing::debug!(from = %old_state, to = %new_state, "State changed");
            self.emit(FightSignal::StateChanged {
                from: old_state,
                to: new_state,
                timestamp,
            });
        }
    }

    fn emit(&mut self, signal: FightSignal) {
        for handler in &mut self.handlers {
            handler.handle_signal(&signal, &self.session);
        }
    }
}
