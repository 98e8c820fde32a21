//! State machine tests driven by real log lines through `submit_line`.

use std::sync::{Arc, Mutex};

use crate::combat_log::fixtures::*;
use crate::hit_type::{AbilityCache, CachedAbility, HitType};
use crate::session::{AttemptOutcome, Session};

use super::{FightProcessor, FightSignal, ParserState, SignalHandler};

fn feed(processor: &mut FightProcessor, lines: &[&str]) {
    for line in lines {
        processor.submit_line(line);
    }
}

fn processor_with(lines: &[&str]) -> FightProcessor {
    let mut processor = FightProcessor::new();
    feed(&mut processor, lines);
    processor
}

fn sir_bj_hit() -> String {
    ABILITY_ENEMY_TO_PLAYER.replace("106ECCE2|Alfredo Saus", "10764E7E|Sir Bj")
}

fn sir_bj_death() -> String {
    DEATH.replace("10719475|Gyodo Ohta", "10764E7E|Sir Bj")
}

fn sir_bj_combatant() -> String {
    ADD_COMBATANT_PLAYER.replace("1075762D|Jalapeno Jeff|21", "10764E7E|Sir Bj|13")
}

/// Effect result for Alfredo Saus carrying a shield, on an unrelated sequence.
fn shield_up(percent: u32) -> String {
    EFFECT_RESULT
        .replace("|00002C2D|", "|00002C00|")
        .replace("|0|hash", &format!("|{percent}|hash"))
}

struct Recorder(Arc<Mutex<Vec<FightSignal>>>);

impl SignalHandler for Recorder {
    fn handle_signal(&mut self, signal: &FightSignal, _session: &Session) {
        if let Ok(mut signals) = self.0.lock() {
            signals.push(signal.clone());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Initial state and reset
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_initial_state_is_idle_and_empty() {
    let processor = FightProcessor::new();
    assert_eq!(processor.state(), ParserState::Idle);
    assert!(processor.session().fights.is_empty());
    assert!(processor.session().current_fight().is_none());
    assert_eq!(processor.lines_processed(), 0);
}

#[test]
fn test_reset_matches_fresh_processor() {
    let mut processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        ADD_COMBATANT_PLAYER,
        COMMENCE,
        ABILITY_ENEMY_TO_PLAYER,
        WIPE,
    ]);
    assert_eq!(processor.state(), ParserState::WipePending);

    processor.reset();
    let fresh = FightProcessor::new();

    assert_eq!(processor.state(), fresh.state());
    assert_eq!(processor.lines_processed(), 0);
    assert!(processor.current_attempt().is_none());
    assert_eq!(
        serde_json::to_value(processor.session()).unwrap(),
        serde_json::to_value(fresh.session()).unwrap()
    );

    // the pending wipe latch is gone too: barrier up changes nothing
    processor.submit_line(BARRIER_UP);
    assert_eq!(processor.state(), ParserState::Idle);
    assert!(processor.session().fights.is_empty());
}

#[test]
fn test_lines_processed_counts_skipped_lines() {
    let processor = processor_with(&["", "   ", "not|enough", "99|2026-01-03T14:22:00.0000000-06:00|x|y|z"]);
    assert_eq!(processor.lines_processed(), 4);
    assert_eq!(processor.state(), ParserState::Idle);
}

// ─────────────────────────────────────────────────────────────────────────────
// Zone changes and roster
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_combat_zone_starts_fight() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL]);

    assert_eq!(processor.state(), ParserState::InInstance);
    let session = processor.session();
    assert_eq!(session.fights.len(), 1);
    let fight = session.current_fight().unwrap();
    assert_eq!(fight.fight_id, 1);
    assert_eq!(fight.zone_id, "51C");
    assert_eq!(fight.zone_name, "Hell on Rails (Extreme)");
    assert!(session.start_time.is_some());
}

#[test]
fn test_city_zone_stays_idle() {
    let processor = processor_with(&[ZONE_CHANGE_CITY]);
    assert_eq!(processor.state(), ParserState::Idle);
    assert!(processor.session().fights.is_empty());
}

#[test]
fn test_each_combat_zone_change_adds_one_fight() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, ZONE_CHANGE_CITY, ZONE_CHANGE_TRIAL]);
    let ids: Vec<u32> = processor.session().fights.iter().map(|f| f.fight_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_session_start_time_is_first_zone_change() {
    let processor = processor_with(&[ZONE_CHANGE_CITY, ZONE_CHANGE_TRIAL]);
    let start = processor.session().start_time.unwrap();
    assert_eq!(start.format("%H:%M:%S").to_string(), "14:22:00");
}

#[test]
fn test_players_added_to_session_and_fight() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, ADD_COMBATANT_PLAYER, ADD_COMBATANT_ENEMY]);
    let session = processor.session();

    let player = session.player("1075762D").unwrap();
    assert_eq!(player.name, "Jalapeno Jeff");
    assert_eq!(player.job_name, "Astrologian");
    assert_eq!(session.players.len(), 1);

    let fight = session.current_fight().unwrap();
    let names: Vec<&str> = fight.players(session).map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Jalapeno Jeff"]);
}

#[test]
fn test_zone_change_clears_roster_only() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, ADD_COMBATANT_PLAYER, ZONE_CHANGE_CITY]);
    let session = processor.session();

    assert!(session.roster.is_empty());
    assert_eq!(session.roster_players().count(), 0);
    assert!(session.player("1075762D").is_some());
    // the fight keeps who was there
    assert_eq!(session.fights[0].roster, vec!["1075762D".to_string()]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle transitions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_commence_starts_attempt() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE]);

    assert_eq!(processor.state(), ParserState::InCombat);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.attempt_number, 1);
    assert_eq!(attempt.outcome, AttemptOutcome::InProgress);
}

#[test]
fn test_commence_without_zone_creates_placeholder_fight() {
    let processor = processor_with(&[COMMENCE]);

    assert_eq!(processor.state(), ParserState::InCombat);
    let fight = processor.session().current_fight().unwrap();
    assert_eq!(fight.zone_id, "unknown");
    assert_eq!(fight.zone_name, "Unknown Zone");
    assert_eq!(fight.attempts.len(), 1);
}

#[test]
fn test_victory_finalizes_immediately() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, VICTORY]);

    assert_eq!(processor.state(), ParserState::InInstance);
    let fight = processor.session().current_fight().unwrap();
    assert_eq!(fight.completed_attempts().count(), 1);

    let attempt = fight.current_attempt().unwrap();
    assert_eq!(attempt.outcome, AttemptOutcome::Victory);
    assert_eq!(
        attempt.end_time.unwrap().format("%H:%M:%S%.3f").to_string(),
        "14:31:35.857"
    );
}

#[test]
fn test_wipe_waits_for_barrier_up() {
    let mut processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, WIPE]);

    assert_eq!(processor.state(), ParserState::WipePending);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.outcome, AttemptOutcome::InProgress);
    assert!(attempt.end_time.is_none());

    // deaths logged after the fade-out still belong to the pull
    processor.submit_line(DEATH);
    processor.submit_line(BARRIER_UP);

    assert_eq!(processor.state(), ParserState::InInstance);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.outcome, AttemptOutcome::Wipe);
    assert_eq!(attempt.deaths.len(), 1);
    assert_eq!(attempt.deaths[0].player_name, "Gyodo Ohta");
    // ends at the fade-out, not the barrier
    assert_eq!(
        attempt.end_time.unwrap().format("%H:%M:%S%.3f").to_string(),
        "15:21:02.260"
    );
}

#[test]
fn test_recommence_after_wipe_finalizes_then_starts_next() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, WIPE, RECOMMENCE]);

    assert_eq!(processor.state(), ParserState::InCombat);
    let fight = processor.session().current_fight().unwrap();
    assert_eq!(fight.attempts.len(), 2);
    assert_eq!(fight.attempts[0].outcome, AttemptOutcome::Wipe);
    assert_eq!(fight.attempts[1].attempt_number, 2);
    assert_eq!(fight.attempts[1].outcome, AttemptOutcome::InProgress);
}

#[test]
fn test_recommence_from_instance_starts_attempt() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, WIPE, BARRIER_UP, RECOMMENCE]);

    assert_eq!(processor.state(), ParserState::InCombat);
    let fight = processor.session().current_fight().unwrap();
    assert_eq!(fight.attempts.len(), 2);
    assert_eq!(fight.total_wipes(), 1);
}

#[test]
fn test_recommence_from_idle_is_ignored() {
    let processor = processor_with(&[RECOMMENCE]);
    assert_eq!(processor.state(), ParserState::Idle);
    assert!(processor.session().fights.is_empty());
}

#[test]
fn test_out_of_place_signals_are_ignored() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, WIPE, VICTORY, BARRIER_UP]);
    assert_eq!(processor.state(), ParserState::InInstance);
    assert!(processor.current_attempt().is_none());

    let unknown = "33|2026-01-03T14:22:30.0000000-06:00|80034E8B|8000000C|00|00|00|00|hash";
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, unknown]);
    assert_eq!(processor.state(), ParserState::InCombat);
}

#[test]
fn test_commence_while_in_combat_is_ignored() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, COMMENCE]);
    assert_eq!(processor.session().current_fight().unwrap().attempts.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Event application
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ability_recorded_in_combat_only() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, ABILITY_ENEMY_TO_PLAYER]);
    assert!(processor.current_attempt().is_none());

    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, ABILITY_ENEMY_TO_PLAYER]);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.ability_hits.len(), 1);
    assert_eq!(attempt.ability_hits[0].damage, 43077);

    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, WIPE, ABILITY_ENEMY_TO_PLAYER]);
    assert!(processor.current_attempt().unwrap().ability_hits.is_empty());
}

#[test]
fn test_boss_detected_from_first_enemy_hit() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, ABILITY_ENEMY_TO_PLAYER]);
    let fight = processor.session().current_fight().unwrap();

    assert_eq!(fight.boss_name, "Doomtrain");
    assert_eq!(fight.current_attempt().unwrap().boss_name, "Doomtrain");
}

#[test]
fn test_boss_name_from_first_hit_sticks() {
    let add = ABILITY_ENEMY_TO_PLAYER.replace("|Doomtrain|", "|Ghost Train|");
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, ABILITY_ENEMY_TO_PLAYER, &add]);
    assert_eq!(processor.session().current_fight().unwrap().boss_name, "Doomtrain");
}

#[test]
fn test_next_attempt_inherits_boss_name() {
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        ABILITY_ENEMY_TO_PLAYER,
        WIPE,
        RECOMMENCE,
    ]);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.attempt_number, 2);
    assert_eq!(attempt.boss_name, "Doomtrain");
}

#[test]
fn test_first_player_damage_anchors_timeline() {
    let later = ABILITY_PLAYER_TO_ENEMY.replace("14:22:49.641", "14:23:10.000");
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        ABILITY_PLAYER_TO_ENEMY,
        &later,
    ]);
    let attempt = processor.current_attempt().unwrap();

    let first = attempt.first_damage_time.unwrap();
    assert_eq!(first.format("%H:%M:%S%.3f").to_string(), "14:22:49.641");
    assert!(attempt.ability_hits.is_empty());
}

#[test]
fn test_death_recorded_in_combat() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, DEATH]);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.deaths.len(), 1);
    assert_eq!(attempt.deaths[0].killer_name.as_deref(), Some("Doomtrain"));

    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, VICTORY, DEATH]);
    assert!(processor.current_attempt().unwrap().deaths.is_empty());
}

#[test]
fn test_status_lines_recorded_in_combat() {
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        DEBUFF_FROM_ENEMY,
        DEBUFF_FROM_ENVIRONMENT,
        RAMPART,
        REPRISAL,
    ]);
    let attempt = processor.current_attempt().unwrap();

    assert_eq!(attempt.debuffs_applied.len(), 2);
    assert_eq!(attempt.active_mitigations.len(), 2);
    assert!(attempt.active_mitigations.iter().any(|m| m.is_boss_debuff));

    let processor = processor_with(&[ZONE_CHANGE_TRIAL, DEBUFF_FROM_ENEMY]);
    assert!(processor.current_attempt().is_none());
}

#[test]
fn test_targeting_events_recorded_in_combat() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, CAST_AT_PLAYER, HEAD_MARKER_STACK]);
    let attempt = processor.current_attempt().unwrap();
    assert_eq!(attempt.targeting_events.len(), 2);
    assert_eq!(attempt.targeting_events[1].ability_name, "Stack");
}

// ─────────────────────────────────────────────────────────────────────────────
// Shield absorption
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_shield_drop_attributed_to_hit() {
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &shield_up(30),
        ABILITY_ENEMY_TO_PLAYER,
        EFFECT_RESULT,
    ]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];

    assert_eq!(hit.shield_percent_before, 30);
    // 30% of 287465 floored, shield now 0
    assert_eq!(hit.absorbed_damage, Some(86239));
}

#[test]
fn test_no_absorption_without_shield() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, ABILITY_ENEMY_TO_PLAYER, EFFECT_RESULT]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];
    assert_eq!(hit.shield_percent_before, 0);
    assert_eq!(hit.absorbed_damage, None);
}

#[test]
fn test_area_hit_waits_for_each_target() {
    let second_target = ABILITY_ENEMY_TO_PLAYER
        .replacen("21|", "22|", 1)
        .replace("106ECCE2|Alfredo Saus", "10764E7E|Sir Bj");
    let sir_bj_shield = shield_up(20).replace("106ECCE2|Alfredo Saus", "10764E7E|Sir Bj");
    let sir_bj_result = EFFECT_RESULT.replace("106ECCE2|Alfredo Saus", "10764E7E|Sir Bj");

    let mut processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &shield_up(30),
        &sir_bj_shield,
        ABILITY_ENEMY_TO_PLAYER,
        &second_target,
        EFFECT_RESULT,
    ]);
    {
        let hits = &processor.current_attempt().unwrap().ability_hits;
        assert_eq!(hits[0].absorbed_damage, Some(86239));
        assert_eq!(hits[1].absorbed_damage, None);
    }

    // confirmation for the second target can arrive during the wipe
    feed(&mut processor, &[WIPE, &sir_bj_result]);
    let hits = &processor.current_attempt().unwrap().ability_hits;
    // 20% of 287465 floored
    assert_eq!(hits[1].absorbed_damage, Some(57493));
}

#[test]
fn test_new_attempt_forgets_shields() {
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &shield_up(30),
        WIPE,
        RECOMMENCE,
        ABILITY_ENEMY_TO_PLAYER,
        EFFECT_RESULT,
    ]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];
    assert_eq!(hit.shield_percent_before, 0);
    assert_eq!(hit.absorbed_damage, None);
}

#[test]
fn test_oversized_shield_values_do_not_overflow() {
    let huge_hp = |line: &str| line.replace("|244388|287465|", "|1000000000000|1000000000000|");
    let shield = huge_hp(&shield_up(4294967295));
    let confirmation = huge_hp(EFFECT_RESULT);

    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &shield,
        ABILITY_ENEMY_TO_PLAYER,
        &confirmation,
    ]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];

    // shield capped at 100% of max HP
    assert_eq!(hit.shield_percent_before, 100);
    assert_eq!(hit.absorbed_damage, Some(1_000_000_000_000));
}

// ─────────────────────────────────────────────────────────────────────────────
// Finalization passes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_finalize_fills_hit_type_and_unmitigated_damage() {
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        RAMPART,
        REPRISAL,
        ABILITY_ENEMY_TO_PLAYER,
        VICTORY,
    ]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];

    assert_eq!(hit.hit_type, Some(HitType::Unknown));
    // Rampart 20% and Reprisal 10%: 43077 / 0.72
    assert_eq!(hit.unmitigated_damage, Some(59829));
}

#[test]
fn test_absurd_buff_duration_does_not_abort_finalize() {
    let endless_rampart = RAMPART.replace("|Rampart|20.00|", "|Rampart|9000000000000|");
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &endless_rampart,
        ABILITY_ENEMY_TO_PLAYER,
        VICTORY,
    ]);
    let attempt = processor.current_attempt().unwrap();

    assert_eq!(attempt.outcome, AttemptOutcome::Victory);
    // still active: 43077 / 0.8
    assert_eq!(attempt.ability_hits[0].unmitigated_damage, Some(53846));
}

#[test]
fn test_mitigation_on_other_player_does_not_apply() {
    let rampart_elsewhere = RAMPART.replace("106ECCE2|Alfredo Saus", "10764E7E|Sir Bj");
    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        COMMENCE,
        &rampart_elsewhere,
        ABILITY_ENEMY_TO_PLAYER,
        VICTORY,
    ]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];
    assert_eq!(hit.unmitigated_damage, Some(43077));
}

#[test]
fn test_unfinalized_attempt_has_no_estimates() {
    let processor = processor_with(&[ZONE_CHANGE_TRIAL, COMMENCE, ABILITY_ENEMY_TO_PLAYER, WIPE]);
    let hit = &processor.current_attempt().unwrap().ability_hits[0];
    assert_eq!(hit.hit_type, None);
    assert_eq!(hit.unmitigated_damage, None);
}

#[test]
fn test_resolver_hit_type_feeds_mitigation() {
    let mut cache = AbilityCache::in_memory();
    cache.insert(
        "b26f",
        CachedAbility {
            name: Some("Dead Man's Blastpipe".to_string()),
            attack_type_id: Some(5),
            attack_type_name: Some("Magic".to_string()),
        },
    );

    let feint = REPRISAL.replace("|4A9|Reprisal|", "|4AB|Feint|");
    let mut processor = FightProcessor::with_resolver(Box::new(cache));
    feed(&mut processor, &[ZONE_CHANGE_TRIAL, COMMENCE, &feint, ABILITY_ENEMY_TO_PLAYER, VICTORY]);

    let hit = &processor.current_attempt().unwrap().ability_hits[0];
    assert_eq!(hit.hit_type, Some(HitType::Magical));
    // Feint is only 5% against magic: 43077 / 0.95
    assert_eq!(hit.unmitigated_damage, Some(45344));
}

// ─────────────────────────────────────────────────────────────────────────────
// Signals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_attempt_complete_callback() {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&completed);

    let mut processor = FightProcessor::new();
    processor.on_attempt_complete(move |attempt| {
        sink.lock().unwrap().push((attempt.attempt_number, attempt.outcome));
    });
    feed(&mut processor, &[ZONE_CHANGE_TRIAL, COMMENCE, VICTORY, COMMENCE, WIPE, BARRIER_UP]);

    assert_eq!(
        *completed.lock().unwrap(),
        vec![(1, AttemptOutcome::Victory), (2, AttemptOutcome::Wipe)]
    );
}

#[test]
fn test_state_change_callback_only_on_change() {
    let states = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);

    let mut processor = FightProcessor::new();
    processor.on_state_change(move |state| sink.lock().unwrap().push(state));
    feed(&mut processor, &[ZONE_CHANGE_CITY, ZONE_CHANGE_TRIAL, ZONE_CHANGE_TRIAL, COMMENCE]);

    // Idle -> Idle is not a change
    assert_eq!(
        *states.lock().unwrap(),
        vec![ParserState::InInstance, ParserState::InCombat]
    );
}

#[test]
fn test_signal_handler_sees_completion_after_state() {
    let signals = Arc::new(Mutex::new(Vec::new()));
    let mut processor = FightProcessor::new();
    processor.add_handler(Box::new(Recorder(Arc::clone(&signals))));
    feed(&mut processor, &[ZONE_CHANGE_TRIAL, COMMENCE, VICTORY]);

    let signals = signals.lock().unwrap();
    assert_eq!(signals.len(), 4);
    assert!(matches!(
        signals[2],
        FightSignal::AttemptCompleted {
            fight_id: 1,
            attempt_number: 1,
            outcome: AttemptOutcome::Victory,
        }
    ));
    assert!(matches!(
        signals[3],
        FightSignal::StateChanged {
            from: ParserState::InCombat,
            to: ParserState::InInstance,
            ..
        }
    ));
}

#[test]
fn test_handlers_survive_reset() {
    let states = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);

    let mut processor = FightProcessor::new();
    processor.on_state_change(move |state| sink.lock().unwrap().push(state));
    processor.reset();
    processor.submit_line(ZONE_CHANGE_TRIAL);

    assert_eq!(*states.lock().unwrap(), vec![ParserState::InInstance]);
}

// ─────────────────────────────────────────────────────────────────────────────
// End to end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_wipe_scenario() {
    let hit = sir_bj_hit();
    let death = sir_bj_death();
    let combatant = sir_bj_combatant();

    let processor = processor_with(&[
        ZONE_CHANGE_TRIAL,
        &combatant,
        COMMENCE,
        &hit,
        &death,
        WIPE,
        BARRIER_UP,
    ]);

    assert_eq!(processor.state(), ParserState::InInstance);
    assert_eq!(processor.lines_processed(), 7);

    let session = processor.session();
    assert_eq!(session.fights.len(), 1);
    let fight = &session.fights[0];
    assert_eq!(fight.zone_name, "Hell on Rails (Extreme)");
    assert_eq!(fight.attempts.len(), 1);

    let attempt = &fight.attempts[0];
    assert_eq!(attempt.outcome, AttemptOutcome::Wipe);
    assert_eq!(attempt.ability_hits.len(), 1);
    assert_eq!(attempt.ability_hits[0].damage, 43077);
    assert_eq!(attempt.ability_hits[0].target_name, "Sir Bj");
    assert_eq!(attempt.deaths.len(), 1);
    assert_eq!(attempt.deaths[0].player_name, "Sir Bj");

    assert_eq!(session.player("10764E7E").unwrap().job_name, "Paladin");
    let stats = session.cross_attempt_stats();
    assert_eq!(stats.deaths_by_player["Sir Bj"], 1);
    assert_eq!(stats.ability_hits_by_player["Dead Man's Blastpipe"]["Sir Bj"], 1);
}
