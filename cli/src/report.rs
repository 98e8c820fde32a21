//! Plain-text reports written to any `io::Write`.

use std::io::{self, Write};
use xivlog_core::mitigation::MitigationSummary;
use xivlog_core::{Attempt, Fight, Session};

const WIDE_RULE: usize = 70;

/// `1234567` → `1,234,567`
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn sorted_by_count<'a, T>(
    grouped: impl IntoIterator<Item = (&'a str, Vec<&'a T>)>,
) -> Vec<(&'a str, Vec<&'a T>)> {
    let mut rows: Vec<_> = grouped.into_iter().collect();
    rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
    rows
}

pub fn write_attempt_report(out: &mut impl Write, attempt: &Attempt) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(
        out,
        "ATTEMPT #{} - {}",
        attempt.attempt_number,
        attempt.outcome.as_str().to_uppercase()
    )?;
    writeln!(out, "Boss: {}", attempt.boss_name)?;
    writeln!(out, "Duration: {:.1}s", attempt.duration_seconds())?;
    writeln!(out, "Unique abilities: {}", attempt.unique_abilities())?;
    writeln!(out, "Start: {}", attempt.start_time.format("%H:%M:%S"))?;
    if let Some(end) = attempt.end_time {
        writeln!(out, "End: {}", end.format("%H:%M:%S"))?;
    }
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;

    writeln!(out, "\n--- ABILITY HITS ---")?;
    if attempt.ability_hits.is_empty() {
        writeln!(out, "  No ability hits recorded")?;
    } else {
        writeln!(
            out,
            "{:<30} {:>6} {:>12} {:>14} {:>10}",
            "Ability", "Hits", "Total Damage", "Unmitigated", "Type"
        )?;
        writeln!(out, "{}", "-".repeat(76))?;
        for (name, hits) in sorted_by_count(attempt.abilities_by_name()) {
            let damage: i64 = hits.iter().map(|h| h.damage).sum();
            let unmitigated: i64 = hits
                .iter()
                .map(|h| h.unmitigated_damage.unwrap_or(h.damage))
                .sum();
            let hit_type = hits
                .first()
                .and_then(|h| h.hit_type)
                .map_or("-", |t| t.as_str());
            writeln!(
                out,
                "{:<30} {:>6} {:>12} {:>14} {:>10}",
                name,
                hits.len(),
                thousands(damage),
                thousands(unmitigated),
                hit_type
            )?;
        }
    }

    writeln!(out, "\n--- HITS BY PLAYER ---")?;
    if attempt.ability_hits.is_empty() {
        writeln!(out, "  No player hits recorded")?;
    } else {
        writeln!(
            out,
            "{:<25} {:>10} {:>12} {:>12}",
            "Player", "Times Hit", "Total Damage", "Absorbed"
        )?;
        writeln!(out, "{}", "-".repeat(62))?;
        for (name, hits) in sorted_by_count(attempt.hits_by_player()) {
            let damage: i64 = hits.iter().map(|h| h.damage).sum();
            let absorbed: i64 = hits.iter().filter_map(|h| h.absorbed_damage).sum();
            writeln!(
                out,
                "{:<25} {:>10} {:>12} {:>12}",
                name,
                hits.len(),
                thousands(damage),
                thousands(absorbed)
            )?;
        }
    }

    writeln!(out, "\n--- DEBUFFS APPLIED ---")?;
    if attempt.debuffs_applied.is_empty() {
        writeln!(out, "  No debuffs applied by boss")?;
    } else {
        writeln!(out, "{:<25} {:<25} {:>6}", "Player", "Debuff", "Count")?;
        writeln!(out, "{}", "-".repeat(60))?;
        let mut by_player: Vec<_> = attempt.debuffs_by_player().into_iter().collect();
        by_player.sort_by(|a, b| a.0.cmp(b.0));
        for (player, debuffs) in by_player {
            // first-seen order within a player
            let mut counts: Vec<(&str, usize)> = Vec::new();
            for debuff in debuffs {
                let name = debuff.effect_name.as_str();
                match counts.iter().position(|(seen, _)| *seen == name) {
                    Some(i) => counts[i].1 += 1,
                    None => counts.push((name, 1)),
                }
            }
            for (debuff, count) in counts {
                writeln!(out, "{:<25} {:<25} {:>6}", player, debuff, count)?;
            }
        }
    }

    writeln!(out, "\n--- DEATHS ---")?;
    if attempt.deaths.is_empty() {
        writeln!(out, "  No deaths recorded")?;
    } else {
        writeln!(out, "{:<12} {:<25} {:<25}", "Time", "Player", "Killed By")?;
        writeln!(out, "{}", "-".repeat(65))?;
        for death in &attempt.deaths {
            writeln!(
                out,
                "{:<12} {:<25} {:<25}",
                death.timestamp.format("%H:%M:%S").to_string(),
                death.player_name,
                death.killer_name.as_deref().unwrap_or("(unknown)")
            )?;
        }
    }

    writeln!(out)
}

/// Per-hit timeline with the mitigations that were up on the target.
pub fn write_hit_timeline(out: &mut impl Write, attempt: &Attempt) -> io::Result<()> {
    writeln!(out, "\n--- HIT TIMELINE ---")?;
    if attempt.ability_hits.is_empty() {
        return writeln!(out, "  No ability hits recorded");
    }

    writeln!(
        out,
        "{:>8} {:<28} {:<20} {:>10} {:>12} {:>9}  Mitigation",
        "Time", "Ability", "Target", "Damage", "Unmitigated", "Absorbed"
    )?;
    writeln!(out, "{}", "-".repeat(110))?;
    for hit in &attempt.ability_hits {
        let active = attempt.active_mitigations_at(&hit.target_id, hit.timestamp);
        let summary = MitigationSummary::from_active(&active);
        let names: Vec<&str> = summary
            .player_buffs
            .iter()
            .chain(&summary.boss_debuffs)
            .map(|m| m.name.as_str())
            .collect();
        let mitigation = if names.is_empty() {
            String::from("-")
        } else {
            format!("{:.0}% ({})", summary.total_mitigation_percent, names.join(", "))
        };

        writeln!(
            out,
            "{:>7.1}s {:<28} {:<20} {:>10} {:>12} {:>9}  {}",
            attempt.relative_time(hit.timestamp),
            hit.ability_name,
            hit.target_name,
            thousands(hit.damage),
            hit.unmitigated_damage.map_or_else(|| "-".to_string(), thousands),
            hit.absorbed_damage.map_or_else(|| "-".to_string(), thousands),
            mitigation
        )?;
    }
    Ok(())
}

pub fn write_fight_list(out: &mut impl Write, session: &Session) -> io::Result<()> {
    if session.fights.is_empty() {
        return writeln!(out, "No fights recorded");
    }

    writeln!(
        out,
        "{:>4} {:<35} {:<25} {:>8} {:>6} {:>9}",
        "ID", "Zone", "Boss", "Attempts", "Wipes", "Victories"
    )?;
    writeln!(out, "{}", "-".repeat(92))?;
    for fight in &session.fights {
        write_fight_row(out, fight)?;
    }
    Ok(())
}

fn write_fight_row(out: &mut impl Write, fight: &Fight) -> io::Result<()> {
    let boss = if fight.boss_name.is_empty() {
        "-"
    } else {
        fight.boss_name.as_str()
    };
    writeln!(
        out,
        "{:>4} {:<35} {:<25} {:>8} {:>6} {:>9}",
        fight.fight_id,
        fight.zone_name,
        boss,
        fight.attempts.len(),
        fight.total_wipes(),
        fight.total_victories()
    )
}

pub fn write_session_summary(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let stats = session.cross_attempt_stats();

    writeln!(out, "\n{}", "=".repeat(WIDE_RULE))?;
    writeln!(out, "SESSION SUMMARY")?;
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
    if let Some(fight) = session.current_fight() {
        writeln!(out, "Zone: {}", fight.zone_name)?;
        writeln!(out, "Boss: {}", fight.boss_name)?;
    }
    writeln!(out, "Fights: {}", stats.total_fights)?;
    writeln!(out, "Total Attempts: {}", stats.total_attempts)?;
    writeln!(out, "Wipes: {}", stats.total_wipes)?;
    writeln!(out, "Victories: {}", stats.total_victories)?;
    writeln!(out, "Players: {}", session.players.len())?;

    if !session.players.is_empty() {
        writeln!(out, "\n--- PLAYERS ---")?;
        let mut players: Vec<_> = session.players.values().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        for player in players {
            writeln!(out, "  {} ({}, {})", player.name, player.job_name, player.id)?;
        }
    }

    let roster: Vec<&str> = session.roster_players().map(|p| p.name.as_str()).collect();
    if !roster.is_empty() {
        writeln!(out, "Current roster: {}", roster.join(", "))?;
    }

    if !stats.deaths_by_player.is_empty() {
        writeln!(out, "\n--- DEATHS BY PLAYER (ALL ATTEMPTS) ---")?;
        let mut deaths: Vec<_> = stats.deaths_by_player.iter().collect();
        deaths.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (player, count) in deaths {
            writeln!(out, "  {}: {} deaths", player, count)?;
        }
    }

    writeln!(out, "\n{}", "=".repeat(WIDE_RULE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xivlog_core::FightProcessor;

    const LINES: &[&str] = &[
        "01|2026-01-03T14:22:22.5320000-06:00|51C|Hell on Rails (Extreme)|f9c7f8c2922cd9e5",
        "03|2026-01-03T14:22:00.7540000-06:00|10764E7E|Sir Bj|13|64|0000|28|Jenova|0|0|294990|294990|10000|10000|||28.29|-33.82|2.46|-0.74|c3899f731f15d677",
        "33|2026-01-03T14:22:28.9740000-06:00|80034E8B|40000001|E10|00|00|00|34e379559349eb4c",
        "25|2026-01-03T14:24:30.8900000-06:00|10764E7E|Sir Bj|4000A13D|Doomtrain|1594c95763aee893",
        "33|2026-01-03T15:21:02.2600000-06:00|80037569|40000005|00|00|00|00|f8bb8ab23c289094",
        "33|2026-01-03T15:21:10.0000000-06:00|80037569|40000011|00|00|00|00|hash789",
    ];

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn wiped_session() -> FightProcessor {
        let mut processor = FightProcessor::new();
        for line in LINES {
            processor.submit_line(line);
        }
        processor
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(43077), "43,077");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(thousands(-1000), "-1,000");
    }

    #[test]
    fn test_attempt_report_sections() {
        let processor = wiped_session();
        let attempt = processor.current_attempt().unwrap();
        let text = render(|out| write_attempt_report(out, attempt));

        assert!(text.contains("ATTEMPT #1 - WIPE"));
        assert!(text.contains("No ability hits recorded"));
        assert!(text.contains("Unique abilities: 0"));
        assert!(text.contains("Sir Bj"));
        assert!(text.contains("Doomtrain"));
    }

    #[test]
    fn test_session_summary_counts() {
        let processor = wiped_session();
        let text = render(|out| write_session_summary(out, processor.session()));

        assert!(text.contains("Zone: Hell on Rails (Extreme)"));
        assert!(text.contains("Wipes: 1"));
        assert!(text.contains("Sir Bj (Paladin, 10764E7E)"));
        assert!(text.contains("Sir Bj: 1 deaths"));
        assert!(text.contains("Current roster: Sir Bj"));
    }

    #[test]
    fn test_fight_list() {
        let processor = wiped_session();
        let text = render(|out| write_fight_list(out, processor.session()));
        assert!(text.contains("Hell on Rails (Extreme)"));

        let empty = FightProcessor::new();
        let text = render(|out| write_fight_list(out, empty.session()));
        assert_eq!(text, "No fights recorded\n");
    }
}
