use crate::roster::{eligibility, EligibilityStatus};
use crate::store::records::{MatchId, PlayerId, TeamSnapshot};
use crate::types::report::Finding;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Consistency checks over a loaded snapshot. Blocking findings describe data
/// that makes ratings ambiguous; warnings describe data that is skipped or
/// likely stale.
pub fn check_snapshot(snapshot: &TeamSnapshot, today: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();
    roster_findings(snapshot, today, &mut findings);
    call_up_findings(snapshot, &mut findings);
    stat_findings(snapshot, &mut findings);
    session_findings(snapshot, &mut findings);
    findings
}

fn roster_findings(snapshot: &TeamSnapshot, today: NaiveDate, findings: &mut Vec<Finding>) {
    let mut by_jersey: BTreeMap<u16, Vec<PlayerId>> = BTreeMap::new();
    for player in snapshot.active_players() {
        if let Some(number) = player.jersey_number {
            by_jersey.entry(number).or_default().push(player.id);
        }
        if eligibility(player, today) == EligibilityStatus::Expired {
            findings.push(Finding::warning(
                "roster.eligibility_expired",
                "Eligibility expired",
                format!(
                    "{} (id {}) has an eligibility that expired on {}.",
                    player.full_name(),
                    player.id,
                    player
                        .eligibility_expires
                        .map(|date| date.to_string())
                        .unwrap_or_default()
                ),
            ));
        }
    }
    for (number, players) in by_jersey.iter().filter(|(_, players)| players.len() > 1) {
        findings.push(Finding::blocking(
            "roster.duplicate_jersey",
            "Duplicate jersey number",
            format!("Jersey #{number} is worn by active players {}.", join_ids(players)),
        ));
    }
}

fn call_up_findings(snapshot: &TeamSnapshot, findings: &mut Vec<Finding>) {
    let mut seen: BTreeSet<(MatchId, PlayerId)> = BTreeSet::new();
    for call_up in &snapshot.call_ups {
        let key = (call_up.match_id, call_up.player_id);
        if !seen.insert(key) {
            findings.push(Finding::blocking(
                "call_ups.duplicate_entry",
                "Duplicate call-up",
                format!(
                    "Player {} is called up more than once for match {}.",
                    call_up.player_id, call_up.match_id
                ),
            ));
        }
        match snapshot.player(call_up.player_id) {
            None => findings.push(unknown_reference(
                "call_ups.unknown_reference",
                "Call-up",
                call_up.match_id,
                call_up.player_id,
                "player",
            )),
            Some(player) if !player.active => findings.push(Finding::warning(
                "call_ups.inactive_player",
                "Call-up for inactive player",
                format!(
                    "{} (id {}) is deactivated but called up for match {}.",
                    player.full_name(),
                    player.id,
                    call_up.match_id
                ),
            )),
            Some(_) => {}
        }
        if snapshot.match_by_id(call_up.match_id).is_none() {
            findings.push(unknown_reference(
                "call_ups.unknown_reference",
                "Call-up",
                call_up.match_id,
                call_up.player_id,
                "match",
            ));
        }
    }
}

fn stat_findings(snapshot: &TeamSnapshot, findings: &mut Vec<Finding>) {
    let mut seen: BTreeSet<(MatchId, PlayerId)> = BTreeSet::new();
    for stat in &snapshot.stats {
        if !seen.insert((stat.match_id, stat.player_id)) {
            findings.push(Finding::blocking(
                "stats.duplicate_entry",
                "Duplicate stat line",
                format!(
                    "Player {} has more than one stat line for match {}.",
                    stat.player_id, stat.match_id
                ),
            ));
        }
        if snapshot.player(stat.player_id).is_none() {
            findings.push(unknown_reference(
                "stats.unknown_reference",
                "Stat line",
                stat.match_id,
                stat.player_id,
                "player",
            ));
        }
        if snapshot.match_by_id(stat.match_id).is_none() {
            findings.push(unknown_reference(
                "stats.unknown_reference",
                "Stat line",
                stat.match_id,
                stat.player_id,
                "match",
            ));
        }
    }
}

fn session_findings(snapshot: &TeamSnapshot, findings: &mut Vec<Finding>) {
    for session in &snapshot.sessions {
        let present = session.present.resolve();
        let excused = session.excused_absent.resolve();
        let (present, excused) = match (present, excused) {
            (Ok(present), Ok(excused)) => (present, excused),
            (Err(reason), _) | (_, Err(reason)) => {
                findings.push(Finding::warning(
                    "sessions.malformed_presence",
                    "Unreadable presence list",
                    format!(
                        "Session {} on {} is skipped from attendance: {reason}.",
                        session.id, session.date
                    ),
                ));
                continue;
            }
        };
        let both = present.intersection(&excused).copied().collect::<Vec<_>>();
        if !both.is_empty() {
            findings.push(Finding::warning(
                "sessions.present_and_excused",
                "Player both present and excused",
                format!(
                    "Session {} on {} lists players {} as present and excused; present wins.",
                    session.id,
                    session.date,
                    join_ids(&both)
                ),
            ));
        }
    }
}

fn unknown_reference(
    id: &str,
    record: &str,
    match_id: MatchId,
    player_id: PlayerId,
    missing: &str,
) -> Finding {
    let missing_id = if missing == "player" { player_id } else { match_id };
    Finding::blocking(
        id,
        "Reference to unknown record",
        format!(
            "{record} for match {match_id} / player {player_id} references unknown {missing} {missing_id}."
        ),
    )
}

fn join_ids(ids: &[PlayerId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
