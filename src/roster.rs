use crate::engine::jersey_order;
use crate::error::{CourtsideError, Result};
use crate::store::records::{Player, PlayerId, TeamSnapshot};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Medical/administrative clearance to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    NotEligible,
    Expired,
    Eligible,
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotEligible => "not eligible",
            Self::Expired => "expired",
            Self::Eligible => "eligible",
        };
        f.write_str(label)
    }
}

pub fn eligibility(player: &Player, today: NaiveDate) -> EligibilityStatus {
    if !player.eligible {
        return EligibilityStatus::NotEligible;
    }
    match player.eligibility_expires {
        Some(expires) if today > expires => EligibilityStatus::Expired,
        _ => EligibilityStatus::Eligible,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub jersey_number: Option<u16>,
    pub birth_year: Option<i32>,
    pub eligibility: EligibilityStatus,
    pub eligibility_expires: Option<NaiveDate>,
    pub active: bool,
}

pub fn roster_entries(
    snapshot: &TeamSnapshot,
    include_inactive: bool,
    today: NaiveDate,
) -> Vec<RosterEntry> {
    let mut entries = snapshot
        .players
        .iter()
        .filter(|player| include_inactive || player.active)
        .map(|player| RosterEntry {
            player_id: player.id,
            name: player.full_name(),
            jersey_number: player.jersey_number,
            birth_year: player.birth_year,
            eligibility: eligibility(player, today),
            eligibility_expires: player.eligibility_expires,
            active: player.active,
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| {
        jersey_order(a.jersey_number)
            .cmp(&jersey_order(b.jersey_number))
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Soft-deletes a player. Records referencing the player are kept.
/// Returns `false` when the player was already inactive.
pub fn deactivate(snapshot: &mut TeamSnapshot, player_id: PlayerId) -> Result<bool> {
    let player = snapshot
        .player_mut(player_id)
        .ok_or(CourtsideError::UnknownPlayer(player_id))?;
    if !player.active {
        return Ok(false);
    }
    player.active = false;
    tracing::info!(player = player_id, "player deactivated");
    Ok(true)
}
