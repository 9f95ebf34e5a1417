pub mod attendance;
pub mod board;
pub mod callups;
pub mod checks;
pub mod performance;
pub mod rating;

use crate::store::records::{PlayerId, TeamSnapshot};
use crate::store::scope::Scope;
use crate::types::scoring::{PlayedPolicy, Score};
use attendance::AttendanceStats;
use callups::CallUpStats;
use performance::PerformanceStats;
use rating::Rating;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEvaluation {
    pub player_id: PlayerId,
    pub name: Option<String>,
    pub jersey_number: Option<u16>,
    pub attendance: AttendanceStats,
    pub call_ups: CallUpStats,
    pub performance: PerformanceStats,
    pub rating: Rating,
}

impl PlayerEvaluation {
    pub fn score(&self) -> Score {
        self.rating.score
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("player {}", self.player_id))
    }
}

/// Rates one player against the records in `scope`. Unknown ids are not an
/// error: they simply have no records and receive the neutral rating.
pub fn evaluate_player(
    snapshot: &TeamSnapshot,
    scope: &Scope<'_>,
    player_id: PlayerId,
    policy: PlayedPolicy,
) -> PlayerEvaluation {
    let player = snapshot.player(player_id);
    let attendance = attendance::attendance_stats(player_id, scope.sessions.iter().copied());
    let call_ups = callups::call_up_stats(
        player_id,
        scope.matches.iter().copied(),
        scope.call_ups.iter().copied(),
        scope.stats.iter().copied(),
        policy,
    );
    let performance = performance::performance_stats(player_id, scope.stats.iter().copied());
    let rating = rating::rate(&attendance, &call_ups, &performance);

    tracing::debug!(
        player = player_id,
        attendance = rating.attendance,
        call_ups = rating.call_ups,
        played = rating.played,
        val = rating.val,
        plus_minus = rating.plus_minus,
        bonus = rating.excused_bonus,
        penalty = rating.decline_penalty,
        score = rating.score,
        "player rated"
    );

    PlayerEvaluation {
        player_id,
        name: player.map(|player| player.full_name()),
        jersey_number: player.and_then(|player| player.jersey_number),
        attendance,
        call_ups,
        performance,
        rating,
    }
}

/// Active players only, best rating first.
pub fn evaluate_roster(
    snapshot: &TeamSnapshot,
    scope: &Scope<'_>,
    policy: PlayedPolicy,
) -> Vec<PlayerEvaluation> {
    let mut evaluations = snapshot
        .active_players()
        .map(|player| evaluate_player(snapshot, scope, player.id, policy))
        .collect::<Vec<_>>();
    evaluations.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| jersey_order(a.jersey_number).cmp(&jersey_order(b.jersey_number)))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    evaluations
}

/// Players without a number sort after numbered ones.
pub(crate) fn jersey_order(number: Option<u16>) -> (bool, u16) {
    (number.is_none(), number.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub players_total: usize,
    pub players_rated: usize,
    pub average: Option<Score>,
    pub best: Option<RatedPlayer>,
    pub lowest: Option<RatedPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub score: Score,
}

impl From<&PlayerEvaluation> for RatedPlayer {
    fn from(evaluation: &PlayerEvaluation) -> Self {
        Self {
            player_id: evaluation.player_id,
            name: evaluation.display_name(),
            score: evaluation.score(),
        }
    }
}

pub fn team_summary(evaluations: &[PlayerEvaluation], excludes_zero: bool) -> TeamSummary {
    let mut rated = evaluations
        .iter()
        .filter(|evaluation| !excludes_zero || evaluation.score() > 0.0)
        .collect::<Vec<_>>();
    rated.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let total = rated.iter().map(|evaluation| evaluation.score()).sum::<Score>();
    let average = (!rated.is_empty()).then(|| total / rated.len() as f64);

    TeamSummary {
        players_total: evaluations.len(),
        players_rated: rated.len(),
        average,
        best: rated.first().copied().map(RatedPlayer::from),
        lowest: rated.last().copied().map(RatedPlayer::from),
    }
}
