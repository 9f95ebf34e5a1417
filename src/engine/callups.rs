use super::attendance::percent;
use crate::store::records::{CallUp, Match, MatchId, PlayerId, PlayerMatchStat};
use crate::types::scoring::PlayedPolicy;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CallUpStats {
    pub total_matches: u32,
    /// Accepted call-ups only.
    pub called_up: u32,
    pub declined: u32,
    pub played: u32,
    pub call_up_rate: f64,
}

impl CallUpStats {
    /// Call-ups issued to the player, accepted or not.
    pub fn issued(&self) -> u32 {
        self.called_up + self.declined
    }
}

pub fn call_up_stats<'a>(
    player: PlayerId,
    matches: impl IntoIterator<Item = &'a Match>,
    call_ups: impl IntoIterator<Item = &'a CallUp>,
    stats: impl IntoIterator<Item = &'a PlayerMatchStat>,
    policy: PlayedPolicy,
) -> CallUpStats {
    let mut declined_by_match = BTreeMap::<MatchId, bool>::new();
    for call_up in call_ups {
        if call_up.player_id == player {
            declined_by_match
                .entry(call_up.match_id)
                .or_insert(call_up.declined);
        }
    }

    let on_court = stats
        .into_iter()
        .filter(|stat| stat.player_id == player && stat.minutes_played > 0)
        .map(|stat| stat.match_id)
        .collect::<BTreeSet<_>>();

    let mut result = CallUpStats::default();
    for game in matches {
        result.total_matches += 1;
        match declined_by_match.get(&game.id) {
            Some(true) => result.declined += 1,
            Some(false) => {
                result.called_up += 1;
                let played = match policy {
                    PlayedPolicy::AcceptedCallUp => true,
                    PlayedPolicy::MinutesRecorded => on_court.contains(&game.id),
                };
                if played {
                    result.played += 1;
                }
            }
            None => {}
        }
    }

    result.call_up_rate = percent(result.called_up, result.total_matches);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn game(id: MatchId) -> Match {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "date": "2026-10-01",
            "opponent": format!("Opponent {id}"),
        }))
        .expect("match should build")
    }

    fn call_up(match_id: MatchId, player_id: PlayerId, declined: bool) -> CallUp {
        CallUp {
            match_id,
            player_id,
            starter: false,
            declined,
        }
    }

    fn minutes(match_id: MatchId, player_id: PlayerId, minutes_played: u32) -> PlayerMatchStat {
        PlayerMatchStat {
            player_id,
            match_id,
            minutes_played,
            ..PlayerMatchStat::default()
        }
    }

    fn by_call_up(player: PlayerId, matches: &[Match], call_ups: &[CallUp]) -> CallUpStats {
        call_up_stats(
            player,
            matches,
            call_ups,
            std::iter::empty(),
            PlayedPolicy::AcceptedCallUp,
        )
    }

    #[test]
    fn no_matches_yields_zero_rate() {
        let stats = call_up_stats(
            1,
            std::iter::empty(),
            std::iter::empty(),
            std::iter::empty(),
            PlayedPolicy::AcceptedCallUp,
        );
        assert_eq!(stats, CallUpStats::default());
    }

    #[test]
    fn accepted_call_ups_count_as_played_and_declines_do_not() {
        let matches = (1..=5).map(game).collect::<Vec<_>>();
        let call_ups = vec![
            call_up(1, 7, false),
            call_up(2, 7, false),
            call_up(3, 7, true),
            call_up(4, 8, false),
        ];
        let stats = by_call_up(7, &matches, &call_ups);
        assert_eq!(stats.total_matches, 5);
        assert_eq!(stats.called_up, 2);
        assert_eq!(stats.declined, 1);
        assert_eq!(stats.played, 2);
        assert_eq!(stats.issued(), 3);
        assert_eq!(stats.call_up_rate, 40.0);
    }

    #[test]
    fn never_called_up_has_zero_rate_with_matches_in_scope() {
        let matches = (1..=3).map(game).collect::<Vec<_>>();
        let stats = by_call_up(7, &matches, &[]);
        assert_eq!(stats.total_matches, 3);
        assert_eq!(stats.called_up, 0);
        assert_eq!(stats.call_up_rate, 0.0);
    }

    #[test]
    fn call_ups_for_matches_out_of_scope_are_ignored() {
        let matches = vec![game(1)];
        let call_ups = vec![call_up(1, 7, false), call_up(2, 7, true)];
        let stats = by_call_up(7, &matches, &call_ups);
        assert_eq!(stats.called_up, 1);
        assert_eq!(stats.declined, 0);
    }

    #[test]
    fn minutes_policy_requires_time_on_court() {
        let matches = (1..=3).map(game).collect::<Vec<_>>();
        let call_ups = vec![
            call_up(1, 7, false),
            call_up(2, 7, false),
            call_up(3, 7, true),
        ];
        let stats = vec![minutes(1, 7, 12), minutes(2, 7, 0), minutes(3, 7, 30)];

        let result = call_up_stats(
            7,
            &matches,
            &call_ups,
            &stats,
            PlayedPolicy::MinutesRecorded,
        );
        assert_eq!(result.called_up, 2);
        assert_eq!(result.played, 1);
        assert_eq!(result.declined, 1);
    }

    #[test]
    fn duplicate_call_up_rows_count_once() {
        let matches = vec![game(1)];
        let call_ups = vec![call_up(1, 7, false), call_up(1, 7, true)];
        let stats = by_call_up(7, &matches, &call_ups);
        assert_eq!(stats.called_up + stats.declined, 1);
    }

    proptest! {
        #[test]
        fn played_never_exceeds_accepted_call_ups(
            rows in proptest::collection::vec((1u32..12, any::<bool>(), 0u32..3), 0..30),
            by_minutes in any::<bool>(),
        ) {
            let matches = (1..=8).map(game).collect::<Vec<_>>();
            let call_ups = rows
                .iter()
                .map(|(match_id, declined, _)| call_up(*match_id, 7, *declined))
                .collect::<Vec<_>>();
            let box_scores = rows
                .iter()
                .map(|(match_id, _, played)| minutes(*match_id, 7, *played))
                .collect::<Vec<_>>();
            let policy = if by_minutes {
                PlayedPolicy::MinutesRecorded
            } else {
                PlayedPolicy::AcceptedCallUp
            };

            let stats = call_up_stats(7, &matches, &call_ups, &box_scores, policy);
            prop_assert!(stats.played <= stats.called_up);
            prop_assert!(stats.issued() <= stats.total_matches);
            prop_assert!((0.0..=100.0).contains(&stats.call_up_rate));
        }
    }
}
