use super::records::{
    CallUp, Match, MatchCategory, MatchId, PlayerMatchStat, SessionId, TeamSnapshot,
    TrainingSession,
};
use crate::error::{CourtsideError, Result};
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;

/// Calendar window applied to sessions and matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    All,
    /// Seven days starting at the given date.
    Week(NaiveDate),
    /// Inclusive on both ends.
    Range { from: NaiveDate, to: NaiveDate },
}

impl Window {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(CourtsideError::InvalidWindow(format!(
                "--from {from} is after --to {to}"
            )));
        }
        Ok(Self::Range { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::All => true,
            Self::Week(start) => {
                let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                start <= date && date <= end
            }
            Self::Range { from, to } => from <= date && date <= to,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all dates"),
            Self::Week(start) => write!(f, "week of {start}"),
            Self::Range { from, to } => write!(f, "{from} to {to}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeFilter {
    pub window: Window,
    pub category: Option<MatchCategory>,
}

impl ScopeFilter {
    pub fn is_unrestricted(&self) -> bool {
        self.window == Window::All && self.category.is_none()
    }
}

impl fmt::Display for ScopeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{}, {category} matches", self.window),
            None => write!(f, "{}", self.window),
        }
    }
}

/// Records of a snapshot that fall inside a [`ScopeFilter`].
#[derive(Debug, Clone, Default)]
pub struct Scope<'a> {
    pub sessions: Vec<&'a TrainingSession>,
    pub matches: Vec<&'a Match>,
    pub call_ups: Vec<&'a CallUp>,
    pub stats: Vec<&'a PlayerMatchStat>,
    /// In-scope sessions whose presence lists cannot be read. Aggregators skip them.
    pub malformed_sessions: Vec<SessionId>,
}

impl<'a> Scope<'a> {
    pub fn resolve(snapshot: &'a TeamSnapshot, filter: &ScopeFilter) -> Self {
        let sessions = snapshot
            .sessions
            .iter()
            .filter(|session| filter.window.contains(session.date))
            .collect::<Vec<_>>();
        let malformed_sessions = sessions
            .iter()
            .filter_map(|session| {
                let reason = session
                    .present
                    .resolve()
                    .and(session.excused_absent.resolve())
                    .err()?;
                tracing::warn!(
                    session = session.id,
                    %reason,
                    "skipping session with unreadable presence list"
                );
                Some(session.id)
            })
            .collect();
        let matches = snapshot
            .matches
            .iter()
            .filter(|game| filter.window.contains(game.date))
            .filter(|game| filter.category.map_or(true, |category| game.category == category))
            .collect::<Vec<_>>();
        let match_ids = matches.iter().map(|game| game.id).collect::<BTreeSet<MatchId>>();

        let call_ups = snapshot
            .call_ups
            .iter()
            .filter(|call_up| match_ids.contains(&call_up.match_id))
            .collect();
        let stats = if filter.is_unrestricted() {
            snapshot.stats.iter().collect()
        } else {
            snapshot
                .stats
                .iter()
                .filter(|stat| match_ids.contains(&stat.match_id))
                .collect()
        };

        Self {
            sessions,
            matches,
            call_ups,
            stats,
            malformed_sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::PresenceList;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn snapshot() -> TeamSnapshot {
        serde_json::from_str(
            r#"{
                "sessions": [
                    {"id": 1, "date": "2026-10-12"},
                    {"id": 2, "date": "2026-10-18"},
                    {"id": 3, "date": "2026-10-19"}
                ],
                "matches": [
                    {"id": 10, "date": "2026-10-14", "opponent": "A"},
                    {"id": 11, "date": "2026-10-25", "opponent": "B", "category": "tournament"}
                ],
                "call_ups": [
                    {"match_id": 10, "player_id": 1},
                    {"match_id": 11, "player_id": 1}
                ],
                "stats": [
                    {"player_id": 1, "match_id": 10, "rating": 12},
                    {"player_id": 1, "match_id": 11, "rating": 20},
                    {"player_id": 1, "match_id": 99, "rating": 5}
                ]
            }"#,
        )
        .expect("snapshot should parse")
    }

    #[test]
    fn week_window_covers_seven_days() {
        let window = Window::Week(date(2026, 10, 12));
        assert!(window.contains(date(2026, 10, 12)));
        assert!(window.contains(date(2026, 10, 18)));
        assert!(!window.contains(date(2026, 10, 19)));
        assert!(!window.contains(date(2026, 10, 11)));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = Window::range(date(2026, 10, 20), date(2026, 10, 1)).expect_err("should fail");
        assert!(err.to_string().contains("is after"));
        assert!(Window::range(date(2026, 10, 1), date(2026, 10, 1)).is_ok());
    }

    #[test]
    fn unrestricted_scope_keeps_orphan_stats() {
        let snapshot = snapshot();
        let scope = Scope::resolve(&snapshot, &ScopeFilter::default());
        assert_eq!(scope.sessions.len(), 3);
        assert_eq!(scope.matches.len(), 2);
        assert_eq!(scope.call_ups.len(), 2);
        assert_eq!(scope.stats.len(), 3);
        assert!(scope.malformed_sessions.is_empty());
    }

    #[test]
    fn unreadable_sessions_are_collected_once_per_scope() {
        let mut snapshot = snapshot();
        snapshot.sessions[0].present = PresenceList::Encoded("1,x".to_string());
        snapshot.sessions[2].excused_absent = PresenceList::Malformed(serde_json::json!(7));

        let scope = Scope::resolve(&snapshot, &ScopeFilter::default());
        assert_eq!(scope.sessions.len(), 3);
        assert_eq!(scope.malformed_sessions, vec![1, 3]);

        let filter = ScopeFilter {
            window: Window::Week(date(2026, 10, 12)),
            category: None,
        };
        let week = Scope::resolve(&snapshot, &filter);
        assert_eq!(week.malformed_sessions, vec![1]);
    }

    #[test]
    fn windowed_scope_filters_call_ups_and_stats_by_match() {
        let snapshot = snapshot();
        let filter = ScopeFilter {
            window: Window::Week(date(2026, 10, 12)),
            category: None,
        };
        let scope = Scope::resolve(&snapshot, &filter);
        assert_eq!(scope.sessions.len(), 2);
        assert_eq!(scope.matches.len(), 1);
        assert_eq!(scope.call_ups.len(), 1);
        assert_eq!(scope.stats.len(), 1);
        assert_eq!(scope.stats[0].match_id, 10);
    }

    #[test]
    fn category_filter_leaves_sessions_untouched() {
        let snapshot = snapshot();
        let filter = ScopeFilter {
            window: Window::All,
            category: Some(MatchCategory::Tournament),
        };
        let scope = Scope::resolve(&snapshot, &filter);
        assert_eq!(scope.sessions.len(), 3);
        assert_eq!(scope.matches.len(), 1);
        assert_eq!(scope.matches[0].id, 11);
        assert_eq!(scope.stats.len(), 1);
        assert_eq!(filter.to_string(), "all dates, tournament matches");
    }
}
