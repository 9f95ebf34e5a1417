use crate::engine::board::AttendanceRow;
use crate::engine::{PlayerEvaluation, TeamSummary};
use crate::roster::RosterEntry;
use crate::store::records::SessionId;
use crate::store::scope::ScopeFilter;
use crate::types::scoring::PlayedPolicy;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
}

impl Finding {
    pub fn warning(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: false,
        }
    }

    pub fn blocking(id: &str, title: &str, body: String) -> Self {
        Self {
            blocking: true,
            ..Self::warning(id, title, body)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingReport {
    pub team: String,
    pub generated_at: String,
    pub scope: String,
    pub played_policy: PlayedPolicy,
    pub evaluations: Vec<PlayerEvaluation>,
}

impl RatingReport {
    pub fn new(
        team: &str,
        scope: &ScopeFilter,
        played_policy: PlayedPolicy,
        evaluations: Vec<PlayerEvaluation>,
    ) -> Self {
        Self {
            team: team.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            scope: scope.to_string(),
            played_policy,
            evaluations,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub scope: String,
    pub summary: TeamSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub team: String,
    pub scope: String,
    pub rows: Vec<AttendanceRow>,
    pub skipped_sessions: Vec<SessionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub team: String,
    pub as_of: NaiveDate,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Ratings(&'a RatingReport),
    Team(&'a TeamReport),
    Attendance(&'a AttendanceReport),
    Roster(&'a RosterReport),
}
