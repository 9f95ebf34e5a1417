use crate::types::report::Report;

pub fn to_json(report: Report<'_>) -> Result<String, serde_json::Error> {
    match report {
        Report::Ratings(ratings) => serde_json::to_string_pretty(ratings),
        Report::Team(team) => serde_json::to_string_pretty(team),
        Report::Attendance(attendance) => serde_json::to_string_pretty(attendance),
        Report::Roster(roster) => serde_json::to_string_pretty(roster),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TeamSummary;
    use crate::types::report::TeamReport;

    #[test]
    fn json_team_report_keeps_missing_average_as_null() {
        let report = TeamReport {
            team: "Lions".to_string(),
            scope: "all dates".to_string(),
            summary: TeamSummary {
                players_total: 0,
                players_rated: 0,
                average: None,
                best: None,
                lowest: None,
            },
        };

        let rendered = to_json(Report::Team(&report)).expect("json should serialize");
        assert!(rendered.contains("\"team\": \"Lions\""));
        assert!(rendered.contains("\"average\": null"));
    }
}
