use crate::engine::{PlayerEvaluation, RatedPlayer};
use crate::types::config::Settings;
use crate::types::report::{AttendanceReport, RatingReport, Report, RosterReport, TeamReport};
use crate::types::scoring::Score;

/// Number formatting shared by the Markdown tables.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub decimals: usize,
    pub good_threshold: Score,
}

impl From<&Settings> for Style {
    fn from(settings: &Settings) -> Self {
        Self {
            decimals: settings.decimals,
            good_threshold: settings.good_threshold,
        }
    }
}

impl Style {
    fn num(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    fn mark(&self, score: Score) -> &'static str {
        if score >= self.good_threshold {
            "good"
        } else {
            "poor"
        }
    }
}

pub fn to_markdown(report: Report<'_>, style: &Style) -> String {
    match report {
        Report::Ratings(ratings) => ratings_markdown(ratings, style),
        Report::Team(team) => team_markdown(team, style),
        Report::Attendance(attendance) => attendance_markdown(attendance, style),
        Report::Roster(roster) => roster_markdown(roster),
    }
}

fn jersey(number: Option<u16>) -> String {
    number.map(|number| number.to_string()).unwrap_or_else(|| "-".to_string())
}

fn ratings_markdown(report: &RatingReport, style: &Style) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Player Ratings: {}\n\n", report.team));
    output.push_str(&format!(
        "Scope: {} (played policy: {})\n\n",
        report.scope,
        report.played_policy.as_str()
    ));

    if report.evaluations.is_empty() {
        output.push_str("- no active players\n");
        return output;
    }

    output.push_str("| # | Player | Score | | Attendance % | Call-ups | Played | Mean VAL | Mean +/- |\n");
    output.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for evaluation in &report.evaluations {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {}/{} | {} | {} | {} |\n",
            jersey(evaluation.jersey_number),
            evaluation.display_name(),
            style.num(evaluation.score()),
            style.mark(evaluation.score()),
            style.num(evaluation.attendance.attendance_rate),
            evaluation.call_ups.called_up,
            evaluation.call_ups.total_matches,
            evaluation.call_ups.played,
            style.num(evaluation.performance.mean_rating),
            style.num(evaluation.performance.mean_plus_minus),
        ));
    }

    if let [evaluation] = report.evaluations.as_slice() {
        output.push('\n');
        output.push_str(&breakdown_markdown(evaluation, style));
    }
    output
}

fn breakdown_markdown(evaluation: &PlayerEvaluation, style: &Style) -> String {
    let rating = &evaluation.rating;
    let attendance = &evaluation.attendance;
    let call_ups = &evaluation.call_ups;
    let performance = &evaluation.performance;

    let mut output = String::new();
    output.push_str(&format!("## Breakdown: {}\n\n", evaluation.display_name()));
    output.push_str(&format!(
        "- attendance: {} ({} present, {} excused, {} unexcused of {} sessions",
        style.num(rating.attendance),
        attendance.present,
        attendance.excused_absent,
        attendance.unexcused_absent,
        attendance.total_sessions
    ));
    if attendance.skipped_sessions > 0 {
        output.push_str(&format!("; {} skipped", attendance.skipped_sessions));
    }
    output.push_str(")\n");
    output.push_str(&format!(
        "- call-ups: {} ({} of {} matches, {} declined)\n",
        style.num(rating.call_ups),
        call_ups.called_up,
        call_ups.total_matches,
        call_ups.declined
    ));
    output.push_str(&format!(
        "- played: {} ({} played)\n",
        style.num(rating.played),
        call_ups.played
    ));
    output.push_str(&format!(
        "- val: {} ({} records, {} rated)\n",
        style.num(rating.val),
        performance.records,
        performance.rated
    ));
    output.push_str(&format!(
        "- plus/minus: {} (total {})\n",
        style.num(rating.plus_minus),
        performance.plus_minus_total
    ));
    output.push_str(&format!(
        "- box score: {} pts, {} reb, {} ast (FT {}%, 2P {}%, 3P {}%)\n",
        performance.points,
        performance.rebounds,
        performance.assists,
        style.num(performance.free_throw_pct),
        style.num(performance.two_point_pct),
        style.num(performance.three_point_pct)
    ));
    output.push_str(&format!(
        "- excused bonus: +{}\n- decline penalty: -{}\n",
        style.num(rating.excused_bonus),
        style.num(rating.decline_penalty)
    ));
    output.push_str(&format!(
        "\nFinal score: {} ({})\n",
        style.num(rating.score),
        style.mark(rating.score)
    ));
    output
}

fn team_markdown(report: &TeamReport, style: &Style) -> String {
    let summary = &report.summary;
    let rated = |player: &Option<RatedPlayer>| match player {
        Some(player) => format!("{} ({})", player.name, style.num(player.score)),
        None => "-".to_string(),
    };

    let mut output = String::new();
    output.push_str(&format!("# Team Summary: {}\n\n", report.team));
    output.push_str(&format!("Scope: {}\n\n", report.scope));
    output.push_str(&format!(
        "- players rated: {} of {}\n",
        summary.players_rated, summary.players_total
    ));
    match summary.average {
        Some(average) => output.push_str(&format!(
            "- average: {} ({})\n",
            style.num(average),
            style.mark(average)
        )),
        None => output.push_str("- average: n/a\n"),
    }
    output.push_str(&format!("- best: {}\n", rated(&summary.best)));
    output.push_str(&format!("- lowest: {}\n", rated(&summary.lowest)));
    output
}

fn attendance_markdown(report: &AttendanceReport, style: &Style) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Attendance: {}\n\n", report.team));
    output.push_str(&format!("Scope: {}\n\n", report.scope));
    if report.rows.is_empty() {
        output.push_str("- no active players\n");
        return output;
    }

    output.push_str("| # | Player | Present | Excused | Unexcused | Sessions | Present % | Unexcused % |\n");
    output.push_str("|---|---|---|---|---|---|---|---|\n");
    for row in &report.rows {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            jersey(row.jersey_number),
            row.name,
            row.stats.present,
            row.stats.excused_absent,
            row.stats.unexcused_absent,
            row.stats.total_sessions,
            style.num(row.stats.attendance_rate),
            style.num(row.unexcused_rate),
        ));
    }
    if !report.skipped_sessions.is_empty() {
        let ids = report
            .skipped_sessions
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("\nSkipped sessions with unreadable presence: {ids}\n"));
    }
    output
}

fn roster_markdown(report: &RosterReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Roster: {}\n\n", report.team));
    output.push_str(&format!("As of {}\n\n", report.as_of));
    if report.entries.is_empty() {
        output.push_str("- no players\n");
        return output;
    }

    output.push_str("| # | Player | Born | Eligibility | Expires | Active |\n");
    output.push_str("|---|---|---|---|---|---|\n");
    for entry in &report.entries {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            jersey(entry.jersey_number),
            entry.name,
            entry
                .birth_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "-".to_string()),
            entry.eligibility,
            entry
                .eligibility_expires
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if entry.active { "yes" } else { "no" },
        ));
    }
    output
}
