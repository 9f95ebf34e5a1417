use super::attendance::{attendance_stats, AttendanceStats};
use super::jersey_order;
use crate::store::records::{PlayerId, TeamSnapshot};
use crate::store::scope::Scope;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRow {
    pub player_id: PlayerId,
    pub name: String,
    pub jersey_number: Option<u16>,
    pub stats: AttendanceStats,
    pub unexcused_rate: f64,
}

/// Attendance of every active player, most presences first.
pub fn attendance_board(snapshot: &TeamSnapshot, scope: &Scope<'_>) -> Vec<AttendanceRow> {
    let mut rows = snapshot
        .active_players()
        .map(|player| {
            let stats = attendance_stats(player.id, scope.sessions.iter().copied());
            AttendanceRow {
                player_id: player.id,
                name: player.full_name(),
                jersey_number: player.jersey_number,
                unexcused_rate: stats.unexcused_rate(),
                stats,
            }
        })
        .collect::<Vec<_>>();

    rows.sort_by(|a, b| {
        b.stats
            .present
            .cmp(&a.stats.present)
            .then_with(|| jersey_order(a.jersey_number).cmp(&jersey_order(b.jersey_number)))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::scope::{ScopeFilter, Window};
    use chrono::NaiveDate;

    fn snapshot() -> TeamSnapshot {
        serde_json::from_str(
            r#"{
                "players": [
                    {"id": 1, "first_name": "Anna", "last_name": "Galli", "jersey_number": 9},
                    {"id": 2, "first_name": "Bea", "last_name": "Conti", "jersey_number": 5},
                    {"id": 3, "first_name": "Cleo", "last_name": "Sala"},
                    {"id": 4, "first_name": "Dora", "last_name": "Fini", "active": false}
                ],
                "sessions": [
                    {"id": 1, "date": "2026-10-12", "present": [1, 2, 4], "excused_absent": [3]},
                    {"id": 2, "date": "2026-10-14", "present": [1, 2]},
                    {"id": 3, "date": "2026-10-21", "present": [3]}
                ]
            }"#,
        )
        .expect("snapshot should parse")
    }

    #[test]
    fn board_orders_by_presences_then_jersey() {
        let snapshot = snapshot();
        let scope = Scope::resolve(&snapshot, &ScopeFilter::default());
        let rows = attendance_board(&snapshot, &scope);

        let order = rows.iter().map(|row| row.player_id).collect::<Vec<_>>();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(rows[2].stats.present, 1);
        assert_eq!(rows[2].stats.excused_absent, 1);
    }

    #[test]
    fn board_respects_week_window() {
        let snapshot = snapshot();
        let filter = ScopeFilter {
            window: Window::Week(NaiveDate::from_ymd_opt(2026, 10, 12).expect("valid date")),
            category: None,
        };
        let scope = Scope::resolve(&snapshot, &filter);
        let rows = attendance_board(&snapshot, &scope);

        let cleo = rows
            .iter()
            .find(|row| row.player_id == 3)
            .expect("cleo should be listed");
        assert_eq!(cleo.stats.total_sessions, 2);
        assert_eq!(cleo.stats.present, 0);
        assert_eq!(cleo.stats.unexcused_absent, 1);
        assert_eq!(cleo.unexcused_rate, 50.0);
    }
}
