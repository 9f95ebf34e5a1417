use crate::store::records::{PlayerId, TrainingSession};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total_sessions: u32,
    pub present: u32,
    pub excused_absent: u32,
    pub unexcused_absent: u32,
    /// Sessions whose presence lists could not be read; excluded from every bucket.
    pub skipped_sessions: u32,
    pub attendance_rate: f64,
}

impl AttendanceStats {
    pub fn excused_rate(&self) -> f64 {
        percent(self.excused_absent, self.total_sessions)
    }

    pub fn unexcused_rate(&self) -> f64 {
        percent(self.unexcused_absent, self.total_sessions)
    }
}

/// Sessions with unreadable presence lists only bump `skipped_sessions`;
/// they are reported once by `Scope::resolve`.
pub fn attendance_stats<'a>(
    player: PlayerId,
    sessions: impl IntoIterator<Item = &'a TrainingSession>,
) -> AttendanceStats {
    let mut stats = AttendanceStats::default();

    for session in sessions {
        let present = session.present.resolve();
        let excused = session.excused_absent.resolve();
        let (present, excused) = match (present, excused) {
            (Ok(present), Ok(excused)) => (present, excused),
            _ => {
                stats.skipped_sessions += 1;
                continue;
            }
        };

        stats.total_sessions += 1;
        if present.contains(&player) {
            stats.present += 1;
        } else if excused.contains(&player) {
            stats.excused_absent += 1;
        }
    }

    stats.unexcused_absent = stats.total_sessions - stats.present - stats.excused_absent;
    stats.attendance_rate = percent(stats.present, stats.total_sessions);
    stats
}

/// `part / whole * 100`, multiplied first so exact band edges stay exact.
pub(crate) fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    f64::from(part) * 100.0 / f64::from(whole)
}
