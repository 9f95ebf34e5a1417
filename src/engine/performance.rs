use crate::store::records::{PlayerId, PlayerMatchStat};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceStats {
    /// Box-score rows with a non-zero rating or plus/minus.
    pub records: u32,
    /// Rows that carry a positive rating.
    pub rated: u32,
    pub mean_rating: f64,
    pub mean_plus_minus: f64,
    pub plus_minus_total: i64,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    /// Shooting over every row of the player, placeholders included.
    pub free_throw_pct: f64,
    pub two_point_pct: f64,
    pub three_point_pct: f64,
}

impl PerformanceStats {
    pub fn has_data(&self) -> bool {
        self.records > 0
    }
}

pub fn performance_stats<'a>(
    player: PlayerId,
    stats: impl IntoIterator<Item = &'a PlayerMatchStat>,
) -> PerformanceStats {
    let mut result = PerformanceStats::default();
    let mut rating_sum: i64 = 0;
    let mut totals = PlayerMatchStat::default();

    for stat in stats {
        if stat.player_id != player {
            continue;
        }
        accumulate(&mut totals, stat);
        if !stat.is_meaningful() {
            continue;
        }
        result.records += 1;
        result.plus_minus_total += i64::from(stat.plus_minus);
        if stat.rating > 0 {
            result.rated += 1;
            rating_sum += i64::from(stat.rating);
        }
    }

    if result.rated > 0 {
        result.mean_rating = rating_sum as f64 / f64::from(result.rated);
    }
    if result.records > 0 {
        result.mean_plus_minus = result.plus_minus_total as f64 / f64::from(result.records);
    }
    result.points = totals.points;
    result.rebounds = totals.rebounds;
    result.assists = totals.assists;
    result.free_throw_pct = totals.free_throw_pct();
    result.two_point_pct = totals.two_point_pct();
    result.three_point_pct = totals.three_point_pct();
    result
}

fn accumulate(totals: &mut PlayerMatchStat, stat: &PlayerMatchStat) {
    totals.points += stat.points;
    totals.rebounds += stat.rebounds;
    totals.assists += stat.assists;
    totals.free_throws_attempted += stat.free_throws_attempted;
    totals.free_throws_made += stat.free_throws_made;
    totals.twos_attempted += stat.twos_attempted;
    totals.twos_made += stat.twos_made;
    totals.threes_attempted += stat.threes_attempted;
    totals.threes_made += stat.threes_made;
}
