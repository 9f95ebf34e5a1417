//! Weighted 0-10 player rating.
//!
//! Five banded sub-scores share a weight budget of 1.0. A small bonus rewards
//! justified absences and a flat penalty is taken for every declined call-up.

use super::attendance::{percent, AttendanceStats};
use super::callups::CallUpStats;
use super::performance::PerformanceStats;
use crate::types::scoring::Score;
use serde::Serialize;

pub const ATTENDANCE_WEIGHT: f64 = 0.25;
pub const CALL_UP_WEIGHT: f64 = 0.25;
pub const PLAYED_WEIGHT: f64 = 0.15;
pub const VAL_WEIGHT: f64 = 0.25;
pub const PLUS_MINUS_WEIGHT: f64 = 0.05;
pub const EXCUSED_BONUS_WEIGHT: f64 = 0.05;

pub const NEUTRAL_SCORE: Score = 6.0;
pub const NEUTRAL_PLUS_MINUS_SCORE: Score = 5.0;

pub const MIN_RATING: Score = 0.0;
pub const MAX_RATING: Score = 10.0;

const PENALTY_PER_DECLINE: Score = 0.5;
const MAX_DECLINE_PENALTY: Score = 3.0;
/// Excused-absence share (in percent) that earns the full bonus.
const FULL_BONUS_EXCUSED_PCT: f64 = 15.0;

/// `(lower bound, score)` pairs, highest first. Bounds are inclusive.
type Bands = [(f64, Score)];

const ATTENDANCE_BANDS: &Bands = &[
    (90.0, 10.0),
    (80.0, 8.5),
    (70.0, 7.0),
    (60.0, 5.5),
    (50.0, 4.0),
    (30.0, 2.5),
];
const CALL_UP_BANDS: &Bands = &[
    (80.0, 10.0),
    (70.0, 8.5),
    (60.0, 7.0),
    (50.0, 5.5),
    (40.0, 4.0),
    (20.0, 2.5),
];
const PLAYED_BANDS: &Bands = &[(90.0, 10.0), (80.0, 8.0), (70.0, 6.5), (50.0, 5.0)];
const VAL_BANDS: &Bands = &[
    (25.0, 10.0),
    (20.0, 8.5),
    (15.0, 7.0),
    (10.0, 5.5),
    (5.0, 4.0),
];
const PLUS_MINUS_BANDS: &Bands = &[
    (10.0, 10.0),
    (5.0, 8.0),
    (0.0, 6.0),
    (-5.0, 4.0),
    (-10.0, 2.0),
];

fn band(value: f64, bands: &Bands, floor: Score) -> Score {
    bands
        .iter()
        .find(|(lower, _)| value >= *lower)
        .map_or(floor, |(_, score)| *score)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rating {
    pub attendance: Score,
    pub call_ups: Score,
    pub played: Score,
    pub val: Score,
    pub plus_minus: Score,
    pub excused_bonus: Score,
    pub decline_penalty: Score,
    pub score: Score,
}

pub fn attendance_score(attendance_rate: f64) -> Score {
    band(attendance_rate, ATTENDANCE_BANDS, 1.0)
}

pub fn call_up_score(call_ups: &CallUpStats) -> Score {
    if call_ups.total_matches == 0 {
        return NEUTRAL_SCORE;
    }
    band(call_ups.call_up_rate, CALL_UP_BANDS, 1.0)
}

/// Share of issued call-ups that ended on the court. Neutral until at least
/// one call-up was accepted.
pub fn played_score(call_ups: &CallUpStats) -> Score {
    if call_ups.called_up == 0 {
        return NEUTRAL_SCORE;
    }
    band(percent(call_ups.played, call_ups.issued()), PLAYED_BANDS, 3.0)
}

pub fn val_score(performance: &PerformanceStats) -> Score {
    if !performance.has_data() {
        return NEUTRAL_SCORE;
    }
    let floor = if performance.mean_rating > 0.0 { 2.5 } else { 1.0 };
    band(performance.mean_rating, VAL_BANDS, floor)
}

pub fn plus_minus_score(performance: &PerformanceStats) -> Score {
    if !performance.has_data() {
        return NEUTRAL_PLUS_MINUS_SCORE;
    }
    band(performance.mean_plus_minus, PLUS_MINUS_BANDS, 0.0)
}

/// Bonus in `[0, 1]`, before weighting.
pub fn excused_bonus(attendance: &AttendanceStats) -> Score {
    if attendance.total_sessions == 0 {
        return 0.0;
    }
    (attendance.excused_rate() / FULL_BONUS_EXCUSED_PCT).min(1.0)
}

pub fn decline_penalty(declined: u32) -> Score {
    (f64::from(declined) * PENALTY_PER_DECLINE).min(MAX_DECLINE_PENALTY)
}

pub fn rate(
    attendance: &AttendanceStats,
    call_ups: &CallUpStats,
    performance: &PerformanceStats,
) -> Rating {
    let attendance_sub = attendance_score(attendance.attendance_rate);
    let call_up_sub = call_up_score(call_ups);
    let played_sub = played_score(call_ups);
    let val_sub = val_score(performance);
    let plus_minus_sub = plus_minus_score(performance);
    let bonus = excused_bonus(attendance);
    let penalty = decline_penalty(call_ups.declined);

    let raw = attendance_sub * ATTENDANCE_WEIGHT
        + call_up_sub * CALL_UP_WEIGHT
        + played_sub * PLAYED_WEIGHT
        + val_sub * VAL_WEIGHT
        + plus_minus_sub * PLUS_MINUS_WEIGHT
        + bonus * EXCUSED_BONUS_WEIGHT
        - penalty;

    Rating {
        attendance: attendance_sub,
        call_ups: call_up_sub,
        played: played_sub,
        val: val_sub,
        plus_minus: plus_minus_sub,
        excused_bonus: bonus,
        decline_penalty: penalty,
        score: raw.clamp(MIN_RATING, MAX_RATING),
    }
}
