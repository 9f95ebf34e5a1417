use serde::{Deserialize, Serialize};

pub type Score = f64;

/// How an accepted call-up turns into a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayedPolicy {
    /// Every call-up that was not declined counts as played.
    #[default]
    AcceptedCallUp,
    /// An accepted call-up counts only when the box score records minutes on court.
    MinutesRecorded,
}

impl PlayedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AcceptedCallUp => "accepted_call_up",
            Self::MinutesRecorded => "minutes_recorded",
        }
    }
}
