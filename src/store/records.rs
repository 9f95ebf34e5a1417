use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type PlayerId = u32;
pub type MatchId = u32;
pub type SessionId = u32;

/// Full team state as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub sessions: Vec<TrainingSession>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub call_ups: Vec<CallUp>,
    #[serde(default)]
    pub stats: Vec<PlayerMatchStat>,
}

impl TeamSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.active)
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|game| game.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub eligible: bool,
    #[serde(
        default,
        with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligibility_expires: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: SessionId,
    pub date: NaiveDate,
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub present: PresenceList,
    #[serde(default)]
    pub excused_absent: PresenceList,
}

/// Player ids attached to a session. Older exports stored the list as a
/// JSON-encoded string; anything else is kept verbatim and rejected on use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresenceList {
    Ids(Vec<PlayerId>),
    Encoded(String),
    Malformed(serde_json::Value),
}

impl Default for PresenceList {
    fn default() -> Self {
        Self::Ids(Vec::new())
    }
}

impl From<Vec<PlayerId>> for PresenceList {
    fn from(ids: Vec<PlayerId>) -> Self {
        Self::Ids(ids)
    }
}

impl PresenceList {
    pub fn resolve(&self) -> Result<BTreeSet<PlayerId>, String> {
        match self {
            Self::Ids(ids) => Ok(ids.iter().copied().collect()),
            Self::Encoded(raw) if raw.trim().is_empty() => Ok(BTreeSet::new()),
            Self::Encoded(raw) => serde_json::from_str::<Vec<PlayerId>>(raw)
                .map(|ids| ids.into_iter().collect())
                .map_err(|error| format!("encoded presence list {raw:?}: {error}")),
            Self::Malformed(serde_json::Value::Null) => Ok(BTreeSet::new()),
            Self::Malformed(value) => Err(format!("unexpected presence value: {value}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    PreSeason,
    #[default]
    RegularSeason,
    PostSeason,
    Tournament,
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PreSeason => "pre-season",
            Self::RegularSeason => "regular season",
            Self::PostSeason => "post-season",
            Self::Tournament => "tournament",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub date: NaiveDate,
    #[serde(default, with = "clock_time", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub opponent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_home")]
    pub home: bool,
    #[serde(default)]
    pub category: MatchCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub our_score: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_score: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_home() -> bool {
    true
}

/// A player selected for a match roster. `declined` marks a refused call-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallUp {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub starter: bool,
    #[serde(default)]
    pub declined: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerMatchStat {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub rating: i32,
    pub plus_minus: i32,
    pub minutes_played: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub turnovers: u32,
    pub blocks: u32,
    pub fouls: u32,
    pub free_throws_attempted: u32,
    pub free_throws_made: u32,
    pub twos_attempted: u32,
    pub twos_made: u32,
    pub threes_attempted: u32,
    pub threes_made: u32,
}

impl PlayerMatchStat {
    /// All-zero rows are placeholders, not a recorded performance.
    pub fn is_meaningful(&self) -> bool {
        self.rating != 0 || self.plus_minus != 0
    }

    pub fn free_throw_pct(&self) -> f64 {
        shooting_pct(self.free_throws_made, self.free_throws_attempted)
    }

    pub fn two_point_pct(&self) -> f64 {
        shooting_pct(self.twos_made, self.twos_attempted)
    }

    pub fn three_point_pct(&self) -> f64 {
        shooting_pct(self.threes_made, self.threes_attempted)
    }
}

fn shooting_pct(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    f64::from(made) * 100.0 / f64::from(attempted)
}

/// Accepts ISO dates and the day-first form used on medical certificates.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw.map(|value| value.trim().to_string()) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&raw, format).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognised date: {raw}")))
    }
}

mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw.map(|value| value.trim().to_string()) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(&raw, format).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognised time: {raw}")))
    }
}
