use std::collections::BTreeMap;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub type LeagueId = i64;
pub type TeamId = i64;
pub type CourtId = i64;
pub type MatchId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Team { id, name: name.into() }
    }
}

/// One physical playable surface at a facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
}

impl Court {
    pub fn new(id: CourtId, name: impl Into<String>) -> Self {
        Court { id, name: name.into() }
    }
}

/// Opening and closing time of one weekday, as strings in one of the accepted formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        DayHours { open: open.into(), close: close.into() }
    }

    /// Builds the hours of a day from stored values; a missing side means the day is closed
    pub fn from_values(open: &HourValue, close: &HourValue) -> Option<Self> {
        Some(DayHours {
            open: open.to_hour_string()?,
            close: close.to_hour_string()?,
        })
    }
}

/// How an opening or closing value is kept by the storage layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HourValue {
    Time(NaiveTime),
    Text(String),
    Missing,
}

impl HourValue {
    /// Formats the stored value into the string the slot allocator parses
    pub fn to_hour_string(&self) -> Option<String> {
        match self {
            HourValue::Time(time) => Some(time.format("%H:%M").to_string()),
            HourValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            HourValue::Missing => None,
        }
    }
}

/// Weekly opening hours keyed by weekday (0 = Sunday .. 6 = Saturday).
/// A weekday without an entry is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatingHours {
    days: BTreeMap<u8, DayHours>,
}

impl OperatingHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, weekday: u8, hours: DayHours) {
        self.days.insert(weekday, hours);
    }

    pub fn with_day(mut self, weekday: u8, open: &str, close: &str) -> Self {
        self.insert(weekday, DayHours::new(open, close));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &DayHours)> {
        self.days.iter().map(|(day, hours)| (*day, hours))
    }
}

/// A fixture with its court and time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub league_id: LeagueId,
    pub round: u32,
    pub home_team: Team,
    pub away_team: Team,
    pub court: Court,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One team's view of one match. Rows for matches that have not been played
/// (or teams without any match) leave the match fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResultRow {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default)]
    pub home_team_id: Option<TeamId>,
    #[serde(default)]
    pub away_team_id: Option<TeamId>,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
}

impl MatchResultRow {
    /// Row for a team that has no completed match
    pub fn unplayed(team_id: TeamId, team_name: impl Into<String>) -> Self {
        MatchResultRow {
            team_id,
            team_name: team_name.into(),
            ..Default::default()
        }
    }

    pub fn completed(
        team: &Team,
        match_id: MatchId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        home_score: i32,
        away_score: i32,
    ) -> Self {
        MatchResultRow {
            team_id: team.id,
            team_name: team.name.clone(),
            match_id: Some(match_id),
            home_team_id: Some(home_team_id),
            away_team_id: Some(away_team_id),
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: i64,
    pub points_against: i64,
    pub point_differential: i64,
}
