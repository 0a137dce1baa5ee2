use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::league::{Court, LeagueId, OperatingHours, Team};

/// A home/away pairing within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing<'a> {
    pub round: u32,
    pub home: &'a Team,
    pub away: &'a Team,
}

/// A bookable time window on one court
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub court: Court,
}

/// Everything needed to generate a league calendar
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub league_id: LeagueId,
    pub teams: Vec<Team>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub courts: Vec<Court>,
    pub hours: OperatingHours,
    pub match_duration: Duration,
}
