pub mod config;
pub mod display;
pub mod league;
pub mod parser;
pub mod schedule;
pub mod standings;
pub mod store;
pub mod web;

pub use league::{
    Court, DayHours, ErrorKind, HourValue, LeagueError, MatchResultRow, OperatingHours,
    ScheduledMatch, Team, TeamStanding,
};
pub use schedule::{generate_schedule, ScheduleRequest};
pub use standings::{aggregate_standings, league_standings, MatchResultSource};
