pub mod types;
pub mod error;

pub use types::{
    Court, CourtId, DayHours, HourValue, LeagueId, MatchId, MatchResultRow, OperatingHours,
    ScheduledMatch, Team, TeamId, TeamStanding,
};
pub use error::{ErrorKind, LeagueError};
