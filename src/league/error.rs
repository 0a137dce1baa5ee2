use serde::Serialize;
use thiserror::Error;

use super::types::{LeagueId, MatchId, TeamId};

/// Broad class of a league error, used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    Capacity,
    Format,
    DataConsistency,
    DomainRule,
    NotFound,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No available time slots in the given date range")]
    NoAvailableSlots,

    #[error("Not enough time slots: {slots} slots for {matches} matches")]
    InsufficientSlots { slots: usize, matches: usize },

    #[error("Invalid operating hours for weekday {weekday}: '{value}'")]
    InvalidHours { weekday: u8, value: String },

    #[error("Missing scores for match {match_id}")]
    MissingScores { match_id: MatchId },

    #[error("Match {match_id} does not include team {team_id}")]
    TeamNotInMatch { team_id: TeamId, match_id: MatchId },

    #[error("Match {match_id} is tied; ties are not supported")]
    TiedMatch { match_id: MatchId },

    #[error("League {0} not found")]
    LeagueNotFound(LeagueId),

    #[error("Match {match_id} not found in league {league_id}")]
    MatchNotFound { league_id: LeagueId, match_id: MatchId },
}

impl LeagueError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LeagueError::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LeagueError::NoAvailableSlots | LeagueError::InsufficientSlots { .. } => {
                ErrorKind::Capacity
            }
            LeagueError::InvalidHours { .. } => ErrorKind::Format,
            LeagueError::MissingScores { .. } | LeagueError::TeamNotInMatch { .. } => {
                ErrorKind::DataConsistency
            }
            LeagueError::TiedMatch { .. } => ErrorKind::DomainRule,
            LeagueError::LeagueNotFound(_) | LeagueError::MatchNotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_reports_both_counts() {
        let err = LeagueError::InsufficientSlots { slots: 2, matches: 6 };
        assert_eq!(err.kind(), ErrorKind::Capacity);
        let message = err.to_string();
        assert!(message.contains('2') && message.contains('6'));
    }

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(LeagueError::invalid("x").kind(), ErrorKind::InvalidArgument);
        assert_eq!(LeagueError::NoAvailableSlots.kind(), ErrorKind::Capacity);
        assert_eq!(
            LeagueError::InvalidHours { weekday: 3, value: "noon".into() }.kind(),
            ErrorKind::Format
        );
        assert_eq!(LeagueError::MissingScores { match_id: 1 }.kind(), ErrorKind::DataConsistency);
        assert_eq!(
            LeagueError::TeamNotInMatch { team_id: 1, match_id: 2 }.kind(),
            ErrorKind::DataConsistency
        );
        assert_eq!(LeagueError::TiedMatch { match_id: 4 }.kind(), ErrorKind::DomainRule);
        assert_eq!(LeagueError::LeagueNotFound(9).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn tie_message_names_rule() {
        let err = LeagueError::TiedMatch { match_id: 12 };
        assert_eq!(err.to_string(), "Match 12 is tied; ties are not supported");
    }
}
