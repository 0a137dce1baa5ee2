pub mod tally;
pub mod tiebreak;

pub use tally::{tally_results, TeamStats};
pub use tiebreak::rank_teams;

use crate::league::{LeagueError, LeagueId, MatchResultRow, TeamStanding};

/// Data-access collaborator that returns every result row of a league,
/// including a row for each team that has not played yet
pub trait MatchResultSource {
    fn match_rows(&self, league_id: LeagueId) -> Result<Vec<MatchResultRow>, LeagueError>;
}

/// Reduces match rows into the ranked standings table
pub fn aggregate_standings(rows: &[MatchResultRow]) -> Result<Vec<TeamStanding>, LeagueError> {
    let stats = tally_results(rows)?;
    Ok(rank_teams(stats))
}

/// Queries a league's rows from `source` and ranks them
pub fn league_standings<S: MatchResultSource + ?Sized>(
    source: &S,
    league_id: LeagueId,
) -> Result<Vec<TeamStanding>, LeagueError> {
    let rows = source.match_rows(league_id)?;
    aggregate_standings(&rows)
}
