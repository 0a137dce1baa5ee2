use std::collections::{HashMap, HashSet};

use log::warn;

use crate::league::{LeagueError, MatchId, MatchResultRow, TeamId, TeamStanding};

/// Running totals for one team, including head-to-head records keyed by opponent
#[derive(Debug, Clone, Default)]
pub struct TeamStats {
    pub standing: TeamStanding,
    pub head_to_head_wins: HashMap<TeamId, u32>,
    pub head_to_head_differential: HashMap<TeamId, i64>,
}

impl TeamStats {
    fn new(team_id: TeamId, team_name: &str) -> Self {
        TeamStats {
            standing: TeamStanding {
                team_id,
                team_name: team_name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Wins against any of the given opponents
    pub fn wins_against(&self, opponents: &HashSet<TeamId>) -> u32 {
        self.head_to_head_wins
            .iter()
            .filter(|(opponent, _)| opponents.contains(opponent))
            .map(|(_, wins)| *wins)
            .sum()
    }

    /// Point differential accumulated against any of the given opponents
    pub fn differential_against(&self, opponents: &HashSet<TeamId>) -> i64 {
        self.head_to_head_differential
            .iter()
            .filter(|(opponent, _)| opponents.contains(opponent))
            .map(|(_, diff)| *diff)
            .sum()
    }

    fn record(&mut self, opponent: TeamId, own_score: i32, opponent_score: i32) {
        let standing = &mut self.standing;
        standing.matches_played += 1;
        standing.points_for += own_score as i64;
        standing.points_against += opponent_score as i64;
        standing.point_differential = standing.points_for - standing.points_against;

        if own_score > opponent_score {
            standing.wins += 1;
            *self.head_to_head_wins.entry(opponent).or_insert(0) += 1;
        } else {
            standing.losses += 1;
        }

        *self.head_to_head_differential.entry(opponent).or_insert(0) +=
            own_score as i64 - opponent_score as i64;
    }
}

struct CompletedMatch {
    match_id: MatchId,
    home_team_id: TeamId,
    away_team_id: TeamId,
    home_score: i32,
    away_score: i32,
}

fn completed_match(row: &MatchResultRow, match_id: MatchId) -> Result<CompletedMatch, LeagueError> {
    match (row.home_team_id, row.away_team_id, row.home_score, row.away_score) {
        (Some(home_team_id), Some(away_team_id), Some(home_score), Some(away_score)) => Ok(CompletedMatch {
            match_id,
            home_team_id,
            away_team_id,
            home_score,
            away_score,
        }),
        _ => Err(LeagueError::MissingScores { match_id }),
    }
}

/// Accumulates per-team statistics from match rows.
///
/// Every distinct team id gets an entry, in order of first appearance, even
/// when it has no completed match. Each row only updates its own team.
pub fn tally_results(rows: &[MatchResultRow]) -> Result<Vec<TeamStats>, LeagueError> {
    let mut order: Vec<TeamId> = Vec::new();
    let mut stats: HashMap<TeamId, TeamStats> = HashMap::new();
    let mut counted: HashSet<(TeamId, MatchId)> = HashSet::new();

    for row in rows {
        let entry = stats.entry(row.team_id).or_insert_with(|| {
            order.push(row.team_id);
            TeamStats::new(row.team_id, &row.team_name)
        });

        let Some(match_id) = row.match_id else {
            continue;
        };

        let game = completed_match(row, match_id)?;
        if game.home_team_id == game.away_team_id {
            return Err(LeagueError::invalid(format!(
                "match {} lists team {} as both home and away",
                game.match_id, game.home_team_id
            )));
        }

        let (own_score, opponent, opponent_score) = if game.home_team_id == row.team_id {
            (game.home_score, game.away_team_id, game.away_score)
        } else if game.away_team_id == row.team_id {
            (game.away_score, game.home_team_id, game.home_score)
        } else {
            return Err(LeagueError::TeamNotInMatch {
                team_id: row.team_id,
                match_id: game.match_id,
            });
        };

        if own_score == opponent_score {
            return Err(LeagueError::TiedMatch { match_id: game.match_id });
        }

        if !counted.insert((row.team_id, game.match_id)) {
            warn!("Ignoring repeated row for team {} in match {}", row.team_id, game.match_id);
            continue;
        }

        entry.record(opponent, own_score, opponent_score);
    }

    Ok(order
        .into_iter()
        .filter_map(|team_id| stats.remove(&team_id))
        .collect())
}
