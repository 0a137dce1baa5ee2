use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::league::{LeagueError, LeagueId, MatchId, MatchResultRow, ScheduledMatch, Team};
use crate::schedule::{generate_schedule, ScheduleRequest};
use crate::standings::MatchResultSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub home: i32,
    pub away: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredMatch {
    pub match_id: MatchId,
    #[serde(flatten)]
    pub fixture: ScheduledMatch,
    pub score: Option<MatchScore>,
}

impl StoredMatch {
    fn involves(&self, team: &Team) -> bool {
        self.fixture.home_team.id == team.id || self.fixture.away_team.id == team.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueRecord {
    pub league_id: LeagueId,
    pub teams: Vec<Team>,
    pub matches: Vec<StoredMatch>,
}

/// In-memory league storage (in production, use a database)
#[derive(Debug, Default)]
pub struct LeagueStore {
    leagues: HashMap<LeagueId, LeagueRecord>,
}

impl LeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the schedule for a new league and keeps it.
    /// Match ids are assigned in schedule order, starting at 1.
    pub fn create_league(&mut self, request: &ScheduleRequest) -> Result<&LeagueRecord, LeagueError> {
        if self.leagues.contains_key(&request.league_id) {
            return Err(LeagueError::invalid(format!(
                "league {} already exists",
                request.league_id
            )));
        }

        let fixtures = generate_schedule(request)?;
        let matches = fixtures
            .into_iter()
            .enumerate()
            .map(|(index, fixture)| StoredMatch {
                match_id: index as MatchId + 1,
                fixture,
                score: None,
            })
            .collect();

        let record = LeagueRecord {
            league_id: request.league_id,
            teams: request.teams.clone(),
            matches,
        };
        Ok(self.leagues.entry(request.league_id).or_insert(record))
    }

    pub fn league(&self, league_id: LeagueId) -> Result<&LeagueRecord, LeagueError> {
        self.leagues
            .get(&league_id)
            .ok_or(LeagueError::LeagueNotFound(league_id))
    }

    /// Stores the final score of a match. Ties are rejected.
    pub fn record_result(
        &mut self,
        league_id: LeagueId,
        match_id: MatchId,
        score: MatchScore,
    ) -> Result<&StoredMatch, LeagueError> {
        if score.home < 0 || score.away < 0 {
            return Err(LeagueError::invalid("scores cannot be negative"));
        }
        if score.home == score.away {
            return Err(LeagueError::TiedMatch { match_id });
        }

        let record = self
            .leagues
            .get_mut(&league_id)
            .ok_or(LeagueError::LeagueNotFound(league_id))?;
        let stored = record
            .matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
            .ok_or(LeagueError::MatchNotFound { league_id, match_id })?;

        stored.score = Some(score);
        info!(
            "League {}: match {} finished {}-{}",
            league_id, match_id, score.home, score.away
        );
        Ok(stored)
    }
}

impl MatchResultSource for LeagueStore {
    fn match_rows(&self, league_id: LeagueId) -> Result<Vec<MatchResultRow>, LeagueError> {
        let record = self.league(league_id)?;
        let mut rows = Vec::new();

        for team in &record.teams {
            let before = rows.len();
            for stored in record.matches.iter().filter(|m| m.involves(team)) {
                if let Some(score) = stored.score {
                    rows.push(MatchResultRow::completed(
                        team,
                        stored.match_id,
                        stored.fixture.home_team.id,
                        stored.fixture.away_team.id,
                        score.home,
                        score.away,
                    ));
                }
            }
            if rows.len() == before {
                rows.push(MatchResultRow::unplayed(team.id, team.name.clone()));
            }
        }

        Ok(rows)
    }
}
