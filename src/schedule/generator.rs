use log::{debug, info};

use crate::league::{LeagueError, LeagueId, ScheduledMatch};
use super::pairing::build_pairings;
use super::slot_utils::calculate_time_slots;
use super::types::{Pairing, ScheduleRequest, Slot};

/// Assigns the i-th pairing to the i-th slot.
/// Fails when there are fewer slots than pairings.
pub fn assemble_matches(
    league_id: LeagueId,
    pairings: &[Pairing<'_>],
    slots: &[Slot],
) -> Result<Vec<ScheduledMatch>, LeagueError> {
    if slots.len() < pairings.len() {
        return Err(LeagueError::InsufficientSlots {
            slots: slots.len(),
            matches: pairings.len(),
        });
    }

    let matches: Vec<ScheduledMatch> = pairings
        .iter()
        .zip(slots)
        .map(|(pairing, slot)| ScheduledMatch {
            league_id,
            round: pairing.round,
            home_team: pairing.home.clone(),
            away_team: pairing.away.clone(),
            court: slot.court.clone(),
            start: slot.start,
            end: slot.end,
        })
        .collect();

    debug!(
        "League {}: {} of {} slots used",
        league_id,
        matches.len(),
        slots.len()
    );

    Ok(matches)
}

/// Generates the full round-robin calendar for a league
pub fn generate_schedule(request: &ScheduleRequest) -> Result<Vec<ScheduledMatch>, LeagueError> {
    if request.league_id <= 0 {
        return Err(LeagueError::invalid(format!(
            "league id must be positive, got {}",
            request.league_id
        )));
    }

    let pairings = build_pairings(&request.teams)?;
    let slots = calculate_time_slots(
        request.start_date,
        request.end_date,
        &request.courts,
        &request.hours,
        request.match_duration,
    )?;
    let matches = assemble_matches(request.league_id, &pairings, &slots)?;

    info!(
        "Scheduled {} matches for league {} ({} teams, {} courts)",
        matches.len(),
        request.league_id,
        request.teams.len(),
        request.courts.len()
    );

    Ok(matches)
}
