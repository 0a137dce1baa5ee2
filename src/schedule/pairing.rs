use std::collections::HashSet;

use log::debug;

use crate::league::{LeagueError, Team};
use super::types::Pairing;

/// Builds the round-robin pairing sequence with the circle method.
///
/// Seat 0 stays fixed while the other seats rotate one step after every round.
/// With an odd number of teams an empty seat is added, and whoever faces it
/// sits the round out.
pub fn build_pairings(teams: &[Team]) -> Result<Vec<Pairing<'_>>, LeagueError> {
    if teams.len() < 2 {
        return Err(LeagueError::invalid("a league needs at least 2 teams"));
    }

    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.id) {
            return Err(LeagueError::invalid(format!("duplicate team id {}", team.id)));
        }
    }

    let mut seats: Vec<Option<&Team>> = teams.iter().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }

    let seat_count = seats.len();
    let mut pairings = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);

    for round_index in 0..seat_count - 1 {
        let round = round_index as u32 + 1;

        for i in 0..seat_count / 2 {
            let (first, second) = match (seats[i], seats[seat_count - 1 - i]) {
                (Some(first), Some(second)) => (first, second),
                _ => continue, // bye
            };

            // Seat 0 is away every second round
            let (home, away) = if i == 0 && round_index % 2 == 1 {
                (second, first)
            } else {
                (first, second)
            };
            pairings.push(Pairing { round, home, away });
        }

        seats[1..].rotate_right(1);
    }

    debug!(
        "Built {} pairings over {} rounds for {} teams",
        pairings.len(),
        seat_count - 1,
        teams.len()
    );

    Ok(pairings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    fn teams(n: i64) -> Vec<Team> {
        (1..=n).map(|id| Team::new(id, format!("Team {}", id))).collect()
    }

    fn unordered(p: &Pairing) -> (i64, i64) {
        (p.home.id.min(p.away.id), p.home.id.max(p.away.id))
    }

    #[test]
    fn every_pair_meets_exactly_once() {
        for n in 2..=11 {
            let teams = teams(n);
            let pairings = build_pairings(&teams).unwrap();
            let expected = (n * (n - 1) / 2) as usize;
            assert_eq!(pairings.len(), expected, "n = {}", n);

            let distinct: HashSet<(i64, i64)> = pairings.iter().map(unordered).collect();
            assert_eq!(distinct.len(), expected, "n = {}", n);
            assert!(pairings.iter().all(|p| p.home.id != p.away.id));
        }
    }

    #[test]
    fn no_team_plays_twice_in_a_round() {
        for n in 2..=10 {
            let teams = teams(n);
            let pairings = build_pairings(&teams).unwrap();
            let mut by_round: BTreeMap<u32, Vec<i64>> = BTreeMap::new();
            for p in &pairings {
                by_round.entry(p.round).or_default().extend([p.home.id, p.away.id]);
            }
            for (round, ids) in by_round {
                let unique: HashSet<_> = ids.iter().collect();
                assert_eq!(unique.len(), ids.len(), "n = {}, round {}", n, round);
            }
        }
    }

    #[test]
    fn odd_count_gives_one_bye_per_round() {
        for n in [3, 5, 7, 9] {
            let teams = teams(n);
            let pairings = build_pairings(&teams).unwrap();
            let rounds: HashSet<u32> = pairings.iter().map(|p| p.round).collect();
            assert_eq!(rounds.len() as i64, n);
            for round in rounds {
                let in_round = pairings.iter().filter(|p| p.round == round).count() as i64;
                assert_eq!(in_round, (n - 1) / 2);
            }
        }
    }

    #[test]
    fn even_count_uses_n_minus_one_rounds() {
        let teams = teams(6);
        let pairings = build_pairings(&teams).unwrap();
        assert_eq!(pairings.iter().map(|p| p.round).max(), Some(5));
        assert_eq!(pairings.first().map(|p| p.round), Some(1));
    }

    #[test]
    fn fixed_seat_swaps_home_on_even_rounds() {
        let teams = teams(4);
        let pairings = build_pairings(&teams).unwrap();

        // Round 1: seat 0 (team 1) hosts seat 3 (team 4)
        let first = pairings.iter().find(|p| p.round == 1).unwrap();
        assert_eq!((first.home.id, first.away.id), (1, 4));

        // After one rotation seat 3 holds team 3, and team 1 travels
        let second = pairings.iter().find(|p| p.round == 2).unwrap();
        assert_eq!((second.home.id, second.away.id), (3, 1));

        // Other seats keep the first-listed team at home
        let round_one: Vec<_> = pairings.iter().filter(|p| p.round == 1).collect();
        assert_eq!((round_one[1].home.id, round_one[1].away.id), (2, 3));
    }

    #[test]
    fn rotation_moves_last_seat_next_to_fixed_seat() {
        let teams = teams(4);
        let pairings = build_pairings(&teams).unwrap();
        let round_two: Vec<_> = pairings.iter().filter(|p| p.round == 2).map(unordered).collect();
        // seats after one rotation: [1, 4, 2, 3]
        assert_eq!(round_two, vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn rejects_fewer_than_two_teams() {
        assert!(matches!(build_pairings(&teams(1)), Err(LeagueError::InvalidArgument(_))));
        assert!(matches!(build_pairings(&[]), Err(LeagueError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_duplicate_team_ids() {
        let teams = vec![Team::new(1, "A"), Team::new(2, "B"), Team::new(1, "C")];
        assert!(matches!(build_pairings(&teams), Err(LeagueError::InvalidArgument(_))));
    }
}
