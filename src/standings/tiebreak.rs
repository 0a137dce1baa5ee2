use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::league::{TeamId, TeamStanding};
use super::tally::TeamStats;

/// Tiebreak keys of one team, computed against the other members of its block
struct BlockKey {
    block_wins: u32,
    point_differential: i64,
    block_differential: i64,
}

fn compare_in_block(a: &TeamStats, b: &TeamStats, keys: &HashMap<TeamId, BlockKey>) -> Ordering {
    let key_a = &keys[&a.standing.team_id];
    let key_b = &keys[&b.standing.team_id];

    key_b
        .block_wins
        .cmp(&key_a.block_wins)
        .then_with(|| key_b.point_differential.cmp(&key_a.point_differential))
        .then_with(|| key_b.block_differential.cmp(&key_a.block_differential))
        .then_with(|| a.standing.team_name.cmp(&b.standing.team_name))
        .then_with(|| a.standing.team_id.cmp(&b.standing.team_id))
}

fn resolve_block(block: &mut [TeamStats]) {
    let members: HashSet<TeamId> = block.iter().map(|t| t.standing.team_id).collect();
    let keys: HashMap<TeamId, BlockKey> = block
        .iter()
        .map(|team| {
            (
                team.standing.team_id,
                BlockKey {
                    block_wins: team.wins_against(&members),
                    point_differential: team.standing.point_differential,
                    block_differential: team.differential_against(&members),
                },
            )
        })
        .collect();

    block.sort_by(|a, b| compare_in_block(a, b, &keys));
}

/// Orders teams by wins, then breaks ties inside each group of equal wins.
///
/// Within a group: wins against the rest of the group, overall point
/// differential, point differential against the rest of the group, team name.
/// Teams from different win groups are never compared by these keys.
pub fn rank_teams(mut teams: Vec<TeamStats>) -> Vec<TeamStanding> {
    teams.sort_by_key(|team| Reverse(team.standing.wins));

    let mut start = 0;
    while start < teams.len() {
        let wins = teams[start].standing.wins;
        let end = teams[start..]
            .iter()
            .position(|team| team.standing.wins != wins)
            .map_or(teams.len(), |offset| start + offset);

        if end - start > 1 {
            debug!("Breaking a {}-way tie at {} wins", end - start, wins);
            resolve_block(&mut teams[start..end]);
        }
        start = end;
    }

    teams.into_iter().map(|team| team.standing).collect()
}
