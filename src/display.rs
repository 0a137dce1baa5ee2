use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::league::{ScheduledMatch, TeamStanding};
use crate::schedule::format_time_of_day;

/// Formats a fixture as `Home vs Away`
pub fn format_fixture(fixture: &ScheduledMatch) -> String {
    format!("{} vs {}", fixture.home_team.name, fixture.away_team.name)
}

/// Formats a win/loss record, e.g. `5-2`
pub fn format_record(standing: &TeamStanding) -> String {
    format!("{}-{}", standing.wins, standing.losses)
}

fn format_differential(diff: i64) -> String {
    if diff > 0 {
        format!("+{}", diff)
    } else {
        diff.to_string()
    }
}

/// Renders the standings as a fixed-width table, one line per team
pub fn standings_lines(standings: &[TeamStanding]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>3}  {:<24} {:>3} {:>7} {:>6} {:>6} {:>6}",
        "#", "Team", "GP", "W-L", "PF", "PA", "DIFF"
    )];
    for (rank, standing) in standings.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<24} {:>3} {:>7} {:>6} {:>6} {:>6}",
            rank + 1,
            standing.team_name,
            standing.matches_played,
            format_record(standing),
            standing.points_for,
            standing.points_against,
            format_differential(standing.point_differential)
        ));
    }
    lines
}

/// Writes the schedule as CSV: round, date, start, end, court, home, away
pub fn write_schedule_to_file(
    matches: &[ScheduledMatch],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["round", "date", "start", "end", "court", "home", "away"])?;

    for fixture in matches {
        wtr.write_record([
            fixture.round.to_string(),
            fixture.start.date().to_string(),
            format_time_of_day(fixture.start.time()),
            format_time_of_day(fixture.end.time()),
            fixture.court.name.clone(),
            fixture.home_team.name.clone(),
            fixture.away_team.name.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the standings table to a text file
pub fn write_standings_to_file(
    title: &str,
    standings: &[TeamStanding],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;

    writeln!(file, "** {} **", title)?;
    for line in standings_lines(standings) {
        writeln!(file, "{}", line)?;
    }

    Ok(())
}

/// Prints a league schedule grouped by round
pub fn print_schedule(league_id: i64, matches: &[ScheduledMatch]) {
    println!("\n=== League {} Schedule ===", league_id);
    println!("Total matches scheduled: {}", matches.len());

    let mut current_round = 0;
    for fixture in matches {
        if fixture.round != current_round {
            current_round = fixture.round;
            println!("\nRound {}:", current_round);
        }
        println!(
            "  {} {}-{} [{}] {}",
            fixture.start.date(),
            format_time_of_day(fixture.start.time()),
            format_time_of_day(fixture.end.time()),
            fixture.court.name,
            format_fixture(fixture)
        );
    }
}

/// Prints the standings table
pub fn print_standings(title: &str, standings: &[TeamStanding]) {
    println!("\n=== {} ===", title);
    for line in standings_lines(standings) {
        println!("{}", line);
    }
}
