use std::path::Path;

use chrono::{Duration, NaiveDate};
use csv::{Reader, StringRecord};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::league::{Court, DayHours, HourValue, LeagueError, LeagueId, MatchResultRow, OperatingHours, Team};
use crate::schedule::ScheduleRequest;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file}, line {line}: {reason}")]
    InvalidRecord { file: String, line: u64, reason: String },

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    League(#[from] LeagueError),
}

const DAY_NAMES: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

#[derive(Debug, Deserialize)]
struct HoursRecord {
    weekday: String,
    open: Option<String>,
    close: Option<String>,
}

/// Parses a weekday given as 0-6 (0 = Sunday) or as an English day name
pub fn parse_weekday(value: &str) -> Option<u8> {
    let clean = value.trim().to_lowercase();
    if let Ok(index) = clean.parse::<u8>() {
        return (index <= 6).then_some(index);
    }

    if clean.len() < 3 {
        return None;
    }
    DAY_NAMES
        .iter()
        .position(|name| name.starts_with(clean.as_str()))
        .map(|index| index as u8)
}

/// Parses a calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| LoadError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn records<P: AsRef<Path>>(csv_path: P) -> Result<(String, StringRecord, Vec<StringRecord>), LoadError> {
    let file = csv_path.as_ref().display().to_string();
    let mut reader = Reader::from_path(&csv_path)?;
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok((file, headers, rows))
}

fn deserialize_rows<T, P>(csv_path: P) -> Result<Vec<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let (file, headers, rows) = records(csv_path)?;
    rows.iter()
        .map(|record| {
            record.deserialize(Some(&headers)).map_err(|e| LoadError::InvalidRecord {
                file: file.clone(),
                line: record.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Loads teams from a CSV file with `id,name` columns
pub fn load_teams<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Team>, LoadError> {
    let teams: Vec<Team> = deserialize_rows(csv_path)?;
    debug!("Loaded {} teams", teams.len());
    Ok(teams)
}

/// Loads courts from a CSV file with `id,name` columns
pub fn load_courts<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Court>, LoadError> {
    let courts: Vec<Court> = deserialize_rows(csv_path)?;
    debug!("Loaded {} courts", courts.len());
    Ok(courts)
}

/// Loads weekly opening hours from a CSV file with `weekday,open,close` columns.
/// A row with an empty open or close cell marks that weekday as closed.
pub fn load_operating_hours<P: AsRef<Path>>(csv_path: P) -> Result<OperatingHours, LoadError> {
    let (file, headers, rows) = records(csv_path)?;
    let mut hours = OperatingHours::new();

    for record in &rows {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: HoursRecord = record.deserialize(Some(&headers)).map_err(|e| LoadError::InvalidRecord {
            file: file.clone(),
            line,
            reason: e.to_string(),
        })?;

        let weekday = parse_weekday(&row.weekday).ok_or_else(|| LoadError::InvalidRecord {
            file: file.clone(),
            line,
            reason: format!("unknown weekday '{}'", row.weekday),
        })?;

        let open = row.open.map_or(HourValue::Missing, HourValue::Text);
        let close = row.close.map_or(HourValue::Missing, HourValue::Text);
        if let Some(day) = DayHours::from_values(&open, &close) {
            hours.insert(weekday, day);
        }
    }

    debug!("Loaded opening hours for {} weekdays", hours.len());
    Ok(hours)
}

/// Loads match result rows from a CSV file with
/// `team_id,team_name,match_id,home_team_id,away_team_id,home_score,away_score` columns
pub fn load_result_rows<P: AsRef<Path>>(csv_path: P) -> Result<Vec<MatchResultRow>, LoadError> {
    let rows: Vec<MatchResultRow> = deserialize_rows(csv_path)?;
    debug!("Loaded {} result rows", rows.len());
    Ok(rows)
}

/// Builds a schedule request from a league directory holding
/// `teams.csv`, `courts.csv` and `hours.csv`
pub fn load_schedule_request<P: AsRef<Path>>(
    data_dir: P,
    league_id: LeagueId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    match_minutes: i64,
) -> Result<ScheduleRequest, LoadError> {
    let dir = data_dir.as_ref();
    Ok(ScheduleRequest {
        league_id,
        teams: load_teams(dir.join("teams.csv"))?,
        start_date,
        end_date,
        courts: load_courts(dir.join("courts.csv"))?,
        hours: load_operating_hours(dir.join("hours.csv"))?,
        match_duration: Duration::try_minutes(match_minutes).unwrap_or_else(Duration::zero),
    })
}
