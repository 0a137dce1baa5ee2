use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use log::debug;

use crate::league::{Court, LeagueError, OperatingHours};
use super::types::Slot;

const TIME_FORMATS: [&str; 3] = ["%H:%M", "%I:%M %p", "%I:%M%p"];

/// True when the minutes field is exactly two digits
fn has_two_digit_minutes(clean: &str) -> bool {
    clean
        .split_once(':')
        .map_or(false, |(_, rest)| rest.bytes().take_while(u8::is_ascii_digit).count() == 2)
}

/// Parses a time-of-day string in 24-hour (`HH:MM`) or 12-hour (`H:MM AM`) form
pub fn parse_time_of_day(time_str: &str) -> Option<NaiveTime> {
    let clean = time_str.trim().to_uppercase();
    if !has_two_digit_minutes(&clean) {
        return None;
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&clean, format).ok())
}

/// Formats a time of day as `HH:MM`
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Weekday index of a date, 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parses every operating-hours entry into an open/close window per weekday.
/// Days whose close time is not after the open time are closed.
fn parse_weekly_hours(hours: &OperatingHours) -> Result<[Option<(NaiveTime, NaiveTime)>; 7], LeagueError> {
    let mut week = [None; 7];

    for (weekday, day) in hours.iter() {
        if weekday > 6 {
            return Err(LeagueError::invalid(format!(
                "weekday {} is out of range (0 = Sunday .. 6 = Saturday)",
                weekday
            )));
        }

        let open = parse_time_of_day(&day.open).ok_or_else(|| LeagueError::InvalidHours {
            weekday,
            value: day.open.clone(),
        })?;
        let close = parse_time_of_day(&day.close).ok_or_else(|| LeagueError::InvalidHours {
            weekday,
            value: day.close.clone(),
        })?;

        if close <= open {
            debug!("Weekday {} closes at or before it opens, treating as closed", weekday);
            continue;
        }
        week[weekday as usize] = Some((open, close));
    }

    Ok(week)
}

/// Expands a date range into bookable slots.
///
/// Slots are ordered by date, then start time, then the order of `courts`.
/// Every slot is exactly `duration` long and ends no later than the day's
/// closing time; leftover time at the end of a day is not used.
pub fn calculate_time_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    courts: &[Court],
    hours: &OperatingHours,
    duration: Duration,
) -> Result<Vec<Slot>, LeagueError> {
    if courts.is_empty() {
        return Err(LeagueError::invalid("at least one court is required"));
    }
    if duration <= Duration::zero() {
        return Err(LeagueError::invalid("match duration must be positive"));
    }
    if end_date < start_date {
        return Err(LeagueError::invalid(format!(
            "end date {} is before start date {}",
            end_date, start_date
        )));
    }
    if hours.is_empty() {
        return Err(LeagueError::invalid("no operating hours configured"));
    }

    let week = parse_weekly_hours(hours)?;
    let mut slots = Vec::new();

    for date in start_date.iter_days().take_while(|date| *date <= end_date) {
        let Some((open, close)) = week[weekday_index(date) as usize] else {
            continue;
        };

        let day_close = date.and_time(close);
        let mut window_start = date.and_time(open);

        while let Some(window_end) = window_start
            .checked_add_signed(duration)
            .filter(|end| *end <= day_close)
        {
            for court in courts {
                slots.push(Slot {
                    start: window_start,
                    end: window_end,
                    court: court.clone(),
                });
            }
            window_start = window_end;
        }
    }

    if slots.is_empty() {
        return Err(LeagueError::NoAvailableSlots);
    }

    debug!(
        "Generated {} slots between {} and {} on {} courts",
        slots.len(),
        start_date,
        end_date,
        courts.len()
    );

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn courts(n: i64) -> Vec<Court> {
        (1..=n).map(|id| Court::new(id, format!("Court {}", id))).collect()
    }

    #[test]
    fn parses_24_hour_times() {
        assert_eq!(parse_time_of_day("09:00"), Some(time(9, 0)));
        assert_eq!(parse_time_of_day("23:45"), Some(time(23, 45)));
        assert_eq!(parse_time_of_day(" 7:30 "), Some(time(7, 30)));
    }

    #[test]
    fn parses_12_hour_variants() {
        assert_eq!(parse_time_of_day("9:00 AM"), Some(time(9, 0)));
        assert_eq!(parse_time_of_day("09:00 am"), Some(time(9, 0)));
        assert_eq!(parse_time_of_day("5:30PM"), Some(time(17, 30)));
        assert_eq!(parse_time_of_day("12:00 pm"), Some(time(12, 0)));
        assert_eq!(parse_time_of_day("12:15am"), Some(time(0, 15)));
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_time_of_day("noon"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("13:00 PM"), None);
        assert_eq!(parse_time_of_day("0900"), None);
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("9:5"), None);
        assert_eq!(parse_time_of_day("9:5 PM"), None);
        assert_eq!(parse_time_of_day("09:005"), None);
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        // 2024-06-02 is a Sunday
        assert_eq!(weekday_index(date(2024, 6, 2)), 0);
        assert_eq!(weekday_index(date(2024, 6, 3)), 1);
        assert_eq!(weekday_index(date(2024, 6, 8)), 6);
    }

    #[test]
    fn single_window_gives_single_slot() {
        let hours = OperatingHours::new().with_day(1, "09:00", "10:00");
        let slots = calculate_time_slots(date(2024, 6, 3), date(2024, 6, 3), &courts(1), &hours, Duration::hours(1)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, date(2024, 6, 3).and_time(time(9, 0)));
        assert_eq!(slots[0].end, date(2024, 6, 3).and_time(time(10, 0)));
        assert_eq!(slots[0].court.id, 1);
    }

    #[test]
    fn courts_cycle_fastest_then_time_then_date() {
        let hours = OperatingHours::new()
            .with_day(1, "09:00", "11:00")
            .with_day(2, "18:00", "19:00");
        let slots = calculate_time_slots(date(2024, 6, 3), date(2024, 6, 4), &courts(2), &hours, Duration::hours(1)).unwrap();

        let summary: Vec<(u32, u32, i64)> = slots
            .iter()
            .map(|s| (s.start.date().day(), chrono::Timelike::hour(&s.start), s.court.id))
            .collect();
        assert_eq!(
            summary,
            vec![(3, 9, 1), (3, 9, 2), (3, 10, 1), (3, 10, 2), (4, 18, 1), (4, 18, 2)]
        );
    }

    #[test]
    fn partial_window_at_close_is_dropped() {
        let hours = OperatingHours::new().with_day(1, "9:00 AM", "11:30 AM");
        let slots = calculate_time_slots(date(2024, 6, 3), date(2024, 6, 3), &courts(1), &hours, Duration::hours(1)).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].end, date(2024, 6, 3).and_time(time(11, 0)));
    }

    #[test]
    fn closed_every_day_yields_no_slots_error() {
        // Only Sunday is listed, and it closes before it opens
        let hours = OperatingHours::new().with_day(0, "10:00", "09:00");
        let result = calculate_time_slots(date(2024, 6, 1), date(2024, 6, 30), &courts(2), &hours, Duration::hours(1));
        assert_eq!(result, Err(LeagueError::NoAvailableSlots));
    }

    #[test]
    fn window_shorter_than_duration_yields_no_slots() {
        let hours = OperatingHours::new().with_day(1, "09:00", "09:30");
        let result = calculate_time_slots(date(2024, 6, 3), date(2024, 6, 3), &courts(1), &hours, Duration::hours(1));
        assert_eq!(result, Err(LeagueError::NoAvailableSlots));
    }

    #[test]
    fn validation_errors_are_distinct() {
        let hours = OperatingHours::new().with_day(1, "09:00", "10:00");
        let day = date(2024, 6, 3);

        let no_courts = calculate_time_slots(day, day, &[], &hours, Duration::hours(1));
        assert!(matches!(no_courts, Err(LeagueError::InvalidArgument(ref m)) if m.contains("court")));

        let zero = calculate_time_slots(day, day, &courts(1), &hours, Duration::zero());
        assert!(matches!(zero, Err(LeagueError::InvalidArgument(ref m)) if m.contains("duration")));

        let backwards = calculate_time_slots(day, date(2024, 6, 2), &courts(1), &hours, Duration::hours(1));
        assert!(matches!(backwards, Err(LeagueError::InvalidArgument(ref m)) if m.contains("before")));

        let no_hours = calculate_time_slots(day, day, &courts(1), &OperatingHours::new(), Duration::hours(1));
        assert!(matches!(no_hours, Err(LeagueError::InvalidArgument(ref m)) if m.contains("operating hours")));
    }

    #[test]
    fn bad_time_string_names_weekday() {
        let hours = OperatingHours::new()
            .with_day(1, "09:00", "10:00")
            .with_day(4, "9 o'clock", "17:00");
        let result = calculate_time_slots(date(2024, 6, 3), date(2024, 6, 3), &courts(1), &hours, Duration::hours(1));
        assert_eq!(
            result,
            Err(LeagueError::InvalidHours { weekday: 4, value: "9 o'clock".into() })
        );
    }

    #[test]
    fn weekday_out_of_range_is_rejected() {
        let hours = OperatingHours::new().with_day(7, "09:00", "10:00");
        let day = date(2024, 6, 3);
        let result = calculate_time_slots(day, day, &courts(1), &hours, Duration::hours(1));
        assert!(matches!(result, Err(LeagueError::InvalidArgument(_))));
    }
}
