use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::travel::{TravelPreferences, MAX_TRIP_DAYS};

const SECONDS_PER_DAY: f64 = 86_400.0;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripWindow {
    pub start: DateTime<Utc>,
    pub day_count: u32,
}

impl TripWindow {
    /// `YYYY-MM-DD` for every day of the trip, in order.
    pub fn date_sequence(&self) -> Vec<String> {
        (0..self.day_count)
            .map(|offset| format_date(self.start + Duration::days(offset as i64)))
            .collect()
    }
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || !bytes[0].is_ascii_digit() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else, including
/// instants past year 9999 in UTC, counts as absent.
pub fn parse_trip_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = parse_calendar_date(value) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|dt| (0..=MAX_YEAR).contains(&dt.year()))
}

// Days from `start` through 31 Dec 9999, so every formatted date keeps a
// four-digit year.
fn days_left_in_calendar(start: DateTime<Utc>) -> u32 {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
        .map(|last| (last - start.date_naive()).num_days() + 1)
        .map_or(1, |left| left.clamp(1, MAX_TRIP_DAYS as i64) as u32)
}

/// Works out where the trip starts and how many days it spans. `now` stands in
/// for a missing or unreadable start date. The span never exceeds
/// `MAX_TRIP_DAYS` or runs past the end of year 9999.
pub fn resolve_trip_window(preferences: &TravelPreferences, now: DateTime<Utc>) -> TripWindow {
    let start = parse_trip_date(preferences.start_date.as_deref()).unwrap_or(now);

    let requested = match parse_trip_date(preferences.end_date.as_deref()) {
        Some(end) => {
            let diff_days = (end - start).num_seconds() as f64 / SECONDS_PER_DAY;
            (diff_days.round().max(0.0) as u32).saturating_add(1)
        }
        None => preferences.days.max(1),
    };

    TripWindow {
        start,
        day_count: requested.min(days_left_in_calendar(start)),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
