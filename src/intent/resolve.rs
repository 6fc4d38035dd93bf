//! Resolution of date and time expressions against an explicit
//! reference time. The reference is always passed in by the caller so
//! "tomorrow" means the same thing in a test as it does in production.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use regex::Regex;

use crate::core::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStart {
    pub start: DateTime<FixedOffset>,
    /// The expression carried a date but no clock time
    pub date_only: bool,
}

/// Resolve a date expression and an optional time expression into a
/// timezone-aware start. A time without a date means the reference
/// date. Returns `None` when neither part is present.
pub fn resolve_start(
    date: Option<&str>,
    time: Option<&str>,
    now: DateTime<Tz>,
) -> Result<Option<ResolvedStart>, Error> {
    // "in an hour" style offsets produce a full timestamp on their
    // own, whichever field the model put them in
    for expr in [date, time].into_iter().flatten() {
        if let Some(offset) = clock_offset(expr) {
            return Ok(Some(ResolvedStart {
                start: (now + offset).fixed_offset(),
                date_only: false,
            }));
        }
    }

    if date.is_none() && time.is_none() {
        return Ok(None);
    }

    let day = match date {
        Some(expr) => resolve_date(expr, now)?,
        None => now.date_naive(),
    };
    let (clock, date_only) = match time {
        Some(expr) => (resolve_time(expr)?, false),
        None => (NaiveTime::MIN, true),
    };

    let start = now
        .timezone()
        .from_local_datetime(&day.and_time(clock))
        .earliest()
        .ok_or_else(|| {
            Error::Parse(format!(
                "the local time {} {} does not exist in {}",
                day,
                clock,
                now.timezone()
            ))
        })?
        .fixed_offset();

    Ok(Some(ResolvedStart { start, date_only }))
}

/// Resolve a date expression to a calendar date. Accepts ISO dates
/// and the relative forms the extraction prompt allows.
pub fn resolve_date(expr: &str, now: DateTime<Tz>) -> Result<NaiveDate, Error> {
    let expr = expr.trim().to_lowercase();
    let today = now.date_naive();

    match expr.as_str() {
        "today" | "tonight" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&expr, "%Y-%m-%d") {
        return Ok(date);
    }

    // "in 3 days", "in a week", "in 2 weeks"
    let day_offset = Regex::new(r"^in\s+(an?|\d+)\s+(day|week)s?$").unwrap();
    if let Some(caps) = day_offset.captures(&expr) {
        let n = parse_count(&caps[1]);
        let days = match &caps[2] {
            "week" => n * 7,
            _ => n,
        };
        return Ok(today + Duration::days(days));
    }

    // Bare weekday names mean the soonest occurrence, today included.
    // "next <weekday>" is always strictly in the future.
    if let Some(rest) = expr.strip_prefix("next ") {
        if let Ok(weekday) = rest.trim().parse::<Weekday>() {
            let ahead = days_until(today.weekday(), weekday);
            let ahead = if ahead == 0 { 7 } else { ahead };
            return Ok(today + Duration::days(ahead));
        }
    }
    if let Ok(weekday) = expr.parse::<Weekday>() {
        return Ok(today + Duration::days(days_until(today.weekday(), weekday)));
    }

    Err(Error::Parse(format!(
        "unrecognized date expression \"{}\"",
        expr
    )))
}

/// Resolve a clock time expression. Accepts 24-hour "HH:MM", 12-hour
/// "2pm"/"2:30 pm", "noon", and "midnight".
pub fn resolve_time(expr: &str) -> Result<NaiveTime, Error> {
    let expr = expr.trim().to_lowercase();

    match expr.as_str() {
        "noon" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "midnight" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    let clock = Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$").unwrap();
    let caps = clock.captures(&expr).ok_or_else(|| {
        Error::Parse(format!("unrecognized time expression \"{}\"", expr))
    })?;

    let mut hour: u32 = caps[1].parse().unwrap();
    let minute: u32 = caps
        .get(2)
        .map(|m| m.as_str().parse().unwrap())
        .unwrap_or(0);

    match caps.get(3).map(|m| m.as_str()) {
        Some("am") if hour == 12 => hour = 0,
        Some("pm") if hour < 12 => hour += 12,
        Some(meridiem) if hour > 12 => {
            return Err(Error::Parse(format!(
                "invalid 12-hour time \"{}{}\"",
                hour, meridiem
            )));
        }
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| Error::Parse(format!("invalid time \"{}\"", expr)))
}

/// Match "in an hour", "in 90 minutes" style offsets from the
/// reference instant
fn clock_offset(expr: &str) -> Option<Duration> {
    let expr = expr.trim().to_lowercase();
    let offset = Regex::new(r"^in\s+(an?|\d+)\s+(minute|min|hour|hr)s?$").unwrap();
    let caps = offset.captures(&expr)?;
    let n = parse_count(&caps[1]);
    match &caps[2] {
        "hour" | "hr" => Some(Duration::hours(n)),
        _ => Some(Duration::minutes(n)),
    }
}

fn parse_count(s: &str) -> i64 {
    match s {
        "a" | "an" => 1,
        n => n.parse().unwrap(),
    }
}

fn days_until(from: Weekday, to: Weekday) -> i64 {
    let from = from.num_days_from_monday() as i64;
    let to = to.num_days_from_monday() as i64;
    (to - from).rem_euclid(7)
}
