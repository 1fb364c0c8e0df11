use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::error::FormError;

/// Used whenever a time cannot be read.
pub const DEFAULT_TIME: &str = "10:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Normalises `"2:30 PM"`, `"14:30"`, `"2 PM"` and the like to zero-padded
/// 24-hour `HH:MM`. Anything out of range or unreadable becomes [`DEFAULT_TIME`].
pub fn normalize_time(input: &str) -> String {
    match parse_time(input) {
        Some((hour, minute)) => format!("{hour:02}:{minute:02}"),
        None => DEFAULT_TIME.to_string(),
    }
}

/// Hour 24 and minute 60 are accepted, as the time pickers emit them.
fn parse_time(input: &str) -> Option<(i64, i64)> {
    let upper = input.trim().to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(Meridiem::Pm))
    } else if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(Meridiem::Am))
    } else {
        (upper.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':').unwrap_or((clock, ""));
    let mut hour: i64 = hour.trim().parse().ok()?;
    let minute: i64 = match minute.trim() {
        "" => 0,
        m => m.parse().ok()?,
    };

    match meridiem {
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        Some(Meridiem::Pm) if hour != 12 => hour = hour.checked_add(12)?,
        _ => {}
    }

    if !(0..=24).contains(&hour) || !(0..=60).contains(&minute) {
        return None;
    }
    Some((hour, minute))
}

/// Joins a `DD/MM/YYYY` date and a free-text time into a local
/// `YYYY-MM-DDTHH:MM:SS` timestamp. `24:00` rolls over to the next day.
pub fn combine_date_time(date: &str, time: &str) -> Result<String, FormError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y")
        .map_err(|_| FormError::InvalidDate(date.to_string()))?;
    let (hour, minute) = parse_time(time).unwrap_or((10, 0));
    let timestamp = day.and_time(NaiveTime::MIN) + TimeDelta::minutes(hour * 60 + minute);
    Ok(timestamp.format("%Y-%m-%dT%H:%M:%S").to_string())
}
