// GPS week rollover correction and microsecond time helpers

use chrono::{DateTime, Utc};

use crate::core::constants::{MICROS_PER_SECOND, WEEK_SECONDS};

/// Put a seconds-of-week value on the file's continuous time axis.
///
/// Once a file is known to cross a week boundary, any value below the
/// starting seconds-of-week belongs to the following week.
pub fn correct(seconds_of_week: f64, start_seconds_of_week: f64, rollover_occurred: bool) -> f64 {
    if rollover_occurred && seconds_of_week < start_seconds_of_week {
        seconds_of_week + WEEK_SECONDS
    } else {
        seconds_of_week
    }
}

/// Absolute microseconds for a seconds-of-week value in the given week.
pub fn to_micros(reference_week_epoch: i64, seconds_of_week: f64) -> i64 {
    // Scale the week offset alone; epoch-sized sums lose sub-microsecond precision
    reference_week_epoch * MICROS_PER_SECOND as i64 + (seconds_of_week * MICROS_PER_SECOND).round() as i64
}

/// Seconds-of-week (possibly past one week after rollover) for an absolute timestamp.
pub fn to_seconds_of_week(reference_week_epoch: i64, micros: i64) -> f64 {
    (micros - reference_week_epoch * MICROS_PER_SECOND as i64) as f64 / MICROS_PER_SECOND
}

pub fn week_micros() -> i64 {
    (WEEK_SECONDS * MICROS_PER_SECOND) as i64
}

pub fn to_datetime(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros)
}
