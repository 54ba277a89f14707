//! Calendar time to Julian Day conversion.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use std::fmt;
use swisseph::swe::julday;

/// Proleptic Gregorian calendar flag for `julday`
const GREG_CAL: u32 = 1;

/// Continuous day count in Universal Time, the engine's native time value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Convert a calendar date and decimal UT hour to a Julian Day.
///
/// Components are passed through unchecked; `month` is 1-12 and
/// `hour_ut` may carry minutes and seconds as a fraction (14.5 is 14:30).
pub fn to_native_time(year: i32, month: u32, day: u32, hour_ut: f64) -> JulianDay {
    // julday is a pure computation and touches no engine state
    JulianDay(julday(year, month as i32, day as i32, hour_ut, GREG_CAL))
}

/// Convert a UTC instant to a Julian Day.
pub fn julian_day_from_datetime(dt: DateTime<Utc>) -> JulianDay {
    let hour = dt.hour() as f64;
    let minute = dt.minute() as f64;
    let second = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    let hour_decimal = hour + minute / 60.0 + second / 3600.0;

    to_native_time(dt.year(), dt.month(), dt.day(), hour_decimal)
}
