//! Parse a requested moment, fall back to now, and convert it to a Julian Day.
//!
//! Accepted inputs:
//!
//! * RFC 3339 with `Z` or a numeric offset (`2000-01-01T12:00:00+02:00`),
//! * naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`, `T` or a space as separator,
//!   optionally suffixed with `Z`, read as UTC,
//! * date only (`YYYY-MM-DD`), read as midnight UTC.
//!
//! Seconds and sub-seconds are dropped before the Julian Day conversion.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use tracing::debug;
use zodiac_ephem::{Calendar, CivilTime, EphemerisBackend};

use crate::ChartError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Universal Time Julian Day.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDay(pub f64);

impl JulianDay {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A request moment truncated to the minute, with its Julian Day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMoment {
    pub moment: DateTime<Utc>,
    pub julian_day: JulianDay,
}

impl NormalizedMoment {
    /// Millisecond ISO-8601 rendering with a `Z` suffix.
    pub fn iso(&self) -> String {
        iso_timestamp(&self.moment)
    }
}

pub fn iso_timestamp(moment: &DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse `raw`, treating a missing or blank value as the current instant.
pub fn resolve_moment(raw: Option<&str>) -> Result<DateTime<Utc>, ChartError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Utc::now()),
        Some(text) => parse_date(text),
    }
}

/// Parse a caller-supplied date string into a UTC instant.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, ChartError> {
    let text = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive_text = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .unwrap_or(text);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive_text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ChartError::InvalidDate {
            input: input.to_string(),
            reason: "expected an ISO-8601 date or date-time".to_string(),
        })
}

/// Drop seconds and sub-seconds.
pub fn truncate_to_minute(moment: DateTime<Utc>) -> Result<DateTime<Utc>, ChartError> {
    let whole_minutes = moment.timestamp().div_euclid(60) * 60;
    DateTime::from_timestamp(whole_minutes, 0).ok_or_else(|| ChartError::InvalidDate {
        input: moment.to_string(),
        reason: "moment is outside the representable range".to_string(),
    })
}

/// Normalise an optional date string against `backend`.
///
/// The same input always yields the same moment and Julian Day.
pub fn normalize(
    backend: &dyn EphemerisBackend,
    raw: Option<&str>,
) -> Result<NormalizedMoment, ChartError> {
    let moment = resolve_moment(raw)?;
    normalize_at(backend, moment)
}

/// Normalise an already-parsed instant.
pub fn normalize_at(
    backend: &dyn EphemerisBackend,
    moment: DateTime<Utc>,
) -> Result<NormalizedMoment, ChartError> {
    let moment = truncate_to_minute(moment)?;
    let civil = CivilTime::new(
        moment.year(),
        moment.month(),
        moment.day(),
        moment.hour(),
        moment.minute(),
        0.0,
    );
    let days = backend
        .civil_to_julian_day(&civil, Calendar::Gregorian)
        .map_err(|err| ChartError::InvalidDate {
            input: iso_timestamp(&moment),
            reason: err.to_string(),
        })?;
    debug!(moment = %moment, jd_ut = days.ut, "normalised request moment");
    Ok(NormalizedMoment {
        moment,
        julian_day: JulianDay(days.ut),
    })
}
