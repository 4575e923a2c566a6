//! Ephemeris calculation library consumed by the zodiac pipeline.
//!
//! The [`EphemerisBackend`] trait is the seam between the pipeline and the
//! physics: civil time to Julian Day, body position at a Julian Day, and
//! body names. [`AnalyticEphemeris`] implements it with the VSOP87D
//! planetary series and the ELP-2000/82 lunar terms, so no native library
//! or data file is needed at runtime.

mod apparent;
pub mod bodies;
pub mod calendar;
pub mod pluto;

use std::ops::BitOr;

use thiserror::Error;
use tracing::debug;
use zodiac_core::angle::signed_degrees;

pub use bodies::{BodyId, body_name};
pub use calendar::{Calendar, CivilTime, JulianDays, civil_to_julian_days, delta_t_seconds};

/// Earliest TT Julian Day served (3000 BC, the start of Pluto's element fit).
pub const MIN_JD_TT: f64 = 625_673.5;
/// Latest TT Julian Day served (3000 AD).
pub const MAX_JD_TT: f64 = 2_816_787.5;

/// Half-width of the central difference used for speeds, in days.
///
/// Within one step of either range edge the difference becomes one-sided,
/// so every in-range moment gets a speed.
const SPEED_STEP_DAYS: f64 = 0.01;

/// Calculation flags passed to [`EphemerisBackend::compute_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalcFlags(u32);

impl CalcFlags {
    /// Positions only; speeds are returned as zero.
    pub const NONE: Self = Self(0);
    /// Also compute the daily speeds of longitude, latitude, and distance.
    pub const SPEED: Self = Self(256);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CalcFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Geocentric ecliptic position and daily motion returned for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Ecliptic longitude (degrees).
    pub longitude: f64,
    /// Ecliptic latitude (degrees).
    pub latitude: f64,
    /// Distance from Earth (AU).
    pub distance: f64,
    /// Degrees per day; negative while retrograde.
    pub speed_longitude: f64,
    /// Degrees per day.
    pub speed_latitude: f64,
    /// AU per day.
    pub speed_distance: f64,
}

/// Errors surfaced by an ephemeris backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("invalid civil date: {0}")]
    InvalidCivilDate(String),
    #[error("Julian day {jd_tt} (TT) is outside the ephemeris range {min}..{max}")]
    OutOfRange { jd_tt: f64, min: f64, max: f64 },
    #[error("body id {0} is not supported by this ephemeris")]
    UnknownBody(BodyId),
}

/// Contract offered by an ephemeris calculation library.
///
/// Implementations must be safe to call from several threads at once; a
/// backend wrapping a non-reentrant library serialises calls internally.
pub trait EphemerisBackend: Send + Sync {
    /// Convert a civil date/time to UT and TT Julian Days.
    fn civil_to_julian_day(
        &self,
        civil: &CivilTime,
        calendar: Calendar,
    ) -> Result<JulianDays, EphemerisError>;

    /// Geocentric apparent position of `body` at a UT Julian Day.
    fn compute_position(
        &self,
        jd_ut: f64,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<RawPosition, EphemerisError>;

    /// Display name for `body`.
    fn body_name(&self, body: BodyId) -> Option<String>;
}

/// Series ephemeris: VSOP87D planets, ELP-2000/82 Moon, Keplerian Pluto.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn position_at(body: BodyId, jd_tt: f64) -> Result<apparent::Spherical, EphemerisError> {
        check_range(jd_tt)?;
        apparent::apparent_position(body, jd_tt).ok_or(EphemerisError::UnknownBody(body))
    }

    fn position_and_speed(
        body: BodyId,
        jd_tt: f64,
        flags: CalcFlags,
    ) -> Result<RawPosition, EphemerisError> {
        let here = Self::position_at(body, jd_tt)?;

        let (speed_longitude, speed_latitude, speed_distance) = if flags.contains(CalcFlags::SPEED)
        {
            let (start, end) = speed_window(jd_tt);
            let before = Self::position_at(body, start)?;
            let after = Self::position_at(body, end)?;
            let span = end - start;
            (
                signed_degrees(after.longitude - before.longitude) / span,
                (after.latitude - before.latitude) / span,
                (after.distance - before.distance) / span,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Ok(RawPosition {
            longitude: here.longitude,
            latitude: here.latitude,
            distance: here.distance,
            speed_longitude,
            speed_latitude,
            speed_distance,
        })
    }
}

/// Sample points for the speed difference, clamped to the served range.
fn speed_window(jd_tt: f64) -> (f64, f64) {
    let start = jd_tt - SPEED_STEP_DAYS;
    let end = jd_tt + SPEED_STEP_DAYS;
    if start < MIN_JD_TT {
        (jd_tt, end)
    } else if end > MAX_JD_TT {
        (start, jd_tt)
    } else {
        (start, end)
    }
}

impl EphemerisBackend for AnalyticEphemeris {
    fn civil_to_julian_day(
        &self,
        civil: &CivilTime,
        calendar: Calendar,
    ) -> Result<JulianDays, EphemerisError> {
        civil_to_julian_days(civil, calendar)
    }

    fn compute_position(
        &self,
        jd_ut: f64,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<RawPosition, EphemerisError> {
        if body_name(body).is_none() {
            return Err(EphemerisError::UnknownBody(body));
        }
        let jd_tt = calendar::ut_to_tt(jd_ut);
        let position = Self::position_and_speed(body, jd_tt, flags)?;
        debug!(body, jd_ut, jd_tt, longitude = position.longitude, "computed position");
        Ok(position)
    }

    fn body_name(&self, body: BodyId) -> Option<String> {
        body_name(body).map(str::to_string)
    }
}

fn check_range(jd_tt: f64) -> Result<(), EphemerisError> {
    if jd_tt.is_finite() && (MIN_JD_TT..=MAX_JD_TT).contains(&jd_tt) {
        Ok(())
    } else {
        Err(EphemerisError::OutOfRange {
            jd_tt,
            min: MIN_JD_TT,
            max: MAX_JD_TT,
        })
    }
}
