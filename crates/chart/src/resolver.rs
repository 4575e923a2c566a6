//! Fetch a body's position from the ephemeris backend.

use tracing::warn;
use zodiac_core::angle::normalize_degrees;
use zodiac_ephem::{CalcFlags, EphemerisBackend};

use crate::{CelestialBody, ChartError, JulianDay};

/// Geocentric ecliptic position with daily motion, longitude in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub speed_distance: f64,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed_longitude < 0.0
    }

    fn is_finite(&self) -> bool {
        [
            self.longitude,
            self.latitude,
            self.distance,
            self.speed_longitude,
            self.speed_latitude,
            self.speed_distance,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

/// Position of `body` at `julian_day`, speeds included.
///
/// Exactly one backend call is made.
pub fn resolve(
    backend: &dyn EphemerisBackend,
    julian_day: JulianDay,
    body: CelestialBody,
) -> Result<BodyPosition, ChartError> {
    let raw = backend
        .compute_position(julian_day.value(), body.id(), CalcFlags::SPEED)
        .map_err(|source| {
            warn!(%body, jd = julian_day.value(), error = %source, "ephemeris call failed");
            ChartError::EphemerisRange { body, source }
        })?;

    let position = BodyPosition {
        longitude: normalize_degrees(raw.longitude),
        latitude: raw.latitude,
        distance: raw.distance,
        speed_longitude: raw.speed_longitude,
        speed_latitude: raw.speed_latitude,
        speed_distance: raw.speed_distance,
    };
    if !position.is_finite() {
        return Err(ChartError::NonFinitePosition { body });
    }
    Ok(position)
}
