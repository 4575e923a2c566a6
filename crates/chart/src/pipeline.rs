//! Request-level orchestration: normalise the moment once, then resolve and
//! format each requested body.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info_span};
use zodiac_ephem::{AnalyticEphemeris, EphemerisBackend};

use crate::body::{ALL_BODIES, CelestialBody};
use crate::moment::{self, JulianDay, NormalizedMoment};
use crate::resolver::{self, BodyPosition};
use crate::zodiac::{self, ZodiacPosition};
use crate::ChartError;

/// One body's entry in an [`EphemerisResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct BodyReading {
    pub body: CelestialBody,
    /// Display name reported by the backend.
    pub name: String,
    pub position: BodyPosition,
    pub zodiac: ZodiacPosition,
}

/// Positions of the requested bodies at a single normalised moment.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisResult {
    pub moment: DateTime<Utc>,
    pub julian_day: JulianDay,
    pub readings: Vec<BodyReading>,
}

impl EphemerisResult {
    pub fn iso_date(&self) -> String {
        moment::iso_timestamp(&self.moment)
    }

    pub fn reading(&self, body: CelestialBody) -> Option<&BodyReading> {
        self.readings.iter().find(|reading| reading.body == body)
    }
}

/// Shared entry point for every outer surface.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Ephemeris {
    backend: Arc<dyn EphemerisBackend>,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::new(Arc::new(AnalyticEphemeris::new()))
    }
}

impl Ephemeris {
    pub fn new(backend: Arc<dyn EphemerisBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn EphemerisBackend {
        self.backend.as_ref()
    }

    pub fn normalize(&self, raw_date: Option<&str>) -> Result<NormalizedMoment, ChartError> {
        moment::normalize(self.backend(), raw_date)
    }

    /// Compute `bodies` (in the given order) at `raw_date`, or now when absent.
    ///
    /// The date is validated before any position is requested, and any
    /// failing body fails the whole request.
    pub fn compute(
        &self,
        raw_date: Option<&str>,
        bodies: &[CelestialBody],
    ) -> Result<EphemerisResult, ChartError> {
        let normalized = self.normalize(raw_date)?;
        self.compute_at(normalized, bodies)
    }

    /// Compute all ten bodies in canonical order.
    pub fn compute_all(&self, raw_date: Option<&str>) -> Result<EphemerisResult, ChartError> {
        self.compute(raw_date, &ALL_BODIES)
    }

    /// Compute a single body.
    pub fn compute_body(
        &self,
        raw_date: Option<&str>,
        body: CelestialBody,
    ) -> Result<BodyReading, ChartError> {
        let normalized = self.normalize(raw_date)?;
        self.read_body(normalized.julian_day, body)
    }

    pub fn compute_at(
        &self,
        normalized: NormalizedMoment,
        bodies: &[CelestialBody],
    ) -> Result<EphemerisResult, ChartError> {
        let span = info_span!("ephemeris", date = %normalized.moment, bodies = bodies.len());
        let _guard = span.enter();

        let readings = bodies
            .iter()
            .map(|&body| self.read_body(normalized.julian_day, body))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(jd = normalized.julian_day.value(), "ephemeris computed");
        Ok(EphemerisResult {
            moment: normalized.moment,
            julian_day: normalized.julian_day,
            readings,
        })
    }

    fn read_body(
        &self,
        julian_day: JulianDay,
        body: CelestialBody,
    ) -> Result<BodyReading, ChartError> {
        let position = resolver::resolve(self.backend(), julian_day, body)?;
        let name = self
            .backend
            .body_name(body.id())
            .unwrap_or_else(|| body.name().to_string());
        Ok(BodyReading {
            body,
            name,
            zodiac: zodiac::format(position.longitude, position.speed_longitude),
            position,
        })
    }
}
