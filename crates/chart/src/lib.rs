//! Ephemeris pipeline: normalise a requested moment, resolve body positions
//! through an [`zodiac_ephem::EphemerisBackend`], and split longitudes into
//! zodiac sign, degree, minute, and second.

pub mod body;
mod error;
pub mod moment;
pub mod pipeline;
pub mod resolver;
pub mod zodiac;

pub use body::{ALL_BODIES, CelestialBody};
pub use error::ChartError;
pub use moment::{JulianDay, NormalizedMoment};
pub use pipeline::{BodyReading, Ephemeris, EphemerisResult};
pub use resolver::BodyPosition;
pub use zodiac::{ZodiacPosition, ZodiacSign};
