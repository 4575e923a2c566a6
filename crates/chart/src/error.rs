use thiserror::Error;
use zodiac_ephem::EphemerisError;

use crate::CelestialBody;

/// Failures raised while turning a request into an ephemeris result.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("could not interpret `{input}` as a date: {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("unknown body `{0}`")]
    InvalidBody(String),
    #[error("ephemeris calculation failed for {body}: {source}")]
    EphemerisRange {
        body: CelestialBody,
        #[source]
        source: EphemerisError,
    },
    #[error("ephemeris returned a non-finite position for {body}")]
    NonFinitePosition { body: CelestialBody },
}

impl ChartError {
    /// Stable error name surfaced to API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "InvalidDateError",
            Self::InvalidBody(_) => "InvalidBodyError",
            Self::EphemerisRange { .. } | Self::NonFinitePosition { .. } => "EphemerisRangeError",
        }
    }
}
