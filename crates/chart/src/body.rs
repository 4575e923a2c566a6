//! The fixed set of bodies served by the pipeline.

use std::fmt;

use zodiac_ephem::bodies::{self, BodyId};

use crate::ChartError;

/// One of the ten bodies served by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Canonical body ordering used when the caller does not choose one.
pub const ALL_BODIES: [CelestialBody; 10] = [
    CelestialBody::Sun,
    CelestialBody::Moon,
    CelestialBody::Mercury,
    CelestialBody::Venus,
    CelestialBody::Mars,
    CelestialBody::Jupiter,
    CelestialBody::Saturn,
    CelestialBody::Uranus,
    CelestialBody::Neptune,
    CelestialBody::Pluto,
];

impl CelestialBody {
    /// Stable numeric id understood by the ephemeris backend.
    pub const fn id(self) -> BodyId {
        match self {
            Self::Sun => bodies::SUN,
            Self::Moon => bodies::MOON,
            Self::Mercury => bodies::MERCURY,
            Self::Venus => bodies::VENUS,
            Self::Mars => bodies::MARS,
            Self::Jupiter => bodies::JUPITER,
            Self::Saturn => bodies::SATURN,
            Self::Uranus => bodies::URANUS,
            Self::Neptune => bodies::NEPTUNE,
            Self::Pluto => bodies::PLUTO,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Astronomical symbol.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☉",
            Self::Moon => "☽",
            Self::Mercury => "☿",
            Self::Venus => "♀",
            Self::Mars => "♂",
            Self::Jupiter => "♃",
            Self::Saturn => "♄",
            Self::Uranus => "♅",
            Self::Neptune => "♆",
            Self::Pluto => "♇",
        }
    }

    pub fn from_id(id: BodyId) -> Option<Self> {
        ALL_BODIES.iter().copied().find(|body| body.id() == id)
    }

    /// Parse a numeric id (`"4"`) or a case-insensitive name (`"mars"`).
    pub fn parse(input: &str) -> Result<Self, ChartError> {
        let trimmed = input.trim();
        let found = match trimmed.parse::<BodyId>() {
            Ok(id) => Self::from_id(id),
            Err(_) => ALL_BODIES
                .iter()
                .copied()
                .find(|body| body.name().eq_ignore_ascii_case(trimmed)),
        };
        found.ok_or_else(|| ChartError::InvalidBody(input.to_string()))
    }

    /// Parse a comma-separated list, preserving the caller's order.
    ///
    /// A blank list selects every body in canonical order.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ChartError> {
        if input.trim().is_empty() {
            return Ok(ALL_BODIES.to_vec());
        }
        input.split(',').map(Self::parse).collect()
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_in_canonical_order() {
        for (idx, body) in ALL_BODIES.iter().enumerate() {
            assert_eq!(body.id() as usize, idx);
            assert_eq!(CelestialBody::from_id(body.id()), Some(*body));
        }
    }

    #[test]
    fn parses_ids_and_names() {
        assert_eq!(CelestialBody::parse("4").unwrap(), CelestialBody::Mars);
        assert_eq!(CelestialBody::parse(" 0 ").unwrap(), CelestialBody::Sun);
        assert_eq!(CelestialBody::parse("NEPTUNE").unwrap(), CelestialBody::Neptune);
        assert_eq!(CelestialBody::parse("moon").unwrap(), CelestialBody::Moon);
    }

    #[test]
    fn rejects_unknown_bodies() {
        for input in ["999", "-1", "10", "Ceres", ""] {
            assert!(
                matches!(CelestialBody::parse(input), Err(ChartError::InvalidBody(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn list_keeps_caller_order() {
        let bodies = CelestialBody::parse_list("pluto,0,4").unwrap();
        assert_eq!(
            bodies,
            vec![CelestialBody::Pluto, CelestialBody::Sun, CelestialBody::Mars]
        );
        assert_eq!(CelestialBody::parse_list("  ").unwrap(), ALL_BODIES.to_vec());
        assert!(CelestialBody::parse_list("0,,1").is_err());
    }

    #[test]
    fn names_match_backend_table() {
        for body in ALL_BODIES {
            assert_eq!(zodiac_ephem::body_name(body.id()), Some(body.name()));
        }
    }
}
