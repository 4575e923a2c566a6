//! Numeric body identifiers and their names.

/// Numeric body identifier (0 = Sun … 9 = Pluto).
pub type BodyId = i32;

pub const SUN: BodyId = 0;
pub const MOON: BodyId = 1;
pub const MERCURY: BodyId = 2;
pub const VENUS: BodyId = 3;
pub const MARS: BodyId = 4;
pub const JUPITER: BodyId = 5;
pub const SATURN: BodyId = 6;
pub const URANUS: BodyId = 7;
pub const NEPTUNE: BodyId = 8;
pub const PLUTO: BodyId = 9;

const NAMES: [&str; 10] = [
    "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
];

/// Display name for a body id, or `None` when the id is not served.
pub fn body_name(body: BodyId) -> Option<&'static str> {
    usize::try_from(body).ok().and_then(|idx| NAMES.get(idx).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_numbering() {
        assert_eq!(body_name(SUN), Some("Sun"));
        assert_eq!(body_name(MARS), Some("Mars"));
        assert_eq!(body_name(PLUTO), Some("Pluto"));
    }

    #[test]
    fn unknown_ids_have_no_name() {
        assert_eq!(body_name(-1), None);
        assert_eq!(body_name(10), None);
        assert_eq!(body_name(999), None);
    }
}
