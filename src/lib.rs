//! Geocentric zodiac ephemeris for the Sun, Moon, and planets.
//!
//! The workspace crates are re-exported here so the binaries, the HTTP
//! service, and integration tests share a single entry point: `ephem`
//! computes raw positions, `chart` turns a requested moment into formatted
//! readings, `export` renders them, and `server` exposes them over HTTP.

pub use zodiac_chart as chart;
pub use zodiac_config as config;
pub use zodiac_core as primitives;
pub use zodiac_ephem as ephem;
pub use zodiac_export as export;
pub use zodiac_server as server;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
