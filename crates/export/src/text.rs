//! Plain-text table for terminals.

use std::fmt::Write;

use zodiac_chart::EphemerisResult;

/// Aligned table with one line per body.
pub fn render_table(result: &EphemerisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  JD {:.6}",
        result.iso_date(),
        result.julian_day.value()
    );
    let _ = writeln!(
        out,
        "{:<8} {:<12} {:>3} {:>2} {:>2} {:>2} {:>12} {:>10} {:>12} {:>10}",
        "body", "sign", "deg", "m", "s", "R", "longitude", "latitude", "distance", "speed"
    );
    for reading in &result.readings {
        let z = &reading.zodiac;
        let p = &reading.position;
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:>3} {:>2} {:>2} {:>2} {:>12.6} {:>10.6} {:>12.6} {:>10.6}",
            reading.name,
            z.sign.name(),
            z.degree,
            z.minute,
            z.second,
            if z.retrograde { "R" } else { "" },
            p.longitude,
            p.latitude,
            p.distance,
            p.speed_longitude
        );
    }
    out
}
