//! CSV rows, one per body, with a header line.

use std::io::Write;

use serde::Serialize;
use zodiac_chart::{BodyReading, EphemerisResult};

use crate::ExportError;

#[derive(Debug, Serialize)]
struct Row<'a> {
    date: &'a str,
    julian_day: f64,
    body_id: i32,
    name: &'a str,
    longitude: f64,
    latitude: f64,
    distance: f64,
    speed_longitude: f64,
    speed_latitude: f64,
    speed_distance: f64,
    sign: &'a str,
    degree: u8,
    minute: u8,
    second: u8,
    retrograde: bool,
}

impl<'a> Row<'a> {
    fn new(date: &'a str, julian_day: f64, reading: &'a BodyReading) -> Self {
        let p = &reading.position;
        let z = &reading.zodiac;
        Self {
            date,
            julian_day,
            body_id: reading.body.id(),
            name: &reading.name,
            longitude: p.longitude,
            latitude: p.latitude,
            distance: p.distance,
            speed_longitude: p.speed_longitude,
            speed_latitude: p.speed_latitude,
            speed_distance: p.speed_distance,
            sign: z.sign.name(),
            degree: z.degree,
            minute: z.minute,
            second: z.second,
            retrograde: z.retrograde,
        }
    }
}

/// Write `result` as CSV to `writer`.
pub fn write_csv(writer: impl Write, result: &EphemerisResult) -> Result<(), ExportError> {
    let date = result.iso_date();
    let julian_day = result.julian_day.value();
    let mut csv = ::csv::Writer::from_writer(writer);
    for reading in &result.readings {
        csv.serialize(Row::new(&date, julian_day, reading))?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zodiac_chart::{CelestialBody, Ephemeris};

    #[test]
    fn writes_header_and_rows_in_order() {
        let result = Ephemeris::default()
            .compute(
                Some("2000-01-01T12:00:00Z"),
                &[CelestialBody::Sun, CelestialBody::Pluto],
            )
            .unwrap();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,julian_day,body_id,name,longitude"));
        assert!(lines[1].starts_with("2000-01-01T12:00:00.000Z,2451545.0,0,Sun,"));
        assert!(lines[1].contains(",Capricorn,10,"));
        assert!(lines[2].contains(",9,Pluto,"));
    }
}
