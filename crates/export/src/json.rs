//! JSON documents served by the API and printed by the CLI.

use std::io::Write;

use serde::Serialize;
use zodiac_chart::{ALL_BODIES, BodyReading, EphemerisResult};

use crate::ExportError;

/// `{date, julianDay, result: [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemerisDocument {
    pub date: String,
    pub julian_day: f64,
    pub result: Vec<BodyDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDocument {
    pub body_id: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub speed_distance: f64,
    pub sign: u8,
    pub degree: u8,
    pub minute: u8,
    pub second: u8,
    pub retrograde: bool,
}

/// Flat document returned for a single body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleBodyDocument {
    pub date: String,
    pub julian_day: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub speed_distance: f64,
    pub sign: u8,
    pub degree: u8,
    pub minute: u8,
    pub second: u8,
}

/// `{error, message}` body of every failed API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDocument {
    pub error: String,
    pub message: String,
}

/// Entry of the body table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInfo {
    pub body_id: i32,
    pub name: &'static str,
    pub glyph: &'static str,
}

impl From<&BodyReading> for BodyDocument {
    fn from(reading: &BodyReading) -> Self {
        let p = &reading.position;
        let z = &reading.zodiac;
        Self {
            body_id: reading.body.id(),
            longitude: p.longitude,
            latitude: p.latitude,
            distance: p.distance,
            speed_longitude: p.speed_longitude,
            speed_latitude: p.speed_latitude,
            speed_distance: p.speed_distance,
            sign: z.sign.index(),
            degree: z.degree,
            minute: z.minute,
            second: z.second,
            retrograde: z.retrograde,
        }
    }
}

impl From<&EphemerisResult> for EphemerisDocument {
    fn from(result: &EphemerisResult) -> Self {
        Self {
            date: result.iso_date(),
            julian_day: result.julian_day.value(),
            result: result.readings.iter().map(BodyDocument::from).collect(),
        }
    }
}

impl SingleBodyDocument {
    /// Document for the first reading of `result`, if any.
    pub fn from_result(result: &EphemerisResult) -> Option<Self> {
        let reading = result.readings.first()?;
        let p = &reading.position;
        let z = &reading.zodiac;
        Some(Self {
            date: result.iso_date(),
            julian_day: result.julian_day.value(),
            longitude: p.longitude,
            latitude: p.latitude,
            distance: p.distance,
            speed_longitude: p.speed_longitude,
            speed_latitude: p.speed_latitude,
            speed_distance: p.speed_distance,
            sign: z.sign.index(),
            degree: z.degree,
            minute: z.minute,
            second: z.second,
        })
    }
}

impl ErrorDocument {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

pub fn body_table() -> Vec<BodyInfo> {
    ALL_BODIES
        .iter()
        .map(|body| BodyInfo {
            body_id: body.id(),
            name: body.name(),
            glyph: body.glyph(),
        })
        .collect()
}

/// Pretty-print `document` followed by a newline.
pub fn write_json<T: Serialize>(mut writer: impl Write, document: &T) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writeln!(writer)?;
    Ok(())
}
