//! Zodiac signs and the longitude to sign/degree/minute/second split.

use std::fmt;

use zodiac_core::angle::normalize_degrees;
use zodiac_core::constants::SIGN_WIDTH_DEG;

const ARCSEC_PER_SIGN: u64 = 30 * 3_600;
const ARCSEC_PER_CIRCLE: u64 = 12 * ARCSEC_PER_SIGN;

/// Twelve 30° sectors starting at the vernal equinox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// 0 (Aries) through 11 (Pisces).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        ALL_SIGNS.get(usize::from(index)).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Sign symbol with the text presentation selector.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Aries => "♈︎",
            Self::Taurus => "♉︎",
            Self::Gemini => "♊︎",
            Self::Cancer => "♋︎",
            Self::Leo => "♌︎",
            Self::Virgo => "♍︎",
            Self::Libra => "♎︎",
            Self::Scorpio => "♏︎",
            Self::Sagittarius => "♐︎",
            Self::Capricorn => "♑︎",
            Self::Aquarius => "♒︎",
            Self::Pisces => "♓︎",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longitude expressed as whole degrees, minutes, and seconds within a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// 0..=29
    pub degree: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
    pub retrograde: bool,
}

impl ZodiacPosition {
    /// Longitude in degrees reconstructed from the split parts.
    pub fn longitude(&self) -> f64 {
        f64::from(self.sign.index()) * SIGN_WIDTH_DEG
            + f64::from(self.degree)
            + f64::from(self.minute) / 60.0
            + f64::from(self.second) / 3_600.0
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}'{}\"",
            self.degree,
            self.sign.glyph(),
            self.minute,
            self.second
        )?;
        if self.retrograde {
            f.write_str("r")?;
        }
        Ok(())
    }
}

/// Split an ecliptic longitude into sign, degree, minute, and second.
///
/// The second is rounded once; a rounded 60" carries into the minute, then
/// the degree, then the sign, and 360° wraps back to 0° Aries. A negative
/// `speed_longitude` marks the body retrograde.
pub fn format(longitude: f64, speed_longitude: f64) -> ZodiacPosition {
    let lon = normalize_degrees(longitude);
    let total = ((lon * 3_600.0).round() as u64) % ARCSEC_PER_CIRCLE;

    let within_sign = total % ARCSEC_PER_SIGN;
    let sign_index = (total / ARCSEC_PER_SIGN) as u8;
    ZodiacPosition {
        sign: ALL_SIGNS[usize::from(sign_index)],
        degree: (within_sign / 3_600) as u8,
        minute: (within_sign % 3_600 / 60) as u8,
        second: (within_sign % 60) as u8,
        retrograde: speed_longitude < 0.0,
    }
}
