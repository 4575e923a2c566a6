//! Civil calendar to Julian Day conversion and the ΔT (TT − UT) model.

use zodiac_core::constants::J2000_JD;
use zodiac_core::time::seconds_to_days;

use crate::EphemerisError;

/// Calendar convention used to interpret a civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    /// Proleptic Gregorian calendar.
    #[default]
    Gregorian,
    /// Julian calendar.
    Julian,
}

/// Broken-down civil date and time, in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Fractional day of month, e.g. `4.81` for the 4th at 19:26:24.
    fn fractional_day(&self) -> f64 {
        self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1_440.0
            + seconds_to_days(self.second)
    }

    fn validate(&self, calendar: Calendar) -> Result<(), EphemerisError> {
        if !(1..=12).contains(&self.month) {
            return Err(EphemerisError::InvalidCivilDate(format!(
                "month {} outside 1..=12",
                self.month
            )));
        }
        let last_day = days_in_month(self.year, self.month, calendar);
        if self.day == 0 || self.day > last_day {
            return Err(EphemerisError::InvalidCivilDate(format!(
                "day {} outside 1..={last_day} for {:04}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 || self.minute > 59 {
            return Err(EphemerisError::InvalidCivilDate(format!(
                "time {:02}:{:02} out of range",
                self.hour, self.minute
            )));
        }
        // 60.x admits a positive leap second
        if !(0.0..61.0).contains(&self.second) {
            return Err(EphemerisError::InvalidCivilDate(format!(
                "second {} out of range",
                self.second
            )));
        }
        Ok(())
    }
}

/// Julian Day pair for one civil instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDays {
    /// Universal Time.
    pub ut: f64,
    /// Terrestrial (ephemeris) Time, `ut + ΔT`.
    pub tt: f64,
}

/// Convert a validated civil time into UT and TT Julian Days.
pub fn civil_to_julian_days(
    civil: &CivilTime,
    calendar: Calendar,
) -> Result<JulianDays, EphemerisError> {
    civil.validate(calendar)?;
    let ut = julian_day(civil.year, civil.month, civil.fractional_day(), calendar);
    Ok(JulianDays {
        ut,
        tt: ut_to_tt(ut),
    })
}

/// Julian Day for a calendar date with fractional day (Meeus, ch. 7).
pub fn julian_day(year: i32, month: u32, day: f64, calendar: Calendar) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let b = match calendar {
        Calendar::Gregorian => {
            let a = (y / 100.0).floor();
            2.0 - a + (a / 4.0).floor()
        }
        Calendar::Julian => 0.0,
    };
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Number of days in a month under the given calendar.
pub fn days_in_month(year: i32, month: u32, calendar: Calendar) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year, calendar) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32, calendar: Calendar) -> bool {
    match calendar {
        Calendar::Gregorian => (year % 4 == 0 && year % 100 != 0) || year % 400 == 0,
        Calendar::Julian => year.rem_euclid(4) == 0,
    }
}

/// Convert a UT Julian Day to TT using [`delta_t_seconds`].
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + seconds_to_days(delta_t_seconds(decimal_year(jd_ut)))
}

/// Approximate decimal year for a Julian Day.
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomial expressions).
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if !(-500.0..2150.0).contains(&y) {
        let u = (y - 1820.0) / 100.0;
        return -20.0 + 32.0 * u * u;
    }
    if y < 500.0 {
        let u = y / 100.0;
        return poly(
            u,
            &[
                10_583.6,
                -1_014.41,
                33.783_11,
                -5.952_053,
                -0.179_845_2,
                0.022_174_192,
                0.009_031_652_1,
            ],
        );
    }
    if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        return poly(
            u,
            &[
                1_574.2,
                -556.01,
                71.234_72,
                0.319_781,
                -0.850_346_3,
                -0.005_050_998,
                0.008_357_207_3,
            ],
        );
    }
    if y < 1700.0 {
        let t = y - 1600.0;
        return poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7_129.0]);
    }
    if y < 1800.0 {
        let t = y - 1700.0;
        return poly(
            t,
            &[8.83, 0.1603, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0],
        );
    }
    if y < 1860.0 {
        let t = y - 1800.0;
        return poly(
            t,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        );
    }
    if y < 1900.0 {
        let t = y - 1860.0;
        return poly(
            t,
            &[
                7.62,
                0.5737,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        );
    }
    if y < 1920.0 {
        let t = y - 1900.0;
        return poly(t, &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197]);
    }
    if y < 1941.0 {
        let t = y - 1920.0;
        return poly(t, &[21.20, 0.844_93, -0.076_100, 0.002_093_6]);
    }
    if y < 1961.0 {
        let t = y - 1950.0;
        return poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2_547.0]);
    }
    if y < 1986.0 {
        let t = y - 1975.0;
        return poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0]);
    }
    if y < 2005.0 {
        let t = y - 2000.0;
        return poly(
            t,
            &[
                63.86,
                0.3345,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        );
    }
    if y < 2050.0 {
        let t = y - 2000.0;
        return poly(t, &[62.92, 0.322_17, 0.005_589]);
    }
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
}

/// Horner evaluation, coefficients in ascending order.
fn poly(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
