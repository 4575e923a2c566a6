//! Shared constants, angle helpers, and time primitives for the zodiac ephemeris workspace.

/// Astronomical constants (degrees, days, and astronomical units unless stated otherwise).
pub mod constants {
    /// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Days per Julian century.
    pub const DAYS_PER_CENTURY: f64 = 36_525.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Light travel time for one astronomical unit, in days.
    pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;
    /// Arcseconds per degree.
    pub const ARCSEC_PER_DEGREE: f64 = 3_600.0;
    /// Width of one zodiac sign in degrees.
    pub const SIGN_WIDTH_DEG: f64 = 30.0;
}

/// Angle helpers.
pub mod angle {
    /// Wrap an angle in degrees into `[0, 360)`.
    ///
    /// Uses `((x % 360) + 360) % 360` so negative inputs and values slightly
    /// above a full turn land in range.
    #[inline]
    pub fn normalize_degrees(deg: f64) -> f64 {
        ((deg % 360.0) + 360.0) % 360.0
    }

    /// Wrap an angle in degrees into `[-180, 180)`.
    #[inline]
    pub fn signed_degrees(deg: f64) -> f64 {
        let wrapped = normalize_degrees(deg);
        if wrapped >= 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Convert arcseconds to degrees.
    #[inline]
    pub fn arcsec_to_deg(arcsec: f64) -> f64 {
        arcsec / super::constants::ARCSEC_PER_DEGREE
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY};

    /// Julian centuries elapsed since J2000.0.
    #[inline]
    pub fn centuries_since_j2000(jd: f64) -> f64 {
        (jd - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in astronomical units.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Convert rectangular coordinates to spherical `(longitude_deg, latitude_deg, radius)`.
    ///
    /// Longitude is wrapped into `[0, 360)`.
    pub fn to_spherical(v: &Vector3) -> (f64, f64, f64) {
        let r = norm(v);
        if r == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let lon = super::angle::normalize_degrees(v[1].atan2(v[0]).to_degrees());
        let lat = (v[2] / r).asin().to_degrees();
        (lon, lat, r)
    }

    /// Rectangular coordinates from `(longitude_deg, latitude_deg, radius)`.
    pub fn from_spherical(lon_deg: f64, lat_deg: f64, r: f64) -> Vector3 {
        let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
        let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
        [r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat]
    }
}
