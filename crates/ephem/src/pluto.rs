//! Keplerian orbit for Pluto, which has no VSOP87 series.
//!
//! Elements and rates are the JPL "approximate positions of the planets"
//! set valid from 3000 BC to 3000 AD, referred to the J2000 ecliptic and
//! equinox, including the `b·T²` mean-anomaly term of the long-span fit.

use zodiac_core::angle::signed_degrees;
use zodiac_core::vector::Vector3;

/// Element value at J2000 plus its rate per Julian century.
#[derive(Debug, Clone, Copy)]
pub struct Secular {
    pub at_epoch: f64,
    pub per_century: f64,
}

impl Secular {
    const fn new(at_epoch: f64, per_century: f64) -> Self {
        Self {
            at_epoch,
            per_century,
        }
    }

    #[inline]
    fn at(self, t: f64) -> f64 {
        self.at_epoch + self.per_century * t
    }
}

/// Osculating elements with linear rates.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub semi_major_axis: Secular,
    pub eccentricity: Secular,
    /// Inclination (degrees).
    pub inclination: Secular,
    /// Mean longitude (degrees).
    pub mean_longitude: Secular,
    /// Longitude of perihelion (degrees).
    pub perihelion_longitude: Secular,
    /// Longitude of the ascending node (degrees).
    pub node_longitude: Secular,
    /// Coefficient of the `T²` mean-anomaly term (degrees).
    pub mean_anomaly_t2: f64,
}

impl OrbitalElements {
    /// Heliocentric ecliptic (J2000) rectangular position in AU at `t`
    /// Julian centuries (TT) from J2000.
    pub fn heliocentric(&self, t: f64) -> Vector3 {
        let a = self.semi_major_axis.at(t);
        let e = self.eccentricity.at(t);
        let inc = self.inclination.at(t).to_radians();
        let peri = self.perihelion_longitude.at(t);
        let node = self.node_longitude.at(t);

        let arg_peri = (peri - node).to_radians();
        let mean_anomaly = self.mean_longitude.at(t) - peri + self.mean_anomaly_t2 * t * t;
        let ecc_anomaly = solve_kepler(signed_degrees(mean_anomaly).to_radians(), e);
        let x_orb = a * (ecc_anomaly.cos() - e);
        let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

        let (sin_w, cos_w) = arg_peri.sin_cos();
        let (sin_o, cos_o) = node.to_radians().sin_cos();
        let (sin_i, cos_i) = inc.sin_cos();

        [
            (cos_w * cos_o - sin_w * sin_o * cos_i) * x_orb
                + (-sin_w * cos_o - cos_w * sin_o * cos_i) * y_orb,
            (cos_w * sin_o + sin_w * cos_o * cos_i) * x_orb
                + (-sin_w * sin_o + cos_w * cos_o * cos_i) * y_orb,
            (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
        ]
    }
}

/// Solve Kepler's equation `E - e·sin(E) = M` by Newton-Raphson.
///
/// `mean_anomaly` in radians; returns the eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..30 {
        let delta = ea - eccentricity * ea.sin() - mean_anomaly;
        ea -= delta / (1.0 - eccentricity * ea.cos());
        if delta.abs() < 1e-14 {
            break;
        }
    }
    ea
}

pub const PLUTO: OrbitalElements = OrbitalElements {
    semi_major_axis: Secular::new(39.486_860_35, 0.004_497_51),
    eccentricity: Secular::new(0.248_852_38, 0.000_060_16),
    inclination: Secular::new(17.141_042_60, 0.000_005_01),
    mean_longitude: Secular::new(238.965_350_11, 145.180_429_03),
    perihelion_longitude: Secular::new(224.097_025_98, -0.009_688_27),
    node_longitude: Secular::new(110.301_673_76, -0.008_099_81),
    mean_anomaly_t2: -0.012_627_24,
};

#[cfg(test)]
mod tests {
    use super::*;
    use zodiac_core::vector::norm;

    #[test]
    fn kepler_circular_orbit() {
        let ea = solve_kepler(1.0, 0.0);
        assert!((ea - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kepler_residual_is_tiny_for_eccentric_orbits() {
        for &e in &[0.0167, 0.2056, 0.2488] {
            for step in 0..12 {
                let m = -3.0 + step as f64 * 0.5;
                let ea = solve_kepler(m, e);
                let residual = ea - e * ea.sin() - m;
                assert!(residual.abs() < 1e-12, "e={e} m={m} residual={residual}");
            }
        }
    }

    #[test]
    fn distance_stays_between_perihelion_and_aphelion() {
        for t in [-30.0, -5.0, 0.0, 0.25, 0.5, 9.9] {
            let r = norm(&PLUTO.heliocentric(t));
            assert!((29.0..50.5).contains(&r), "t={t} r={r}");
        }
    }

    #[test]
    fn perihelion_passage_in_1989() {
        // Pluto reached perihelion in September 1989 at 29.66 AU
        let r = norm(&PLUTO.heliocentric(-0.103));
        assert!((r - 29.66).abs() < 0.05, "r={r}");
    }
}
