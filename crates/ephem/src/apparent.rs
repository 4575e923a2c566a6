//! Geocentric apparent ecliptic coordinates referred to the true equinox of date.
//!
//! Planets come from the VSOP87D series (heliocentric, equinox of date), the
//! Moon from the ELP-2000/82 terms in `astro`, and Pluto from its Keplerian
//! orbit precessed to the date. Positions are corrected for light-time, the
//! FK5 frame, annual aberration, and nutation in longitude.

use astro::{aberr, lunar, nutation, sun};
use vsop87::{SphericalCoordinates, vsop87d};
use zodiac_core::angle::{arcsec_to_deg, normalize_degrees};
use zodiac_core::constants::{AU_KM, LIGHT_TIME_DAYS_PER_AU};
use zodiac_core::time::centuries_since_j2000;
use zodiac_core::vector::{Vector3, from_spherical, norm, sub, to_spherical};

use crate::bodies::{self, BodyId};
use crate::pluto::PLUTO;

/// Constant of annual aberration (arcseconds).
const ABERRATION_ARCSEC: f64 = 20.495_52;

/// Ecliptic longitude/latitude in degrees and distance in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spherical {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
}

/// Apparent geocentric position of `body` at a TT Julian Day.
///
/// Returns `None` for ids outside the ten-body set.
pub(crate) fn apparent_position(body: BodyId, jd_tt: f64) -> Option<Spherical> {
    let dpsi = nutation::nutation(jd_tt).0.to_degrees();

    if body == bodies::MOON {
        // Lunar theory is already referred to the mean equinox of date
        let (point, distance_km) = lunar::geocent_ecl_pos(jd_tt);
        return Some(Spherical {
            longitude: normalize_degrees(point.long.to_degrees() + dpsi),
            latitude: point.lat.to_degrees(),
            distance: distance_km / AU_KM,
        });
    }

    let earth = vsop87d::earth(jd_tt);
    let (sun_lon, sun_lat) = sun::ecl_coords_to_FK5(
        jd_tt,
        earth.longitude() + std::f64::consts::PI,
        -earth.latitude(),
    );
    let sun_lon = sun_lon.to_degrees();

    if body == bodies::SUN {
        let aberration = aberr::sol_aberr(earth.distance()).to_degrees();
        return Some(Spherical {
            longitude: normalize_degrees(sun_lon + aberration + dpsi),
            latitude: sun_lat.to_degrees(),
            distance: earth.distance(),
        });
    }

    let heliocentric = heliocentric_series(body)?;
    let observer = rectangular(&earth);
    let geocentric = light_time_corrected(jd_tt, &observer, heliocentric);

    let (lon, lat, distance) = to_spherical(&geocentric);
    let (lon, lat) = sun::ecl_coords_to_FK5(jd_tt, lon.to_radians(), lat.to_radians());
    let (lon, lat) = (lon.to_degrees(), lat.to_degrees());
    let (d_lon, d_lat) = annual_aberration(lon, lat, sun_lon);

    Some(Spherical {
        longitude: normalize_degrees(lon + d_lon + dpsi),
        latitude: lat + d_lat,
        distance,
    })
}

/// Heliocentric position (AU, ecliptic and equinox of date) as a function of TT.
fn heliocentric_series(body: BodyId) -> Option<fn(f64) -> Vector3> {
    let series: fn(f64) -> Vector3 = match body {
        bodies::MERCURY => |jd| rectangular(&vsop87d::mercury(jd)),
        bodies::VENUS => |jd| rectangular(&vsop87d::venus(jd)),
        bodies::MARS => |jd| rectangular(&vsop87d::mars(jd)),
        bodies::JUPITER => |jd| rectangular(&vsop87d::jupiter(jd)),
        bodies::SATURN => |jd| rectangular(&vsop87d::saturn(jd)),
        bodies::URANUS => |jd| rectangular(&vsop87d::uranus(jd)),
        bodies::NEPTUNE => |jd| rectangular(&vsop87d::neptune(jd)),
        bodies::PLUTO => pluto_of_date,
        _ => return None,
    };
    Some(series)
}

fn rectangular(coords: &SphericalCoordinates) -> Vector3 {
    from_spherical(
        coords.longitude().to_degrees(),
        coords.latitude().to_degrees(),
        coords.distance(),
    )
}

fn pluto_of_date(jd_tt: f64) -> Vector3 {
    let t = centuries_since_j2000(jd_tt);
    let (lon, lat, r) = to_spherical(&PLUTO.heliocentric(t));
    let (lon, lat) = precess_from_j2000(lon, lat, t);
    from_spherical(lon, lat, r)
}

/// Geocentric vector to a planet seen where it was when its light left.
fn light_time_corrected(
    jd_tt: f64,
    observer: &Vector3,
    heliocentric: impl Fn(f64) -> Vector3,
) -> Vector3 {
    let mut tau = 0.0;
    let mut geocentric = sub(&heliocentric(jd_tt), observer);
    for _ in 0..2 {
        tau = norm(&geocentric) * LIGHT_TIME_DAYS_PER_AU;
        geocentric = sub(&heliocentric(jd_tt - tau), observer);
    }
    tracing::trace!(tau, "light-time iteration converged");
    geocentric
}

/// Rigorous precession of ecliptic coordinates from J2000 to the equinox
/// of date, `t` Julian centuries after J2000 (Meeus, ch. 21).
fn precess_from_j2000(lon: f64, lat: f64, t: f64) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let eta = arcsec_to_deg(47.0029 * t - 0.033_02 * t2 + 0.000_060 * t3).to_radians();
    let pi = 174.876_384 - arcsec_to_deg(869.8089 * t - 0.035_36 * t2);
    let p = arcsec_to_deg(5_029.0966 * t + 1.111_13 * t2 - 0.000_006 * t3);

    let lat_r = lat.to_radians();
    let node_offset = (pi - lon).to_radians();
    let a = eta.cos() * lat_r.cos() * node_offset.cos() - eta.sin() * lat_r.sin();
    let b = lat_r.cos() * node_offset.sin();
    let c = eta.cos() * lat_r.sin() + eta.sin() * lat_r.cos() * node_offset.cos();

    let precessed_lon = p + pi - b.atan2(a).to_degrees();
    (
        normalize_degrees(precessed_lon),
        c.clamp(-1.0, 1.0).asin().to_degrees(),
    )
}

/// Annual aberration `(Δλ, Δβ)` in degrees given the Sun's true longitude.
fn annual_aberration(lon: f64, lat: f64, sun_lon: f64) -> (f64, f64) {
    let kappa = arcsec_to_deg(ABERRATION_ARCSEC);
    let offset = (sun_lon - lon).to_radians();
    let lat_r = lat.to_radians();
    let cos_lat = lat_r.cos().max(1e-9);
    (
        -kappa * offset.cos() / cos_lat,
        -kappa * offset.sin() * lat_r.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precession_is_identity_at_j2000() {
        let (lon, lat) = precess_from_j2000(123.456, 1.234, 0.0);
        assert!((lon - 123.456).abs() < 1e-9);
        assert!((lat - 1.234).abs() < 1e-9);
    }

    #[test]
    fn precession_advances_longitude_by_about_fifty_arcsec_per_year() {
        let (lon, _) = precess_from_j2000(100.0, 0.0, 0.01);
        let advance_arcsec = (lon - 100.0) * 3_600.0;
        assert!((advance_arcsec - 50.29).abs() < 0.5, "{advance_arcsec}");
    }

    #[test]
    fn aberration_lags_a_body_in_conjunction_with_the_sun() {
        let (d_lon, d_lat) = annual_aberration(90.0, 0.0, 90.0);
        assert!((d_lon * 3_600.0 + ABERRATION_ARCSEC).abs() < 1e-9);
        assert_eq!(d_lat, 0.0);
    }

    #[test]
    fn sun_1992_october_13() {
        // Meeus example 25.b: apparent longitude 199°54'21.56" at JDE 2448908.5
        let sun = apparent_position(bodies::SUN, 2_448_908.5).unwrap();
        assert!((sun.longitude - 199.905_99).abs() < 0.000_3, "{}", sun.longitude);
        assert!(sun.latitude.abs() < 0.001, "{}", sun.latitude);
        assert!((sun.distance - 0.997_608).abs() < 1e-5, "{}", sun.distance);
    }

    #[test]
    fn moon_1992_april_12() {
        // Meeus example 47.a: apparent λ 133.167265°, β -3.229126°, 368409.7 km
        let moon = apparent_position(bodies::MOON, 2_448_724.5).unwrap();
        assert!((moon.longitude - 133.167_265).abs() < 0.000_1, "{}", moon.longitude);
        assert!((moon.latitude + 3.229_126).abs() < 0.000_1, "{}", moon.latitude);
        let distance_km = moon.distance * AU_KM;
        assert!((distance_km - 368_409.7).abs() < 1.0, "{distance_km}");
    }

    #[test]
    fn venus_1992_december_20() {
        // Meeus example 33.a: apparent λ 313.08102°, β -2.08474°
        let venus = apparent_position(bodies::VENUS, 2_448_976.5).unwrap();
        assert!((venus.longitude - 313.081_02).abs() < 0.001, "{}", venus.longitude);
        assert!((venus.latitude + 2.084_74).abs() < 0.001, "{}", venus.latitude);
        assert!((venus.distance - 0.910_947).abs() < 1e-4, "{}", venus.distance);
    }

    #[test]
    fn sun_at_j2000_is_in_capricorn() {
        let sun = apparent_position(bodies::SUN, 2_451_545.0).unwrap();
        // 10°22'08" Capricorn
        assert!((sun.longitude - 280.368_9).abs() < 0.000_5, "{}", sun.longitude);
        assert!(sun.latitude.abs() < 0.001);
        assert!((sun.distance - 0.983_3).abs() < 0.000_1);
    }

    #[test]
    fn unknown_body_has_no_position() {
        assert!(apparent_position(42, 2_451_545.0).is_none());
    }
}
