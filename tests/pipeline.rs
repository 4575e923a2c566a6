use zodiac_ephemeris::chart::{ALL_BODIES, CelestialBody, ChartError, Ephemeris, ZodiacSign};

#[test]
fn same_input_gives_identical_results() {
    let ephemeris = Ephemeris::default();
    let a = ephemeris.compute_all(Some("1987-07-04T18:45:12Z")).unwrap();
    let b = ephemeris.compute_all(Some("1987-07-04T18:45:59Z")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.iso_date(), "1987-07-04T18:45:00.000Z");
}

#[test]
fn every_reading_is_within_bounds() {
    let result = Ephemeris::default()
        .compute_all(Some("2024-06-01T00:00:00Z"))
        .unwrap();
    assert_eq!(result.readings.len(), ALL_BODIES.len());
    for reading in &result.readings {
        let p = &reading.position;
        assert!((0.0..360.0).contains(&p.longitude), "{}", reading.name);
        assert!(p.latitude.abs() < 18.0, "{}", reading.name);
        assert!(p.distance > 0.0, "{}", reading.name);
        assert_eq!(reading.zodiac.sign.index(), (p.longitude / 30.0).floor() as u8 % 12);
        assert_eq!(reading.zodiac.retrograde, p.speed_longitude < 0.0);
    }
}

#[test]
fn sun_crosses_into_aries_at_the_march_equinox() {
    let ephemeris = Ephemeris::default();
    let before = ephemeris
        .compute_body(Some("2024-03-19T12:00:00Z"), CelestialBody::Sun)
        .unwrap();
    let after = ephemeris
        .compute_body(Some("2024-03-20T12:00:00Z"), CelestialBody::Sun)
        .unwrap();
    assert_eq!(before.zodiac.sign, ZodiacSign::Pisces);
    assert_eq!(before.zodiac.degree, 29);
    assert_eq!(after.zodiac.sign, ZodiacSign::Aries);
    assert_eq!(after.zodiac.degree, 0);
}

#[test]
fn full_moon_is_opposite_the_sun() {
    // Full Moon of 2024-04-23 at 23:49 UTC
    let result = Ephemeris::default()
        .compute(
            Some("2024-04-23T23:49:00Z"),
            &[CelestialBody::Sun, CelestialBody::Moon],
        )
        .unwrap();
    let sun = result.readings[0].position.longitude;
    let moon = result.readings[1].position.longitude;
    let elongation = (moon - sun).rem_euclid(360.0);
    assert!((elongation - 180.0).abs() < 1.0, "{elongation}");
}

#[test]
fn mercury_station_shows_as_retrograde() {
    let mercury = Ephemeris::default()
        .compute_body(Some("2021-02-10T00:00:00Z"), CelestialBody::Mercury)
        .unwrap();
    assert!(mercury.zodiac.retrograde);
    assert_eq!(mercury.zodiac.sign, ZodiacSign::Aquarius);
}

#[test]
fn errors_carry_their_kind() {
    let ephemeris = Ephemeris::default();
    let err = ephemeris.compute_all(Some("31/12/1999")).unwrap_err();
    assert!(matches!(err, ChartError::InvalidDate { .. }));

    let err = ephemeris.compute_all(Some("3500-06-01")).unwrap_err();
    assert_eq!(err.kind(), "EphemerisRangeError");

    let err = CelestialBody::parse("Chiron").unwrap_err();
    assert_eq!(err.kind(), "InvalidBodyError");
}

#[test]
fn facade_reports_version() {
    assert_eq!(zodiac_ephemeris::version(), env!("CARGO_PKG_VERSION"));
}
