use crate::coordinates::*;

const TOLERANCE: f64 = 1e-9;

#[test]
fn test_boundary_angles() {
    let d = 10.0;
    let cases = [
        (0.0, 0.0, [d, 0.0, 0.0]),
        (90.0, 0.0, [0.0, d, 0.0]),
        (180.0, 0.0, [-d, 0.0, 0.0]),
        (270.0, 0.0, [0.0, -d, 0.0]),
        (360.0, 0.0, [d, 0.0, 0.0]),
        (0.0, 90.0, [0.0, 0.0, d]),
        (0.0, -90.0, [0.0, 0.0, -d]),
    ];

    for (ra, dec, expected) in cases {
        let p = celestial_to_cartesian(ra, dec, d);
        assert!((p.x - expected[0]).abs() < TOLERANCE, "x mismatch at ra={} dec={}", ra, dec);
        assert!((p.y - expected[1]).abs() < TOLERANCE, "y mismatch at ra={} dec={}", ra, dec);
        assert!((p.z - expected[2]).abs() < TOLERANCE, "z mismatch at ra={} dec={}", ra, dec);
    }
}

#[test]
fn test_z_depends_only_on_declination() {
    for dec in [-60.0, -12.5, 0.0, 33.0, 80.0] {
        let expected = 5.0 * f64::sin(f64::to_radians(dec));
        for ra in [0.0, 45.0, 123.4, 250.0, 359.0] {
            let p = celestial_to_cartesian(ra, dec, 5.0);
            assert!((p.z - expected).abs() < TOLERANCE);
        }
    }
}

#[test]
fn test_distance_scales_linearly() {
    let unit = celestial_to_cartesian(123.0, -41.0, 1.0);
    for d in [0.5, 2.0, 716.0, 91_648.0] {
        let p = celestial_to_cartesian(123.0, -41.0, d);
        assert!((p.x - unit.x * d).abs() < 1e-9 * d);
        assert!((p.y - unit.y * d).abs() < 1e-9 * d);
        assert!((p.z - unit.z * d).abs() < 1e-9 * d);
        assert!((p.magnitude() - d).abs() < 1e-9 * d);
    }
}

#[test]
fn test_celestial_roundtrip() {
    for ra in (0..360).step_by(15) {
        for dec in (-85..=85).step_by(17) {
            let (ra, dec) = (ra as f64 + 0.25, dec as f64);
            let d = 3.5;
            let back = celestial_to_cartesian(ra, dec, d).to_equatorial();

            assert!((back.ra_deg - ra).abs() < 1e-9, "ra {} -> {}", ra, back.ra_deg);
            assert!((back.dec_deg - dec).abs() < 1e-9, "dec {} -> {}", dec, back.dec_deg);
            assert!((back.distance - d).abs() < 1e-9);
        }
    }
}

#[test]
fn test_sexagesimal_ra_degrees() {
    for h in 0..24 {
        for m in [0, 17, 59] {
            for s in [0.0, 12.34, 59.99] {
                let text = format!("{:02}:{:02}:{}", h, m, s);
                let ra = Sexagesimal::parse(&text).unwrap();
                let expected = h as f64 * 15.0 + m as f64 * 0.25 + s / 240.0;
                assert!((ra.hours_to_degrees() - expected).abs() < 1e-4, "{}", text);
            }
        }
    }
}

#[test]
fn test_sexagesimal_form_matches_degree_form() {
    let ra = Sexagesimal::parse("05:34:31.97").unwrap();
    let dec = Sexagesimal::parse("+22:00:52.1").unwrap();

    let ra_deg = 5.0 * 15.0 + 34.0 * 0.25 + 31.97 / 240.0;
    let dec_deg = 22.0 + 0.0 / 60.0 + 52.1 / 3600.0;

    let a = sexagesimal_to_cartesian(&ra, &dec, 91_648.0);
    let b = celestial_to_cartesian(ra_deg, dec_deg, 91_648.0);
    assert!(a.distance_to(&b) < 1e-6);

    let back = a.to_equatorial();
    assert!((back.ra_deg - ra_deg).abs() < 1e-9);
    assert!((back.dec_deg - dec_deg).abs() < 1e-9);
}

#[test]
fn test_southern_declination() {
    let ra = Sexagesimal::parse("00:00:00").unwrap();
    let dec = Sexagesimal::parse("-45:00:00").unwrap();
    let p = sexagesimal_to_cartesian(&ra, &dec, 1.0);
    let half = std::f64::consts::FRAC_1_SQRT_2;
    assert!((p.x - half).abs() < TOLERANCE);
    assert!(p.y.abs() < TOLERANCE);
    assert!((p.z + half).abs() < TOLERANCE);
}
