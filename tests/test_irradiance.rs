use chrono::{Duration, TimeZone, Utc};
use chrono_tz::America::Chicago;

use solar_flux::angles::cos_solar_zenith;
use solar_flux::irradiance::*;
use solar_flux::types::{Atmosphere, GeoPoint};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

// ── Perihelion ──

#[test]
fn test_days_from_perihelion_known_values() {
    assert_eq!(days_from_perihelion(PERIHELION_DAY), 0.0);
    assert_eq!(days_from_perihelion(0), 3.0);
    assert_eq!(days_from_perihelion(185), 182.0);
    assert_approx!(days_from_perihelion(186), DAYS_IN_YEAR - 183.0, 1e-12);
    assert_approx!(days_from_perihelion(365), DAYS_IN_YEAR - 362.0, 1e-12);
}

#[test]
fn test_days_from_perihelion_bounded() {
    for day in 1..=365 {
        let d = days_from_perihelion(day);
        assert!(d >= 0.0 && d <= DAYS_IN_YEAR / 2.0, "Day {}: {}", day, d);
    }
}

#[test]
fn test_angle_from_perihelion_bounded_by_pi() {
    assert_eq!(angle_from_perihelion(PERIHELION_DAY), 0.0);
    for day in 0..=365 {
        let a = angle_from_perihelion(day);
        assert!(a >= 0.0 && a <= std::f64::consts::PI, "Day {}: {}", day, a);
    }
}

// ── Distance ──

#[test]
fn test_earth_sun_distance_extremes() {
    let perihelion = earth_sun_distance(PERIHELION_DAY);
    let aphelion = earth_sun_distance(PERIHELION_DAY + 182);
    assert_approx!(perihelion, SEMI_MAJOR_AXIS * (1.0 - ECCENTRICITY), 1e3);
    assert_approx!(aphelion, SEMI_MAJOR_AXIS * (1.0 + ECCENTRICITY), 1e7);
    for day in 0..=365 {
        let d = earth_sun_distance(day);
        assert!(d >= perihelion - 1.0 && d <= aphelion + 1e7, "Day {}: {}", day, d);
    }
}

#[test]
fn test_distance_ratio_largest_at_perihelion() {
    assert!(distance_ratio(PERIHELION_DAY) > distance_ratio(PERIHELION_DAY + 182));
    assert_approx!(distance_ratio(PERIHELION_DAY), 1.0438, 1e-3);
    assert_approx!(distance_ratio(PERIHELION_DAY + 182), 0.9764, 1e-3);
}

// ── Transmittance ──

#[test]
fn test_transmittance_defaults() {
    assert_eq!(transmittance(0.0, DEFAULT_TRANSMITTANCE_OFFSET), 0.75);
    assert_eq!(transmittance(100.0, DEFAULT_TRANSMITTANCE_OFFSET), 0.0);
    assert_eq!(Atmosphere::default().transmittance(), 0.75);
}

#[test]
fn test_transmittance_scales_with_cloud_cover() {
    assert_eq!(transmittance(50.0, 75.0), 0.375);
    assert_eq!(transmittance(0.0, 100.0), 1.0);
}

// ── FluxDensity ──

#[test]
fn test_flux_density_equator_noon_equinox() {
    let dt = Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    assert_approx!(flux_density(&dt, 0.0, 0.0), 1039.7, 1.0);
}

#[test]
fn test_flux_density_zero_below_horizon() {
    let dt = Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 0).unwrap();
    assert!(cos_solar_zenith(79, 0.0, 0.0, 0.0) < 0.0);
    assert_eq!(flux_density(&dt, 0.0, 0.0), 0.0);
}

#[test]
fn test_flux_density_zero_exactly_when_sun_down() {
    let start = Utc.with_ymd_and_hms(2026, 6, 21, 0, 0, 0).unwrap();
    for step in 0..48 {
        let dt = start + Duration::minutes(30 * step);
        for lat in (-80..=80).step_by(20) {
            for lon in (-180..180).step_by(45) {
                let (lat, lon) = (lat as f64, lon as f64);
                let flux = flux_density(&dt, lat, lon);
                let hour = step as f64 * 0.5;
                if cos_solar_zenith(171, hour, lat, lon) < 0.0 {
                    assert_eq!(flux, 0.0, "{} lat={} lon={}", dt, lat, lon);
                } else {
                    assert!(flux >= 0.0, "{} lat={} lon={} flux={}", dt, lat, lon, flux);
                }
            }
        }
    }
}

#[test]
fn test_flux_density_peaks_at_solar_noon() {
    let noon = Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let peak = flux_density(&noon, 0.0, 0.0);
    let midnight = Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 0).unwrap();
    for quarter in 0..96 {
        let dt = midnight + Duration::minutes(15 * quarter);
        assert!(flux_density(&dt, 0.0, 0.0) <= peak + 1e-9, "{}", dt);
    }
}

#[test]
fn test_flux_density_follows_longitude() {
    let noon_greenwich = Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let noon_west = Utc.with_ymd_and_hms(2026, 3, 21, 18, 0, 0).unwrap();
    assert_approx!(
        flux_density(&noon_west, 0.0, -90.0),
        flux_density(&noon_greenwich, 0.0, 0.0),
        1e-9
    );
}

#[test]
fn test_flux_density_from_local_time() {
    // 07:00 CDT is 12:00 UTC.
    let local = Chicago.with_ymd_and_hms(2026, 3, 21, 7, 0, 0).unwrap();
    let utc = Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    assert_eq!(
        flux_density(&local.with_timezone(&Utc), 39.8, -89.6),
        flux_density(&utc, 39.8, -89.6)
    );
}

#[test]
fn test_flux_density_with_clouds() {
    let dt = Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let clear = flux_density(&dt, 10.0, 5.0);
    let overcast = Atmosphere {
        cloud_cover: 100.0,
        ..Atmosphere::default()
    };
    let half = Atmosphere {
        cloud_cover: 50.0,
        ..Atmosphere::default()
    };
    assert_eq!(flux_density_with(&dt, 10.0, 5.0, &overcast), 0.0);
    assert_approx!(flux_density_with(&dt, 10.0, 5.0, &half), clear / 2.0, 1e-9);
}

#[test]
fn test_flux_density_never_exceeds_top_of_atmosphere() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let ceiling = SOLAR_CONSTANT * distance_ratio(PERIHELION_DAY) * 0.75;
    for day in (0..365).step_by(7) {
        let dt = start + Duration::days(day) + Duration::hours(12);
        for lat in (-90..=90).step_by(10) {
            let flux = flux_density(&dt, lat as f64, 0.0);
            assert!(flux <= ceiling + 1e-9, "{} lat={} flux={}", dt, lat, flux);
        }
    }
}

// ── SolarPositionAt ──

#[test]
fn test_solar_position_at_matches_flux_density() {
    let dt = Utc.with_ymd_and_hms(2026, 8, 2, 15, 30, 0).unwrap();
    let point = GeoPoint::new(35.0, -20.0);
    let sample = solar_position_at(&dt, point, &Atmosphere::default());
    assert_eq!(sample.day_of_year, 213);
    assert_approx!(sample.hour, 15.5, 1e-12);
    assert_eq!(sample.flux_density, flux_density(&dt, 35.0, -20.0));
    assert!(sample.sun_is_up());
    assert_eq!(sample.distance_ratio, distance_ratio(213));
}

#[test]
fn test_solar_position_at_night() {
    let dt = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
    let sample = solar_position_at(&dt, GeoPoint::new(35.0, 0.0), &Atmosphere::default());
    assert!(!sample.sun_is_up());
    assert_eq!(sample.flux_density, 0.0);
}

#[test]
fn test_solar_position_at_uses_atmosphere() {
    let dt = Utc.with_ymd_and_hms(2026, 8, 2, 12, 0, 0).unwrap();
    let point = GeoPoint::new(20.0, 10.0);
    let hazy = Atmosphere {
        cloud_cover: 40.0,
        offset: 60.0,
    };
    let sample = solar_position_at(&dt, point, &hazy);
    assert!(sample.sun_is_up());
    assert_eq!(sample.flux_density, flux_density_with(&dt, 20.0, 10.0, &hazy));
    assert_approx!(
        sample.flux_density,
        SOLAR_CONSTANT * sample.distance_ratio * sample.cos_solar_zenith * 0.36,
        1e-9
    );
}
