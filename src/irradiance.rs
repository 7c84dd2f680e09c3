use std::f64::consts::PI;

use chrono::{DateTime, Utc};

use crate::angles;
use crate::types::{Atmosphere, GeoPoint, IrradianceSample};

/// Total solar irradiance at one astronomical unit, W/m².
pub const SOLAR_CONSTANT: f64 = 1361.0;

pub const DAYS_IN_YEAR: f64 = 365.265;
pub const PERIHELION_DAY: i32 = 3;
pub const SEMI_MAJOR_AXIS: f64 = 1.496e11 + 10.0;
pub const ECCENTRICITY: f64 = 0.0167;
pub const AU: f64 = 149_597_870_700.0;
pub const R_SUN: f64 = 6.957e8;

pub const DEFAULT_TRANSMITTANCE_OFFSET: f64 = 75.0;

pub fn days_from_perihelion(day_of_year: i32) -> f64 {
    let n = (day_of_year - PERIHELION_DAY).abs() as f64;
    if n > DAYS_IN_YEAR / 2.0 {
        DAYS_IN_YEAR - n
    } else {
        n
    }
}

pub fn angle_from_perihelion(day_of_year: i32) -> f64 {
    2.0 * PI * days_from_perihelion(day_of_year) / DAYS_IN_YEAR
}

/// Earth-Sun distance in metres from the Kepler ellipse radius.
pub fn earth_sun_distance(day_of_year: i32) -> f64 {
    let theta = angle_from_perihelion(day_of_year);
    SEMI_MAJOR_AXIS * (1.0 - ECCENTRICITY.powi(2)) / (1.0 + ECCENTRICITY * theta.cos())
}

/// Inverse-square scaling of irradiance relative to a reference distance of
/// one AU plus the solar radius.
pub fn distance_ratio(day_of_year: i32) -> f64 {
    ((R_SUN + AU) / earth_sun_distance(day_of_year)).powi(2)
}

pub fn transmittance(cloud_cover: f64, offset: f64) -> f64 {
    ((100.0 - cloud_cover) / 100.0) * (offset / 100.0)
}

impl Atmosphere {
    pub fn transmittance(&self) -> f64 {
        transmittance(self.cloud_cover, self.offset)
    }
}

pub fn flux_density(date: &DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    flux_density_with(date, latitude, longitude, &Atmosphere::default())
}

/// Clear-sky flux density in W/m². Exactly zero whenever the sun is below
/// the horizon.
pub fn flux_density_with(
    date: &DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    atmosphere: &Atmosphere,
) -> f64 {
    let day = angles::day_of_year(date);
    let hour = angles::hour_of_day(date);
    let cos_sz = angles::cos_solar_zenith(day, hour, latitude, longitude);
    if cos_sz < 0.0 {
        return 0.0;
    }
    SOLAR_CONSTANT * distance_ratio(day) * cos_sz * atmosphere.transmittance()
}

pub fn solar_position_at(
    date: &DateTime<Utc>,
    point: GeoPoint,
    atmosphere: &Atmosphere,
) -> IrradianceSample {
    let day = angles::day_of_year(date);
    let hour = angles::hour_of_day(date);
    IrradianceSample {
        day_of_year: day,
        hour,
        declination: angles::declination(day),
        hour_angle: angles::hour_angle(hour, point.longitude),
        cos_solar_zenith: angles::cos_solar_zenith(day, hour, point.latitude, point.longitude),
        distance_ratio: distance_ratio(day),
        flux_density: flux_density_with(date, point.latitude, point.longitude, atmosphere),
    }
}
