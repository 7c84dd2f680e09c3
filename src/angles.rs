use chrono::{DateTime, Datelike, Timelike, Utc};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const SOLAR_NOON: f64 = 12.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Whole days elapsed since January 1st of the same year (Jan 1 is day 0).
pub fn day_of_year(date: &DateTime<Utc>) -> i32 {
    date.ordinal0() as i32
}

pub fn hour_of_day(date: &DateTime<Utc>) -> f64 {
    date.hour() as f64
        + date.minute() as f64 / 60.0
        + (date.second() as f64 + date.nanosecond() as f64 / 1e9) / 3600.0
}

pub fn declination(day_of_year: i32) -> f64 {
    deg_to_rad(EARTH_AXIAL_TILT)
        * deg_to_rad((360.0 / 365.0) * (day_of_year + 284) as f64).sin()
}

/// Hours from solar noon at `longitude`, folded so the result is never
/// negative, then converted to radians. Local hours are not wrapped into
/// [0, 24).
pub fn hour_angle(hour: f64, longitude: f64) -> f64 {
    let local = hour + longitude / DEGREES_PER_HOUR;
    let folded = if local >= SOLAR_NOON {
        local - SOLAR_NOON
    } else {
        SOLAR_NOON - local
    };
    deg_to_rad(folded * DEGREES_PER_HOUR)
}

pub fn cos_solar_zenith(day_of_year: i32, hour: f64, latitude: f64, longitude: f64) -> f64 {
    let dec = declination(day_of_year);
    let ha = hour_angle(hour, longitude);
    let lat = deg_to_rad(latitude);
    lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos()
}

pub fn solar_zenith_angle(day_of_year: i32, hour: f64, latitude: f64, longitude: f64) -> f64 {
    rad_to_deg(
        cos_solar_zenith(day_of_year, hour, latitude, longitude)
            .clamp(-1.0, 1.0)
            .acos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hour_of_day_includes_minutes_and_seconds() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 1, 13, 30, 36).unwrap();
        assert!((hour_of_day(&dt) - 13.51).abs() < 1e-12);
    }

    #[test]
    fn folding_is_non_negative() {
        for h in 0..48 {
            let ha = hour_angle(h as f64 * 0.5, 0.0);
            assert!(ha >= 0.0, "hour={} ha={}", h as f64 * 0.5, ha);
        }
    }
}
