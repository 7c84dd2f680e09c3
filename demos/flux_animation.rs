use chrono::{TimeZone, Utc};

use solar_flux::animation::build_frames;
use solar_flux::irradiance::solar_position_at;
use solar_flux::render::PngFrameSink;
use solar_flux::types::{FluxAnimConfig, GeoPoint};

fn main() -> solar_flux::Result<()> {
    env_logger::init();

    let config = FluxAnimConfig {
        start: Utc.with_ymd_and_hms(2026, 3, 21, 0, 0, 0).unwrap(),
        geo_resolution: 0.5,
        ..FluxAnimConfig::default()
    };
    config.validate_animation(24, 2.0)?;

    let springfield = GeoPoint::new(39.8, -89.6);
    let noon_local = Utc.with_ymd_and_hms(2026, 3, 21, 18, 0, 0).unwrap();
    let sample = solar_position_at(&noon_local, springfield, &config.atmosphere);

    println!("=== Solar Flux Density Example ===");
    println!(
        "Location: Springfield, IL ({:.1}°N, {:.1}°W)",
        springfield.latitude, -springfield.longitude
    );
    println!("Date/Time: {}", noon_local);
    println!("Day of year: {}", sample.day_of_year);
    println!("Declination: {:.4} rad", sample.declination);
    println!("Hour Angle: {:.4} rad", sample.hour_angle);
    println!("cos(zenith): {:.4}", sample.cos_solar_zenith);
    println!("Distance ratio: {:.4}", sample.distance_ratio);
    println!("Flux density: {:.1} W/m²", sample.flux_density);
    println!();

    let frames = build_frames(&config, 24, 2.0);
    let (rows, cols) = frames.grid().shape();
    println!("--- Animation ---");
    println!("Grid: {} x {} cells", rows, cols);
    println!("Frame interval: {:.0} ms", frames.frame_interval_ms());

    let mut sink = PngFrameSink::new("flux_frames");
    let written = frames.run(&mut sink)?;
    println!("Wrote {} frames to {}", written.len(), sink.out_dir().display());
    Ok(())
}
