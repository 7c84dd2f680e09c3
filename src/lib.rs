pub mod angles;
pub mod animation;
pub mod error;
pub mod grid;
pub mod irradiance;
pub mod render;
pub mod types;

pub use angles::{
    cos_solar_zenith, day_of_year, declination, deg_to_rad, hour_angle, hour_of_day, rad_to_deg,
    solar_zenith_angle, DEGREES_PER_HOUR, EARTH_AXIAL_TILT, SOLAR_NOON,
};

pub use irradiance::{
    angle_from_perihelion, days_from_perihelion, distance_ratio, earth_sun_distance,
    flux_density, flux_density_with, solar_position_at, transmittance, AU,
    DAYS_IN_YEAR, DEFAULT_TRANSMITTANCE_OFFSET, ECCENTRICITY, PERIHELION_DAY, R_SUN,
    SEMI_MAJOR_AXIS, SOLAR_CONSTANT,
};

pub use grid::{axis_samples, meshgrid, tick_positions, LatLonGrid};

pub use animation::{build_frames, frame_interval_ms, frame_offset, FrameSequence, Frames};

pub use render::{
    viridis, ColorScale, PngFrameSink, RenderSink, Scene, COLOR_SCALE_MAX, COLOR_SCALE_MIN,
};

pub use error::{FluxError, Result};

pub use types::{
    Atmosphere, AxisWindow, Extent, FluxAnimConfig, FluxFrame, GeoPoint, IrradianceSample,
    MapOverlays,
};
