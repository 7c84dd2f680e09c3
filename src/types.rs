use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Atmospheric attenuation inputs, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub cloud_cover: f64,
    pub offset: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            cloud_cover: 0.0,
            offset: 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrradianceSample {
    pub day_of_year: i32,
    pub hour: f64,
    pub declination: f64,
    pub hour_angle: f64,
    pub cos_solar_zenith: f64,
    pub distance_ratio: f64,
    pub flux_density: f64,
}

impl IrradianceSample {
    pub fn sun_is_up(&self) -> bool {
        self.cos_solar_zenith >= 0.0
    }
}

/// One axis of the plotted window. `tick_step` only controls where graticule
/// lines and labels go; sampling density comes from the geo resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWindow {
    pub min: f64,
    pub max: f64,
    pub tick_step: f64,
}

impl AxisWindow {
    pub const fn new(min: f64, max: f64, tick_step: f64) -> Self {
        Self {
            min,
            max,
            tick_step,
        }
    }

    pub const fn longitude() -> Self {
        Self::new(-180.0, 180.0, 60.0)
    }

    pub const fn latitude() -> Self {
        Self::new(-90.0, 90.0, 30.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOverlays {
    pub coastlines: bool,
    pub countries: bool,
    pub states: bool,
}

impl MapOverlays {
    pub fn any(&self) -> bool {
        self.coastlines || self.countries || self.states
    }
}

impl Default for MapOverlays {
    fn default() -> Self {
        Self {
            coastlines: true,
            countries: false,
            states: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxAnimConfig {
    pub start: DateTime<Utc>,
    pub geo_resolution: f64,
    pub hours_per_frame: f64,
    pub longitude: AxisWindow,
    pub latitude: AxisWindow,
    pub overlays: MapOverlays,
    pub atmosphere: Atmosphere,
    /// Directory holding map data for the rendering sink (coastlines etc.).
    pub resource_path: Option<PathBuf>,
}

impl Default for FluxAnimConfig {
    fn default() -> Self {
        Self {
            start: Utc::now(),
            geo_resolution: 1.0,
            hours_per_frame: 2.0,
            longitude: AxisWindow::longitude(),
            latitude: AxisWindow::latitude(),
            overlays: MapOverlays::default(),
            atmosphere: Atmosphere::default(),
            resource_path: None,
        }
    }
}

/// Plotted rectangle in degrees, the order an image extent expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FluxFrame {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub flux: Array2<f64>,
}

impl FluxFrame {
    pub fn label(&self) -> String {
        self.timestamp.format("%b %d, %Y, %H:%M:%S UTC").to_string()
    }
}
