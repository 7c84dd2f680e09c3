use chrono::{DateTime, Utc};
use log::debug;
use ndarray::{Array2, Zip};

use crate::irradiance;
use crate::types::{Atmosphere, AxisWindow, FluxAnimConfig};

// Guards against `(max - min) / step` landing a hair above an integer.
const SAMPLE_EPSILON: f64 = 1e-9;

/// Half-open samples `min, min + step, ...` strictly below `max`. Empty when
/// the range is inverted or the step is not positive.
pub fn axis_samples(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(max > min) || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let count = ((max - min) / step - SAMPLE_EPSILON).ceil().max(0.0) as usize;
    (0..count).map(|k| min + k as f64 * step).collect()
}

/// Graticule positions for an axis, including `max` itself when it falls on
/// a tick.
pub fn tick_positions(window: &AxisWindow) -> Vec<f64> {
    axis_samples(window.min, window.max + 1.0, window.tick_step)
}

pub fn meshgrid(longitudes: &[f64], latitudes: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let shape = (latitudes.len(), longitudes.len());
    let lons = Array2::from_shape_fn(shape, |(_, j)| longitudes[j]);
    let lats = Array2::from_shape_fn(shape, |(i, _)| latitudes[i]);
    (lons, lats)
}

/// Regular lat/lon mesh. Rows run over latitude (ascending), columns over
/// longitude (ascending), so `flux[[i, j]]` belongs to `(lats[[i, j]], lons[[i, j]])`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub lons: Array2<f64>,
    pub lats: Array2<f64>,
}

impl LatLonGrid {
    pub fn new(longitude: &AxisWindow, latitude: &AxisWindow, resolution: f64) -> Self {
        let longitudes = axis_samples(longitude.min, longitude.max, resolution);
        let latitudes = axis_samples(latitude.min, latitude.max, resolution);
        let (lons, lats) = meshgrid(&longitudes, &latitudes);
        debug!(
            "built {}x{} grid at {} deg resolution",
            latitudes.len(),
            longitudes.len(),
            resolution
        );
        Self {
            longitudes,
            latitudes,
            lons,
            lats,
        }
    }

    pub fn from_config(config: &FluxAnimConfig) -> Self {
        Self::new(&config.longitude, &config.latitude, config.geo_resolution)
    }

    /// (rows, columns) = (latitudes, longitudes).
    pub fn shape(&self) -> (usize, usize) {
        self.lats.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lats.len()
    }

    /// Flux density at every cell, same layout as the mesh.
    pub fn evaluate(&self, date: &DateTime<Utc>, atmosphere: &Atmosphere) -> Array2<f64> {
        let cell = |&lat: &f64, &lon: &f64| irradiance::flux_density_with(date, lat, lon, atmosphere);

        #[cfg(feature = "threading")]
        let flux = Zip::from(&self.lats).and(&self.lons).par_map_collect(cell);

        #[cfg(not(feature = "threading"))]
        let flux = Zip::from(&self.lats).and(&self.lons).map_collect(cell);

        flux
    }
}
