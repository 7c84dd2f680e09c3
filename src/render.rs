//! Rendering sinks.
//!
//! The model and the frame driver only produce numbers. Anything that draws
//! them implements [`RenderSink`]: it is initialised once with a [`Scene`]
//! (extent, colour scale, overlays, graticule) and then handed frames in
//! order. [`PngFrameSink`] is the built-in sink and writes one PNG per frame.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::{debug, warn};

use crate::error::Result;
use crate::grid::tick_positions;
use crate::types::{Extent, FluxAnimConfig, FluxFrame, MapOverlays};

pub const COLOR_SCALE_MIN: f64 = 0.0;
pub const COLOR_SCALE_MAX: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            min: COLOR_SCALE_MIN,
            max: COLOR_SCALE_MAX,
        }
    }
}

impl ColorScale {
    /// Position of `value` on the scale, clamped to [0, 1].
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span > 0.0) || value.is_nan() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> [u8; 3] {
        viridis(self.normalize(value))
    }
}

// Evenly spaced samples of matplotlib's viridis.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

pub fn viridis(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Everything a sink needs that does not change from frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub extent: Extent,
    pub color_scale: ColorScale,
    pub overlays: MapOverlays,
    pub meridians: Vec<f64>,
    pub parallels: Vec<f64>,
    /// Suggested delay between frames, milliseconds.
    pub frame_interval_ms: f64,
    pub resource_path: Option<PathBuf>,
}

impl Scene {
    pub fn from_config(config: &FluxAnimConfig, frame_interval_ms: f64) -> Self {
        Self {
            extent: Extent {
                min_lon: config.longitude.min,
                max_lon: config.longitude.max,
                min_lat: config.latitude.min,
                max_lat: config.latitude.max,
            },
            color_scale: ColorScale::default(),
            overlays: config.overlays,
            meridians: tick_positions(&config.longitude),
            parallels: tick_positions(&config.latitude),
            frame_interval_ms,
            resource_path: config.resource_path.clone(),
        }
    }
}

pub trait RenderSink {
    /// Opaque result of drawing one frame.
    type Handle;

    /// Called once before the first frame.
    fn init(&mut self, scene: &Scene) -> Result<()>;

    fn draw(&mut self, scene: &Scene, frame: &FluxFrame) -> Result<Self::Handle>;
}

const GRATICULE: Rgb<u8> = Rgb([255, 255, 255]);

/// Writes `frame_NNNN.png` files, one pixel per grid cell, lowest latitude
/// on the bottom row.
#[derive(Debug, Clone)]
pub struct PngFrameSink {
    out_dir: PathBuf,
    graticule: bool,
}

impl PngFrameSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            graticule: true,
        }
    }

    pub fn with_graticule(mut self, graticule: bool) -> Self {
        self.graticule = graticule;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.out_dir.join(format!("frame_{index:04}.png"))
    }

    pub fn render(&self, scene: &Scene, frame: &FluxFrame) -> RgbImage {
        let (rows, cols) = frame.flux.dim();
        let mut img = RgbImage::new(cols as u32, rows as u32);
        for ((r, c), &value) in frame.flux.indexed_iter() {
            let y = rows - 1 - r;
            img.put_pixel(c as u32, y as u32, Rgb(scene.color_scale.color(value)));
        }
        if self.graticule {
            draw_graticule(&mut img, scene);
        }
        img
    }
}

fn draw_graticule(img: &mut RgbImage, scene: &Scene) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let extent = &scene.extent;
    let lon_span = extent.max_lon - extent.min_lon;
    let lat_span = extent.max_lat - extent.min_lat;
    if !(lon_span > 0.0) || !(lat_span > 0.0) {
        return;
    }

    for &lon in &scene.meridians {
        let x = ((lon - extent.min_lon) / lon_span * width as f64).round() as i64;
        if (0..width as i64).contains(&x) {
            for y in 0..height {
                img.put_pixel(x as u32, y, GRATICULE);
            }
        }
    }
    for &lat in &scene.parallels {
        let from_bottom = ((lat - extent.min_lat) / lat_span * height as f64).round() as i64;
        let y = height as i64 - 1 - from_bottom;
        if (0..height as i64).contains(&y) {
            for x in 0..width {
                img.put_pixel(x, y as u32, GRATICULE);
            }
        }
    }
}

impl RenderSink for PngFrameSink {
    type Handle = PathBuf;

    fn init(&mut self, scene: &Scene) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        if scene.overlays.any() {
            warn!(
                "PngFrameSink cannot draw map overlays ({:?}); map data at {:?} ignored",
                scene.overlays, scene.resource_path
            );
        }
        Ok(())
    }

    fn draw(&mut self, scene: &Scene, frame: &FluxFrame) -> Result<PathBuf> {
        let path = self.frame_path(frame.index);
        self.render(scene, frame).save(&path)?;
        debug!("wrote {} ({})", path.display(), frame.label());
        Ok(path)
    }
}
