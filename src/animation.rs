use std::iter::FusedIterator;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::error::{FluxError, Result};
use crate::grid::LatLonGrid;
use crate::render::{RenderSink, Scene};
use crate::types::{FluxAnimConfig, FluxFrame};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

pub fn frame_interval_ms(frames_per_second: f64) -> f64 {
    1000.0 / frames_per_second
}

/// Offset of frame `index` from the start, or `None` when it does not fit a
/// `Duration`.
pub fn frame_offset(index: usize, hours_per_frame: f64) -> Option<Duration> {
    let millis = (index as f64 * hours_per_frame * MILLIS_PER_HOUR).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

impl FluxAnimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Opt-in checks; `build_frames` itself accepts anything and produces
    /// degenerate output for bad windows or steps.
    pub fn validate(&self) -> Result<()> {
        if !(self.geo_resolution > 0.0) {
            return Err(FluxError::InvalidResolution(self.geo_resolution));
        }
        if !(self.hours_per_frame > 0.0) || self.frame_time(1).is_none() {
            return Err(FluxError::InvalidFrameStep(self.hours_per_frame));
        }
        for (axis, window) in [("longitude", &self.longitude), ("latitude", &self.latitude)] {
            if !(window.min < window.max) {
                return Err(FluxError::EmptyWindow {
                    axis,
                    min: window.min,
                    max: window.max,
                });
            }
            if !(window.tick_step > 0.0) {
                return Err(FluxError::InvalidTickStep {
                    axis,
                    step: window.tick_step,
                });
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the checks that depend on the
    /// animation itself: a positive frame rate and a last frame that still
    /// lands inside chrono's date range.
    pub fn validate_animation(&self, frame_count: usize, frames_per_second: f64) -> Result<()> {
        self.validate()?;
        if !(frames_per_second > 0.0) || !frames_per_second.is_finite() {
            return Err(FluxError::InvalidFrameRate(frames_per_second));
        }
        if frame_count > 0 && self.frame_time(frame_count - 1).is_none() {
            return Err(FluxError::FrameOutOfRange {
                index: frame_count - 1,
                hours_per_frame: self.hours_per_frame,
            });
        }
        Ok(())
    }

    pub fn frame_time(&self, index: usize) -> Option<DateTime<Utc>> {
        self.start
            .checked_add_signed(frame_offset(index, self.hours_per_frame)?)
    }

    /// Number of leading frames out of `frame_count` whose timestamps are
    /// representable. Offsets grow in magnitude with the index, so the
    /// representable frames form a prefix.
    fn representable_frames(&self, frame_count: usize) -> usize {
        let fits = |n: usize| n == 0 || self.frame_time(n - 1).is_some();
        if fits(frame_count) {
            return frame_count;
        }
        let (mut lo, mut hi) = (0, frame_count);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// A finite run of frames over a grid fixed at build time. Frames are
/// computed on demand; call [`FrameSequence::iter`] again to restart.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    config: FluxAnimConfig,
    grid: LatLonGrid,
    frame_count: usize,
    frame_interval_ms: f64,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frame_count
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    pub fn config(&self) -> &FluxAnimConfig {
        &self.config
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    pub fn scene(&self) -> Scene {
        Scene::from_config(&self.config, self.frame_interval_ms)
    }

    pub fn frame(&self, index: usize) -> Option<FluxFrame> {
        if index >= self.frame_count {
            return None;
        }
        let timestamp = self.config.frame_time(index)?;
        debug!("evaluating frame {} at {}", index, timestamp);
        Some(FluxFrame {
            index,
            timestamp,
            flux: self.grid.evaluate(&timestamp, &self.config.atmosphere),
        })
    }

    pub fn iter(&self) -> Frames<'_> {
        Frames {
            sequence: self,
            next: 0,
        }
    }

    /// Initialises `sink` and draws every frame in order.
    pub fn run<S: RenderSink>(&self, sink: &mut S) -> Result<Vec<S::Handle>> {
        let scene = self.scene();
        let (rows, cols) = self.grid.shape();
        info!(
            "rendering {} frames on a {}x{} grid, {:.0} ms apart",
            self.frame_count, rows, cols, self.frame_interval_ms
        );
        sink.init(&scene)?;
        let handles = self
            .iter()
            .map(|frame| sink.draw(&scene, &frame))
            .collect::<Result<Vec<_>>>()?;
        info!("rendered {} frames", handles.len());
        Ok(handles)
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = FluxFrame;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Frames<'a> {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Frames<'a> {
    sequence: &'a FrameSequence,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = FluxFrame;

    fn next(&mut self) -> Option<FluxFrame> {
        if self.next >= self.sequence.frame_count {
            return None;
        }
        let frame = self.sequence.frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.frame_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}

/// Builds the grid once from `config` and returns the lazy frame sequence.
/// Frames whose timestamps fall outside chrono's date range are dropped from
/// the end of the sequence.
pub fn build_frames(config: &FluxAnimConfig, frame_count: usize, frames_per_second: f64) -> FrameSequence {
    let representable = config.representable_frames(frame_count);
    if representable < frame_count {
        warn!(
            "only {} of {} frames fit the date range at {} hours per frame",
            representable, frame_count, config.hours_per_frame
        );
    }
    FrameSequence {
        config: config.clone(),
        grid: LatLonGrid::from_config(config),
        frame_count: representable,
        frame_interval_ms: frame_interval_ms(frames_per_second),
    }
}
