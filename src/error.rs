use thiserror::Error;

#[derive(Debug, Error)]
pub enum FluxError {
    #[error("geo resolution must be positive, got {0}")]
    InvalidResolution(f64),

    #[error("{axis} window is empty: min {min} >= max {max}")]
    EmptyWindow {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{axis} tick step must be positive, got {step}")]
    InvalidTickStep { axis: &'static str, step: f64 },

    #[error("hours per frame must be positive and fit the date range, got {0}")]
    InvalidFrameStep(f64),

    #[error("frames per second must be positive, got {0}")]
    InvalidFrameRate(f64),

    #[error("frame {index} at {hours_per_frame} hours per frame is outside the date range")]
    FrameOutOfRange { index: usize, hours_per_frame: f64 },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FluxError>;
