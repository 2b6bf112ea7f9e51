// src/error.rs
use thiserror::Error;

/// Errors raised while setting up a demo.
///
/// Per-frame simulation never fails; everything here comes from construction,
/// configuration loading or graphics initialisation.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid entity extents {width}x{height}: both must be finite and positive")]
    InvalidExtents { width: f32, height: f32 },

    #[error("invalid fixed timestep {0}: must be finite and positive")]
    InvalidTimestep(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("level parse error: {0}")]
    Level(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("graphics initialisation failed: {0}")]
    Graphics(String),
}
