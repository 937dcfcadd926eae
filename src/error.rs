//! Error types
//!
//! Only construction can fail hard. Everything that happens once a run is
//! going (storage, host capabilities, a dropped frame) degrades instead.

use thiserror::Error;

/// Fatal: the engine cannot be created
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("no compatible graphics adapter: {0}")]
    Adapter(String),
    #[error("failed to create graphics device: {0}")]
    Device(String),
}

/// Non-fatal: a single frame could not be presented
#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface must be reconfigured before the next frame
    #[error("surface lost")]
    Lost,
    #[error("out of memory")]
    OutOfMemory,
    #[error("render failed: {0}")]
    Other(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::Lost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(other.to_string()),
        }
    }
}
