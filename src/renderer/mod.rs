//! Rendering module
//!
//! `scene` turns game state into pixel-space triangles; a `FrameSink`
//! presents them. The WebGPU sink lives in `pipeline`.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{build_frame, build_idle_frame};
pub use vertex::Vertex;

use crate::error::RenderError;

/// Something that can display a finished frame
pub trait FrameSink {
    fn present(&mut self, vertices: &[Vertex]) -> Result<(), RenderError>;
    /// Play-field size changed (pixels)
    fn resize(&mut self, width: u32, height: u32);
    /// Device pixels per CSS pixel; applied on the next `resize`
    fn set_pixel_ratio(&mut self, _pixel_ratio: f32) {}
    /// Rebuild the output surface at its current size
    fn reconfigure(&mut self) {}
}

/// Discards frames, counting them (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct NullSink {
    pub frames: u64,
    pub last_vertex_count: usize,
    pub size: (u32, u32),
}

impl FrameSink for NullSink {
    fn present(&mut self, vertices: &[Vertex]) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_vertex_count = vertices.len();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
