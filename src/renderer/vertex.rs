//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Neon palette (sRGB hex)
pub mod colors {
    pub const BACKGROUND: u32 = 0x0a0a0f;
    pub const PRIMARY: u32 = 0x00ffff; // Cyan neon
    pub const ACCENT: u32 = 0xffff00; // Yellow neon
    pub const DANGER: u32 = 0xff3366; // Red-pink
    pub const WHITE: u32 = 0xffffff;
    pub const DARK_GRAY: u32 = 0x1a1a2e;

    /// sRGB hex + alpha to a linear color for an sRGB render target
    pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        [channel(16), channel(8), channel(0), alpha]
    }

    pub fn transparent(hex: u32) -> [f32; 4] {
        rgba(hex, 0.0)
    }

    fn srgb_to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

}
