//! WebGPU render pipeline setup

use wgpu::util::DeviceExt;

use super::FrameSink;
use super::vertex::{Vertex, colors};
use crate::error::{EngineError, RenderError};

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    /// Play-field size in CSS pixels (the space vertices arrive in)
    pub size: (u32, u32),
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
}

impl RenderState {
    /// Create the pipeline for a browser canvas whose CSS size is `width` x `height`
    #[cfg(target_arch = "wasm32")]
    pub async fn for_canvas(
        canvas: web_sys::HtmlCanvasElement,
        width: u32,
        height: u32,
        pixel_ratio: f32,
    ) -> Result<Self, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| EngineError::SurfaceUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| EngineError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        Self::new(surface, &adapter, width, height, pixel_ratio).await
    }

    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        pixel_ratio: f32,
    ) -> Result<Self, EngineError> {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let (physical_w, physical_h) = physical_size(width, height, pixel_ratio);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("neon-dodge-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| EngineError::Device(e.to_string()))?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| EngineError::SurfaceUnavailable("no supported surface format".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: physical_w,
            height: physical_h,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} @{}x {:?}",
            width,
            height,
            pixel_ratio,
            surface_format
        );

        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Create pipeline
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            size: (width, height),
            pixel_ratio,
        })
    }

    /// Convert pixel coordinates (origin top-left, y down) to NDC
    pub fn pixel_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        pixel_to_ndc(self.size, x, y)
    }
}

/// Backing-store size for a CSS size at `pixel_ratio`, never zero
pub fn physical_size(width: u32, height: u32, pixel_ratio: f32) -> (u32, u32) {
    let scale = |v: u32| ((v as f32 * pixel_ratio).round() as u32).max(1);
    (scale(width), scale(height))
}

/// Pixel space to normalized device coordinates for a viewport of `size`
pub fn pixel_to_ndc(size: (u32, u32), x: f32, y: f32) -> (f32, f32) {
    let w = size.0.max(1) as f32;
    let h = size.1.max(1) as f32;
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

impl FrameSink for RenderState {
    fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            let (physical_w, physical_h) = physical_size(new_width, new_height, self.pixel_ratio);
            self.config.width = physical_w;
            self.config.height = physical_h;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        if pixel_ratio > 0.0 && pixel_ratio.is_finite() {
            self.pixel_ratio = pixel_ratio;
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`)
    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload vertices and render
    fn present(&mut self, vertices: &[Vertex]) -> Result<(), RenderError> {
        if vertices.is_empty() {
            return Ok(());
        }

        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = self.pixel_to_ndc(v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vertex_buffer"),
                contents: bytemuck::cast_slice(&ndc_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let bg = colors::rgba(colors::BACKGROUND, 1.0);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            render_pass.draw(0..ndc_vertices.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
