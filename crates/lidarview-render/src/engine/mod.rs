//! The wgpu rendering engine.

mod pipelines;

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::backend::Rasterizer;
use crate::batch::{DrawState, LineBatch, LineSegment, PointBatch, PointVertex};
use crate::camera::FrameTransform;
use crate::error::{RenderError, RenderResult};

pub(crate) use pipelines::{PipelineKey, Primitive};

/// Depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-draw uniforms shared by the segment and point shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct DrawUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    /// Line width or point diameter in pixels.
    pub size: f32,
    pub _padding: f32,
}

impl DrawUniforms {
    fn new(transform: &FrameTransform, size: f32) -> Self {
        Self {
            view_proj: transform.view_projection().to_cols_array_2d(),
            viewport: transform.viewport.size().to_array(),
            size,
            _padding: 0.0,
        }
    }
}

/// GPU buffers for one draw, reused across frames.
struct DrawSlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: u64,
}

/// A queued draw waiting for `encode_scene`.
struct PendingDraw {
    slot: usize,
    key: PipelineKey,
    instances: u32,
}

/// The main rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// The window surface.
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Depth texture.
    pub depth_texture: wgpu::Texture,
    /// Depth texture view.
    pub depth_view: wgpu::TextureView,
    /// Current width in physical pixels.
    pub width: u32,
    /// Current height in physical pixels.
    pub height: u32,
    draw_bind_group_layout: wgpu::BindGroupLayout,
    segment_shader: wgpu::ShaderModule,
    point_shader: wgpu::ShaderModule,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    slots: Vec<DrawSlot>,
    pending: Vec<PendingDraw>,
}

impl RenderEngine {
    /// Creates a new windowed render engine.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lidarview device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // Colors are authored in display space, so skip the sRGB encode.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&device, width, height);
        let draw_bind_group_layout = Self::create_draw_bind_group_layout(&device);
        let (segment_shader, point_shader) = Self::create_shaders(&device);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            depth_texture,
            depth_view,
            width,
            height,
            draw_bind_group_layout,
            segment_shader,
            point_shader,
            pipelines: HashMap::new(),
            slots: Vec::new(),
            pending: Vec::new(),
        })
    }

    /// Resizes the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Reapplies the current surface configuration after a lost surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Gets the next swapchain texture.
    pub fn acquire_frame(&self) -> RenderResult<wgpu::SurfaceTexture> {
        Ok(self.surface.get_current_texture()?)
    }

    /// Returns the surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Returns the current dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of draws queued since the last `encode_scene`.
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Encodes every queued draw into one pass that clears color and depth.
    ///
    /// Draws run in submission order. The queue is empty afterwards.
    pub fn encode_scene(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) {
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for draw in &self.pending {
                let Some(pipeline) = self.pipelines.get(&draw.key) else {
                    continue;
                };
                let slot = &self.slots[draw.slot];
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                render_pass.set_vertex_buffer(0, slot.instance_buffer.slice(..));
                // Six vertices per instance: two triangles
                render_pass.draw(0..6, 0..draw.instances);
            }
        }

        self.pending.clear();
    }

    /// Uploads one draw's uniforms and instances into a reusable slot.
    fn queue_draw(
        &mut self,
        primitive: Primitive,
        state: DrawState,
        uniforms: &DrawUniforms,
        instances: &[u8],
        count: usize,
    ) {
        if count == 0 {
            return;
        }

        let key = PipelineKey { primitive, state };
        self.ensure_pipeline(key);

        let index = self.pending.len();
        let needed = instances.len() as u64;
        if index == self.slots.len() {
            let slot = self.create_slot(uniforms, needed);
            self.slots.push(slot);
        } else if self.slots[index].capacity < needed {
            let buffer = self.create_instance_buffer(needed);
            let slot = &mut self.slots[index];
            slot.capacity = buffer.size();
            slot.instance_buffer = buffer;
        }

        let slot = &self.slots[index];
        self.queue
            .write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        self.queue.write_buffer(&slot.instance_buffer, 0, instances);

        self.pending.push(PendingDraw {
            slot: index,
            key,
            instances: count as u32,
        });
    }

    fn create_slot(&self, uniforms: &DrawUniforms, capacity: u64) -> DrawSlot {
        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("draw uniforms"),
                contents: bytemuck::bytes_of(uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw bind group"),
            layout: &self.draw_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let instance_buffer = self.create_instance_buffer(capacity);
        DrawSlot {
            uniform_buffer,
            bind_group,
            capacity: instance_buffer.size(),
            instance_buffer,
        }
    }

    fn create_instance_buffer(&self, size: u64) -> wgpu::Buffer {
        // Round up so small growth does not reallocate every frame.
        let size = size.next_power_of_two().max(wgpu::COPY_BUFFER_ALIGNMENT);
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw instances"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}

impl Rasterizer for RenderEngine {
    fn draw_lines(&mut self, transform: &FrameTransform, batch: &LineBatch) {
        let uniforms = DrawUniforms::new(transform, batch.width);
        let bytes: &[u8] = bytemuck::cast_slice::<LineSegment, u8>(&batch.segments);
        self.queue_draw(Primitive::Segment, batch.state, &uniforms, bytes, batch.len());
    }

    fn draw_points(&mut self, transform: &FrameTransform, batch: &PointBatch) {
        let uniforms = DrawUniforms::new(transform, batch.size);
        let bytes: &[u8] = bytemuck::cast_slice::<PointVertex, u8>(&batch.points);
        self.queue_draw(Primitive::Point, batch.state, &uniforms, bytes, batch.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    #[test]
    fn test_draw_uniforms_layout() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 80);
        assert_eq!(std::mem::size_of::<LineSegment>(), 40);
        assert_eq!(std::mem::size_of::<PointVertex>(), 24);
    }

    #[test]
    fn test_draw_uniforms_from_transform() {
        let transform = Camera::new().compute_transforms(640, 480);
        let uniforms = DrawUniforms::new(&transform, 3.0);
        assert_eq!(uniforms.viewport, [640.0, 480.0]);
        assert_eq!(uniforms.size, 3.0);
        assert_eq!(
            uniforms.view_proj,
            transform.view_projection().to_cols_array_2d()
        );
    }
}
