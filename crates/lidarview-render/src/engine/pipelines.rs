//! Pipeline creation for the render engine.

use std::num::NonZeroU64;

use super::{DrawUniforms, RenderEngine, DEPTH_FORMAT};
use crate::batch::DrawState;

const SEGMENT_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];
const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// What a pipeline rasterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Primitive {
    Segment,
    Point,
}

/// Cache key: one pipeline per primitive and draw state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PipelineKey {
    pub primitive: Primitive,
    pub state: DrawState,
}

/// Depth configuration for `state`.
pub(crate) fn depth_stencil_state(state: DrawState) -> wgpu::DepthStencilState {
    let (depth_write_enabled, depth_compare) = if state.depth_test {
        (true, wgpu::CompareFunction::Less)
    } else {
        (false, wgpu::CompareFunction::Always)
    };

    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Blend configuration for `state`.
pub(crate) fn blend_state(state: DrawState) -> wgpu::BlendState {
    if state.blending {
        wgpu::BlendState::ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    }
}

impl RenderEngine {
    pub(super) fn create_draw_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64),
                },
                count: None,
            }],
        })
    }

    pub(super) fn create_shaders(
        device: &wgpu::Device,
    ) -> (wgpu::ShaderModule, wgpu::ShaderModule) {
        let segment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("segment shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/segment.wgsl").into()),
        });
        let point = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/point.wgsl").into()),
        });
        (segment, point)
    }

    /// Builds the pipeline for `key` unless it is already cached.
    pub(super) fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        log::debug!("creating pipeline {key:?}");
        let pipeline = self.create_pipeline(key);
        self.pipelines.insert(key, pipeline);
    }

    fn create_pipeline(&self, key: PipelineKey) -> wgpu::RenderPipeline {
        let (shader, label, stride, attributes): (_, _, usize, &[wgpu::VertexAttribute]) =
            match key.primitive {
                Primitive::Segment => (
                    &self.segment_shader,
                    "segment pipeline",
                    std::mem::size_of::<crate::batch::LineSegment>(),
                    &SEGMENT_ATTRIBUTES[..],
                ),
                Primitive::Point => (
                    &self.point_shader,
                    "point pipeline",
                    std::mem::size_of::<crate::batch::PointVertex>(),
                    &POINT_ATTRIBUTES[..],
                ),
            };

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("draw pipeline layout"),
                bind_group_layouts: &[&self.draw_bind_group_layout],
                push_constant_ranges: &[],
            });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: stride as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes,
                    }],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_config.format,
                        blend: Some(blend_state(key.state)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None, // quads may face either way after projection
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(depth_stencil_state(key.state)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_never_writes_depth() {
        let depth = depth_stencil_state(DrawState::OVERLAY);
        assert!(!depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Always);
        assert_eq!(blend_state(DrawState::OVERLAY), wgpu::BlendState::ALPHA_BLENDING);
    }

    #[test]
    fn test_opaque_tests_and_writes_depth() {
        let depth = depth_stencil_state(DrawState::OPAQUE);
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Less);
        assert_eq!(blend_state(DrawState::OPAQUE), wgpu::BlendState::REPLACE);
    }

    #[test]
    fn test_pipeline_keys_distinguish_state() {
        let a = PipelineKey {
            primitive: Primitive::Segment,
            state: DrawState::OVERLAY,
        };
        let b = PipelineKey {
            primitive: Primitive::Segment,
            state: DrawState::OPAQUE,
        };
        let c = PipelineKey {
            primitive: Primitive::Point,
            state: DrawState::OPAQUE,
        };
        let keys: std::collections::HashSet<_> = [a, b, c, a].into_iter().collect();
        assert_eq!(keys.len(), 3);
    }
}
