//! Vertex batches with explicit per-draw state.
//!
//! Each batch carries everything a backend needs to draw it: geometry,
//! per-vertex colors, pixel size and depth/blend state. Nothing is inherited
//! from a previous draw.

use glam::{Vec3, Vec4};

/// Depth and blend configuration of a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawState {
    /// Test against and write to the depth buffer.
    pub depth_test: bool,
    /// Alpha blending over the existing color.
    pub blending: bool,
}

impl DrawState {
    /// Depth tested, no blending.
    pub const OPAQUE: Self = Self {
        depth_test: true,
        blending: false,
    };

    /// No depth test, alpha blended. Never occludes later draws.
    pub const OVERLAY: Self = Self {
        depth_test: false,
        blending: true,
    };
}

/// One line segment with a flat RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineSegment {
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub color: [f32; 4],
}

/// One point with an RGB color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// A list of segments drawn with one width and state.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    pub segments: Vec<LineSegment>,
    /// Line width in pixels.
    pub width: f32,
    pub state: DrawState,
}

impl LineBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new(width: f32, state: DrawState) -> Self {
        Self {
            segments: Vec::new(),
            width,
            state,
        }
    }

    /// Appends a segment.
    pub fn push(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        self.segments.push(LineSegment {
            start: start.to_array(),
            end: end.to_array(),
            color: color.to_array(),
        });
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when no segment has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A list of points drawn with one size and state.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBatch {
    pub points: Vec<PointVertex>,
    /// Point diameter in pixels.
    pub size: f32,
    pub state: DrawState,
}

impl PointBatch {
    /// Creates an empty batch with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize, size: f32, state: DrawState) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            size,
            state,
        }
    }

    /// Appends a point.
    pub fn push(&mut self, position: Vec3, color: Vec3) {
        self.points.push(PointVertex {
            position: position.to_array(),
            color: color.to_array(),
        });
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
