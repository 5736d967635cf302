//! Rendering for lidarview.
//!
//! This crate turns the point store into draw submissions:
//! - [`Camera`] orbit/pan/zoom model and the per-frame [`FrameTransform`]
//! - Vertex batches with explicit [`DrawState`]
//! - Reference grid, bounding box, axis indicators and axis labels
//! - [`SceneRenderer`], which owns the point store, camera and options
//! - [`RenderEngine`], the wgpu implementation of [`Rasterizer`]

// Graphics code intentionally uses casts for counts, colors and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod batch;
pub mod camera;
pub mod engine;
pub mod error;
pub mod grid;
pub mod labels;
pub mod scene;

pub use backend::{
    DrawCall, LabelSurface, Rasterizer, RecordingLabelSurface, RecordingRasterizer,
};
pub use batch::{DrawState, LineBatch, LineSegment, PointBatch, PointVertex};
pub use camera::{Camera, FrameTransform, ViewPreset, Viewport};
pub use engine::RenderEngine;
pub use error::{RenderError, RenderResult};
pub use grid::{Axis, GridLayout};
pub use labels::AxisLabel;
pub use scene::{FramePlan, FrameStats, SceneRenderer};
