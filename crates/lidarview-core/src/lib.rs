//! Core abstractions for lidarview.
//!
//! This crate provides the data model shared by the renderer and the viewer:
//! - [`Sample`] and [`BoundingBox`] for labeled 3D points and their extent
//! - [`PointStore`], the single owner of the current point sequence
//! - [`ColorMode`] for per-sample display colors
//! - [`RenderOptions`] and [`ViewerConfig`] for settings
//! - A synthetic LIDAR scene generator

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]

pub mod bounds;
pub mod color_mode;
pub mod error;
pub mod generator;
pub mod options;
pub mod point_store;
pub mod sample;

pub use bounds::BoundingBox;
pub use color_mode::ColorMode;
pub use error::{LidarError, Result};
pub use generator::{generate_lidar_scene, generate_lidar_scene_seeded};
pub use options::{RenderOptions, ViewerConfig};
pub use point_store::PointStore;
pub use sample::Sample;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
