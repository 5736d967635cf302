//! lidarview: an interactive viewer for synthetic LIDAR point clouds.
//!
//! The viewer draws a point cloud with an orbit camera, a reference grid on
//! three faces of the cloud's bounding box, axis indicators and projected
//! axis labels, with an egui control panel for display options.
//!
//! # Quick start
//!
//! ```no_run
//! use lidarview::ViewerConfig;
//!
//! fn main() -> lidarview::Result<()> {
//!     lidarview::run(ViewerConfig::default())
//! }
//! ```
//!
//! The scene logic runs without a window too:
//!
//! ```
//! use lidarview::{generate_lidar_scene_seeded, RecordingRasterizer, SceneRenderer};
//!
//! let mut scene = SceneRenderer::new();
//! scene.set_point_cloud(generate_lidar_scene_seeded(1_000, 7));
//!
//! let mut raster = RecordingRasterizer::new();
//! let plan = scene.prepare_frame(800, 600);
//! let stats = scene.draw_scene(&plan, &mut raster);
//! assert_eq!(stats.points, 1_000);
//! ```

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod app;
pub mod camera_input;
pub mod frame_timer;

pub use app::{run, App};
pub use camera_input::CameraInput;
pub use frame_timer::FrameTimer;

pub use lidarview_core::{
    generate_lidar_scene, generate_lidar_scene_seeded, BoundingBox, ColorMode, LidarError,
    PointStore, RenderOptions, Result, Sample, ViewerConfig,
};
pub use lidarview_render::{
    Camera, FramePlan, FrameStats, FrameTransform, LabelSurface, Rasterizer,
    RecordingLabelSurface, RecordingRasterizer, SceneRenderer, ViewPreset,
};

pub use glam::{Vec2, Vec3};
