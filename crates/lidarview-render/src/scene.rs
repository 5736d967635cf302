//! Scene renderer: owns the point store, camera and options, and turns them
//! into draw submissions once per frame.

use lidarview_core::{BoundingBox, ColorMode, PointStore, RenderOptions, Result, Sample};

use crate::backend::{LabelSurface, Rasterizer};
use crate::batch::{DrawState, PointBatch};
use crate::camera::{Camera, FrameTransform, ViewPreset};
use crate::grid::GridLayout;
use crate::labels::layout_axis_labels;

/// Everything derived once per frame and shared by all draw stages.
#[derive(Debug, Clone)]
pub struct FramePlan {
    /// The one transform used for geometry and labels alike.
    pub transform: FrameTransform,
    /// Grid layout, `None` when the grid is hidden or has no valid layout.
    pub grid: Option<GridLayout>,
}

/// Counts of what one frame submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Segments across the grid, box and axis batches.
    pub line_segments: usize,
    pub points: usize,
    pub labels: usize,
}

/// Owns the scene state and draws it.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    store: PointStore,
    camera: Camera,
    options: RenderOptions,
}

impl SceneRenderer {
    /// Creates an empty scene with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scene with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replaces the point cloud and frames the camera on its bounds.
    pub fn set_point_cloud(&mut self, samples: Vec<Sample>) {
        let bounds = self.store.replace(samples);
        self.camera.frame_bounds(&bounds);
        log::info!(
            "point cloud set: {} points, extent {:?}",
            self.store.len(),
            bounds.extent()
        );
    }

    /// Removes all points. The camera is left where it is.
    pub fn clear_point_cloud(&mut self) {
        self.store.clear();
        log::info!("point cloud cleared");
    }

    /// Resets the camera pose and re-frames the current cloud, if any.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        if !self.store.is_empty() {
            self.camera.frame_bounds(&self.store.bounds());
        }
    }

    /// Applies a fixed view direction.
    pub fn set_view(&mut self, preset: ViewPreset) {
        self.camera.set_view(preset);
    }

    /// Number of samples currently stored.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.store.len()
    }

    /// Bounds of the last non-empty cloud.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.store.bounds()
    }

    #[must_use]
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.options.point_size = size;
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.options.color_mode = mode;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.options.show_grid = show;
    }

    /// Sets the grid spacing; fails for non-positive values.
    pub fn set_grid_spacing(&mut self, spacing: f32) -> Result<()> {
        self.options.set_grid_spacing(spacing)
    }

    pub fn set_show_axis_labels(&mut self, show: bool) {
        self.options.show_axis_labels = show;
    }

    /// Computes the transform and grid layout for a `width` x `height` frame.
    #[must_use]
    pub fn prepare_frame(&self, width: u32, height: u32) -> FramePlan {
        let grid = if self.options.show_grid {
            GridLayout::new(&self.store.bounds(), self.options.grid_spacing())
        } else {
            None
        };

        FramePlan {
            transform: self.camera.compute_transforms(width, height),
            grid,
        }
    }

    /// Submits grid, bounding box, axes and points, in that order.
    pub fn draw_scene<R: Rasterizer + ?Sized>(
        &self,
        plan: &FramePlan,
        rasterizer: &mut R,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        if let Some(grid) = &plan.grid {
            for batch in [grid.grid_batch(), grid.bounding_box_batch(), grid.axes_batch()] {
                stats.line_segments += batch.len();
                rasterizer.draw_lines(&plan.transform, &batch);
            }
        }

        if self.store.is_empty() {
            return stats;
        }

        let bounds = self.store.bounds();
        let mode = self.options.color_mode;
        let mut points = PointBatch::with_capacity(
            self.store.len(),
            self.options.point_size,
            DrawState::OPAQUE,
        );
        for sample in self.store.samples() {
            points.push(sample.position, mode.resolve(sample, &bounds));
        }

        stats.points = points.len();
        rasterizer.draw_points(&plan.transform, &points);
        stats
    }

    /// Submits axis labels. Requires both the grid and labels to be enabled.
    ///
    /// Returns the number of labels drawn.
    pub fn draw_axis_labels<S: LabelSurface + ?Sized>(
        &self,
        plan: &FramePlan,
        surface: &mut S,
    ) -> usize {
        if !self.options.show_axis_labels {
            return 0;
        }
        let Some(grid) = &plan.grid else {
            return 0;
        };

        let labels = layout_axis_labels(&plan.transform, grid);
        for label in &labels {
            surface.draw_label(label);
        }
        labels.len()
    }

    /// Prepares, draws and labels one frame.
    pub fn render_frame<R, S>(
        &self,
        width: u32,
        height: u32,
        rasterizer: &mut R,
        labels: &mut S,
    ) -> FrameStats
    where
        R: Rasterizer + ?Sized,
        S: LabelSurface + ?Sized,
    {
        let plan = self.prepare_frame(width, height);
        let mut stats = self.draw_scene(&plan, rasterizer);
        stats.labels = self.draw_axis_labels(&plan, labels);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingLabelSurface, RecordingRasterizer};
    use glam::Vec3;

    fn cube_samples() -> Vec<Sample> {
        vec![
            Sample::new(Vec3::splat(-5.0), Vec3::new(1.0, 0.0, 0.0), 0.1),
            Sample::new(Vec3::splat(5.0), Vec3::new(0.0, 1.0, 0.0), 0.9),
            Sample::new(Vec3::new(1.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0), 0.5),
        ]
    }

    #[test]
    fn test_set_point_cloud_frames_camera() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        assert_eq!(scene.point_count(), 3);
        assert_eq!(scene.camera().target, Vec3::ZERO);
        assert_eq!(scene.camera().distance, 20.0);
    }

    #[test]
    fn test_draw_order_grid_before_points() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());

        let mut raster = RecordingRasterizer::new();
        let plan = scene.prepare_frame(800, 600);
        let stats = scene.draw_scene(&plan, &mut raster);

        assert_eq!(raster.calls.len(), 4);
        assert!(matches!(raster.calls[0], DrawCall::Lines(_)));
        assert!(matches!(raster.calls[3], DrawCall::Points(_)));
        assert_eq!(stats.points, 3);

        let widths: Vec<f32> = raster.line_batches().map(|b| b.width).collect();
        assert_eq!(widths, vec![1.0, 2.0, 3.0]);
        assert!(raster.line_batches().all(|b| b.state == DrawState::OVERLAY));
        assert!(raster.point_batches().all(|b| b.state == DrawState::OPAQUE));
    }

    #[test]
    fn test_every_call_uses_the_plan_transform() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        let plan = scene.prepare_frame(1024, 768);

        let mut raster = RecordingRasterizer::new();
        scene.draw_scene(&plan, &mut raster);
        assert!(raster.transforms.iter().all(|t| *t == plan.transform));
    }

    #[test]
    fn test_clear_draws_no_points() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        scene.clear_point_cloud();
        assert_eq!(scene.point_count(), 0);

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let stats = scene.render_frame(800, 600, &mut raster, &mut labels);

        assert_eq!(raster.point_batches().count(), 0);
        assert_eq!(stats.points, 0);
    }

    #[test]
    fn test_uniform_cube_cloud_frames_camera() {
        use crate::camera::{MAX_DISTANCE, MIN_DISTANCE};
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<Sample> = (0..10_000)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(-5.0..=5.0),
                    rng.gen_range(-5.0..=5.0),
                    rng.gen_range(-5.0..=5.0),
                );
                Sample::new(position, Vec3::ONE, rng.gen_range(0.0..=1.0))
            })
            .collect();

        let mut scene = SceneRenderer::new();
        scene.camera_mut().orbit(40.0, 10.0);
        scene.set_point_cloud(samples);

        let bounds = scene.bounds();
        assert!(bounds.min.cmpge(Vec3::splat(-5.0)).all());
        assert!(bounds.max.cmple(Vec3::splat(5.0)).all());
        assert!(scene.store().samples().iter().all(|s| bounds.contains(s.position)));

        let expected = (bounds.max_extent() * 2.0).clamp(MIN_DISTANCE, MAX_DISTANCE);
        assert_eq!(scene.camera().target, bounds.center());
        assert_eq!(scene.camera().distance, expected);
        assert!(expected > 19.0 && expected <= 20.0);
    }

    #[test]
    fn test_extreme_cloud_skips_grid() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(vec![
            Sample::new(Vec3::splat(-3.0e38), Vec3::ONE, 0.0),
            Sample::new(Vec3::splat(3.0e38), Vec3::ONE, 1.0),
        ]);

        let plan = scene.prepare_frame(800, 600);
        assert!(plan.grid.is_none());

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let stats = scene.render_frame(800, 600, &mut raster, &mut labels);
        assert_eq!(stats.line_segments, 0);
        assert_eq!(stats.labels, 0);
        assert_eq!(raster.point_batches().count(), 1);
    }

    #[test]
    fn test_clear_keeps_grid_and_labels() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let before = scene.render_frame(800, 600, &mut raster, &mut labels);

        scene.clear_point_cloud();
        raster.clear();
        labels.labels.clear();
        let after = scene.render_frame(800, 600, &mut raster, &mut labels);

        assert!(before.line_segments > 0);
        assert_eq!(after.line_segments, before.line_segments);
        assert_eq!(after.labels, before.labels);
        assert_eq!(after.points, 0);
        assert_eq!(raster.line_batches().count(), 3);
        assert_eq!(raster.point_batches().count(), 0);
    }

    #[test]
    fn test_hidden_grid_skips_lines_and_labels() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        scene.set_show_grid(false);

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let stats = scene.render_frame(800, 600, &mut raster, &mut labels);

        assert_eq!(raster.line_batches().count(), 0);
        assert_eq!(stats.labels, 0);
        assert!(labels.labels.is_empty());
        assert_eq!(stats.points, 3);
    }

    #[test]
    fn test_labels_can_be_hidden_independently() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        scene.set_show_axis_labels(false);

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let stats = scene.render_frame(800, 600, &mut raster, &mut labels);

        assert_eq!(raster.line_batches().count(), 3);
        assert_eq!(stats.labels, 0);
    }

    #[test]
    fn test_degenerate_cloud_skips_grid() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(vec![
            Sample::at(Vec3::new(0.0, 0.0, 0.0)),
            Sample::at(Vec3::new(1.0, 0.0, 1.0)),
        ]);

        let mut raster = RecordingRasterizer::new();
        let mut labels = RecordingLabelSurface::default();
        let stats = scene.render_frame(800, 600, &mut raster, &mut labels);

        assert_eq!(stats.line_segments, 0);
        assert_eq!(stats.labels, 0);
        assert_eq!(stats.points, 2);
    }

    #[test]
    fn test_point_colors_follow_mode() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        scene.set_color_mode(ColorMode::Intensity);
        scene.set_point_size(4.0);

        let mut raster = RecordingRasterizer::new();
        let plan = scene.prepare_frame(800, 600);
        scene.draw_scene(&plan, &mut raster);

        let batch = raster.point_batches().next().unwrap();
        assert_eq!(batch.size, 4.0);
        assert_eq!(batch.points[0].color, [0.1, 0.1, 0.1]);
        assert_eq!(batch.points[1].color, [0.9, 0.9, 0.9]);
    }

    #[test]
    fn test_reset_camera_reframes_cloud() {
        let mut scene = SceneRenderer::new();
        scene.set_point_cloud(cube_samples());
        scene.camera_mut().orbit(30.0, 10.0);
        scene.camera_mut().pan(100.0, 100.0);
        scene.reset_camera();

        assert_eq!(scene.camera().yaw, 45.0);
        assert_eq!(scene.camera().pitch, 30.0);
        assert_eq!(scene.camera().target, Vec3::ZERO);
        assert_eq!(scene.camera().distance, 20.0);
    }

    #[test]
    fn test_reset_camera_without_points() {
        let mut scene = SceneRenderer::new();
        scene.camera_mut().zoom(2.0);
        scene.reset_camera();
        assert_eq!(*scene.camera(), Camera::new());
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        let mut scene = SceneRenderer::new();
        assert!(scene.set_grid_spacing(0.0).is_err());
        assert_eq!(scene.options().grid_spacing(), 1.0);
    }
}
