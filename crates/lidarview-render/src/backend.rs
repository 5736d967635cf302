//! The seam between scene logic and whatever draws it.

use crate::batch::{LineBatch, PointBatch};
use crate::camera::FrameTransform;
use crate::labels::AxisLabel;

/// Receives geometry for one frame, in submission order.
pub trait Rasterizer {
    /// Draws a batch of line segments.
    fn draw_lines(&mut self, transform: &FrameTransform, batch: &LineBatch);

    /// Draws a batch of points.
    fn draw_points(&mut self, transform: &FrameTransform, batch: &PointBatch);
}

/// Receives screen-space text labels.
pub trait LabelSurface {
    /// Draws one label centered on its screen position.
    fn draw_label(&mut self, label: &AxisLabel);
}

/// A single recorded submission.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// A [`Rasterizer::draw_lines`] submission.
    Lines(LineBatch),
    /// A [`Rasterizer::draw_points`] submission.
    Points(PointBatch),
}

/// Headless rasterizer that keeps every submission.
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    /// Every batch received, in submission order.
    pub calls: Vec<DrawCall>,
    /// Transforms received, one per call.
    pub transforms: Vec<FrameTransform>,
}

impl RecordingRasterizer {
    /// Creates a rasterizer with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line batches in submission order.
    pub fn line_batches(&self) -> impl Iterator<Item = &LineBatch> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Lines(b) => Some(b),
            DrawCall::Points(_) => None,
        })
    }

    /// Point batches in submission order.
    pub fn point_batches(&self) -> impl Iterator<Item = &PointBatch> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Points(b) => Some(b),
            DrawCall::Lines(_) => None,
        })
    }

    /// Forgets all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.transforms.clear();
    }
}

impl Rasterizer for RecordingRasterizer {
    fn draw_lines(&mut self, transform: &FrameTransform, batch: &LineBatch) {
        self.transforms.push(*transform);
        self.calls.push(DrawCall::Lines(batch.clone()));
    }

    fn draw_points(&mut self, transform: &FrameTransform, batch: &PointBatch) {
        self.transforms.push(*transform);
        self.calls.push(DrawCall::Points(batch.clone()));
    }
}

/// Headless label surface that keeps every label.
#[derive(Debug, Default)]
pub struct RecordingLabelSurface {
    pub labels: Vec<AxisLabel>,
}

impl LabelSurface for RecordingLabelSurface {
    fn draw_label(&mut self, label: &AxisLabel) {
        self.labels.push(label.clone());
    }
}
