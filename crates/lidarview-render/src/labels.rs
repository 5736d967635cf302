//! Axis labels placed by projecting grid-line positions to the screen.

use glam::{Vec2, Vec3};

use crate::camera::FrameTransform;
use crate::grid::{Axis, GridLayout};

/// Label background plate, RGBA.
pub const LABEL_BACKGROUND: [u8; 4] = [0, 0, 0, 220];
/// Padding around the label text, in pixels.
pub const LABEL_PADDING: f32 = 2.0;

/// Above this many lines every second label is drawn.
const SPARSE_THRESHOLD: usize = 15;
/// Above this many lines every fourth label is drawn.
const SPARSER_THRESHOLD: usize = 30;

/// A text label at a screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub axis: Axis,
    /// Grid-line coordinate the label annotates.
    pub value: f32,
    pub text: String,
    /// Center of the label in window pixels, top-left origin.
    pub screen_pos: Vec2,
    /// Text color, RGBA.
    pub color: [u8; 4],
}

/// Text color per axis.
#[must_use]
pub fn label_color(axis: Axis) -> [u8; 4] {
    match axis {
        Axis::X => [255, 100, 100, 255],
        Axis::Y => [100, 255, 100, 255],
        Axis::Z => [100, 100, 255, 255],
    }
}

/// Label stride for an axis with `line_count` grid lines.
#[must_use]
pub fn label_stride(line_count: usize) -> usize {
    if line_count > SPARSER_THRESHOLD {
        4
    } else if line_count > SPARSE_THRESHOLD {
        2
    } else {
        1
    }
}

/// Projects thinned grid-line positions of every axis.
///
/// X labels run along the bottom back edge, Y labels up the back left edge
/// and Z labels along the bottom left edge. Positions that do not project
/// into the visible depth range are dropped.
#[must_use]
pub fn layout_axis_labels(transform: &FrameTransform, grid: &GridLayout) -> Vec<AxisLabel> {
    let min = grid.bounds().min;
    let mut labels = Vec::new();

    for axis in Axis::ALL {
        let stride = label_stride(grid.line_count(axis));
        for &value in grid.positions(axis).iter().step_by(stride) {
            let anchor = match axis {
                Axis::X => Vec3::new(value, min.y, min.z),
                Axis::Y => Vec3::new(min.x, value, min.z),
                Axis::Z => Vec3::new(min.x, min.y, value),
            };

            if let Some(screen_pos) = transform.project(anchor) {
                labels.push(AxisLabel {
                    axis,
                    value,
                    text: format!("{value:.1}"),
                    screen_pos,
                    color: label_color(axis),
                });
            }
        }
    }

    labels
}
