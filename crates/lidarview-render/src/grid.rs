//! Reference grid, bounding-box wireframe and axis indicators.

use glam::{Vec3, Vec4};
use lidarview_core::BoundingBox;

use crate::batch::{DrawState, LineBatch};

const GRID_LINE_WIDTH: f32 = 1.0;
const BOX_LINE_WIDTH: f32 = 2.0;
const AXIS_LINE_WIDTH: f32 = 3.0;

/// Grid is skipped when any axis would need more lines than this.
pub const MAX_LINES_PER_AXIS: usize = 10_000;

/// Axis indicator length relative to the smallest box side.
const AXIS_LENGTH_FRACTION: f32 = 0.15;

const BOTTOM_FACE_COLOR: Vec4 = Vec4::new(0.6, 0.6, 0.6, 0.7);
const BACK_FACE_COLOR: Vec4 = Vec4::new(0.5, 0.5, 0.6, 0.5);
const LEFT_FACE_COLOR: Vec4 = Vec4::new(0.6, 0.5, 0.5, 0.5);
const BOX_COLOR: Vec4 = Vec4::new(0.3, 0.3, 0.3, 0.9);

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a vector.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Indicator color (X red, Y green, Z blue).
    #[must_use]
    pub fn color(self) -> Vec4 {
        self.unit().extend(1.0)
    }
}

/// Grid line positions along each axis of a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    bounds: BoundingBox,
    spacing: f32,
    positions: [Vec<f32>; 3],
    line_counts: [usize; 3],
}

impl GridLayout {
    /// Lays out lines every `spacing` units from min to max on each axis.
    ///
    /// The last line is clamped onto the max edge, so the final cell may be
    /// narrower than `spacing`. Returns `None` for a degenerate or
    /// non-finite box, a non-positive spacing, or when an axis would need
    /// more than [`MAX_LINES_PER_AXIS`] lines.
    #[must_use]
    pub fn new(bounds: &BoundingBox, spacing: f32) -> Option<Self> {
        if bounds.is_degenerate() || !(spacing.is_finite() && spacing > 0.0) {
            return None;
        }

        let extent = bounds.extent();
        if !extent.is_finite() {
            return None;
        }

        let mut counts = [0usize; 3];
        for axis in Axis::ALL {
            let divisions = extent[axis.index()] / spacing;
            if !divisions.is_finite() || divisions >= MAX_LINES_PER_AXIS as f32 {
                log::debug!("grid skipped: {divisions} divisions along {axis:?}");
                return None;
            }
            counts[axis.index()] = divisions as usize + 1;
        }

        let mut positions: [Vec<f32>; 3] = Default::default();
        let mut line_counts = [0; 3];

        for axis in Axis::ALL {
            let i = axis.index();
            let (min, max) = (bounds.min[i], bounds.max[i]);
            let count = counts[i];

            let lines = &mut positions[i];
            lines.reserve(count + 1);
            for step in 0..=count {
                let v = (min + step as f32 * spacing).min(max);
                if lines.last() != Some(&v) {
                    lines.push(v);
                }
            }
            line_counts[i] = count;
        }

        Some(Self {
            bounds: *bounds,
            spacing,
            positions,
            line_counts,
        })
    }

    /// The box the layout was computed for.
    #[must_use]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Line positions along `axis`, ascending, ending on the max edge.
    #[must_use]
    pub fn positions(&self, axis: Axis) -> &[f32] {
        &self.positions[axis.index()]
    }

    /// Nominal number of lines along `axis`: `floor(size / spacing) + 1`.
    #[must_use]
    pub fn line_count(&self, axis: Axis) -> usize {
        self.line_counts[axis.index()]
    }

    /// Lines on the bottom (XZ), back (XY) and left (YZ) faces.
    #[must_use]
    pub fn grid_batch(&self) -> LineBatch {
        let (min, max) = (self.bounds.min, self.bounds.max);
        let xs = self.positions(Axis::X);
        let ys = self.positions(Axis::Y);
        let zs = self.positions(Axis::Z);

        let mut batch = LineBatch::new(GRID_LINE_WIDTH, DrawState::OVERLAY);

        // Bottom plane at min y
        for &z in zs {
            batch.push(Vec3::new(min.x, min.y, z), Vec3::new(max.x, min.y, z), BOTTOM_FACE_COLOR);
        }
        for &x in xs {
            batch.push(Vec3::new(x, min.y, min.z), Vec3::new(x, min.y, max.z), BOTTOM_FACE_COLOR);
        }

        // Back plane at min z
        for &y in ys {
            batch.push(Vec3::new(min.x, y, min.z), Vec3::new(max.x, y, min.z), BACK_FACE_COLOR);
        }
        for &x in xs {
            batch.push(Vec3::new(x, min.y, min.z), Vec3::new(x, max.y, min.z), BACK_FACE_COLOR);
        }

        // Left plane at min x
        for &y in ys {
            batch.push(Vec3::new(min.x, y, min.z), Vec3::new(min.x, y, max.z), LEFT_FACE_COLOR);
        }
        for &z in zs {
            batch.push(Vec3::new(min.x, min.y, z), Vec3::new(min.x, max.y, z), LEFT_FACE_COLOR);
        }

        batch
    }

    /// Partial wireframe: bottom rectangle, three verticals and two top edges.
    #[must_use]
    pub fn bounding_box_batch(&self) -> LineBatch {
        let (n, x) = (self.bounds.min, self.bounds.max);
        let corner = |px: f32, py: f32, pz: f32| Vec3::new(px, py, pz);

        let edges = [
            // Bottom rectangle
            (corner(n.x, n.y, n.z), corner(x.x, n.y, n.z)),
            (corner(x.x, n.y, n.z), corner(x.x, n.y, x.z)),
            (corner(x.x, n.y, x.z), corner(n.x, n.y, x.z)),
            (corner(n.x, n.y, x.z), corner(n.x, n.y, n.z)),
            // Verticals
            (corner(n.x, n.y, n.z), corner(n.x, x.y, n.z)),
            (corner(x.x, n.y, n.z), corner(x.x, x.y, n.z)),
            (corner(n.x, n.y, x.z), corner(n.x, x.y, x.z)),
            // Top edges along the back and left faces
            (corner(n.x, x.y, n.z), corner(x.x, x.y, n.z)),
            (corner(n.x, x.y, n.z), corner(n.x, x.y, x.z)),
        ];

        let mut batch = LineBatch::new(BOX_LINE_WIDTH, DrawState::OVERLAY);
        for (a, b) in edges {
            batch.push(a, b, BOX_COLOR);
        }
        batch
    }

    /// Length of the axis indicators.
    #[must_use]
    pub fn axis_length(&self) -> f32 {
        self.bounds.min_extent() * AXIS_LENGTH_FRACTION
    }

    /// Red/green/blue indicators anchored at the min corner.
    #[must_use]
    pub fn axes_batch(&self) -> LineBatch {
        let origin = self.bounds.min;
        let length = self.axis_length();

        let mut batch = LineBatch::new(AXIS_LINE_WIDTH, DrawState::OVERLAY);
        for axis in Axis::ALL {
            batch.push(origin, origin + axis.unit() * length, axis.color());
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> BoundingBox {
        BoundingBox::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 3.0))
    }

    #[test]
    fn test_degenerate_box_has_no_layout() {
        assert!(GridLayout::new(&BoundingBox::EMPTY, 1.0).is_none());
        let flat = BoundingBox::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 3.0));
        assert!(GridLayout::new(&flat, 1.0).is_none());
    }

    #[test]
    fn test_non_positive_spacing_has_no_layout() {
        assert!(GridLayout::new(&cube(), 0.0).is_none());
        assert!(GridLayout::new(&cube(), -1.0).is_none());
    }

    #[test]
    fn test_extreme_box_has_no_layout() {
        let huge = BoundingBox::new(Vec3::splat(-3.0e38), Vec3::splat(3.0e38));
        assert!(!huge.extent().is_finite());
        assert!(GridLayout::new(&huge, 1.0).is_none());
    }

    #[test]
    fn test_too_many_lines_has_no_layout() {
        let wide = BoundingBox::new(Vec3::ZERO, Vec3::new(1.0e9, 1.0, 1.0));
        assert!(GridLayout::new(&wide, 0.1).is_none());

        let edge = BoundingBox::new(Vec3::ZERO, Vec3::new(9_999.0, 1.0, 1.0));
        let layout = GridLayout::new(&edge, 1.0).unwrap();
        assert_eq!(layout.line_count(Axis::X), MAX_LINES_PER_AXIS);
    }

    #[test]
    fn test_even_division() {
        let layout = GridLayout::new(&cube(), 1.0).unwrap();
        assert_eq!(layout.positions(Axis::X), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(layout.positions(Axis::Y), &[0.0, 1.0, 2.0]);
        assert_eq!(layout.line_count(Axis::X), 5);
    }

    #[test]
    fn test_last_line_clamped_to_max() {
        let bounds = BoundingBox::new(Vec3::ZERO, Vec3::new(2.5, 1.0, 1.0));
        let layout = GridLayout::new(&bounds, 1.0).unwrap();
        assert_eq!(layout.positions(Axis::X), &[0.0, 1.0, 2.0, 2.5]);
        assert_eq!(layout.line_count(Axis::X), 3);
    }

    #[test]
    fn test_spacing_larger_than_box() {
        let layout = GridLayout::new(&cube(), 10.0).unwrap();
        assert_eq!(layout.positions(Axis::X), &[0.0, 4.0]);
    }

    #[test]
    fn test_grid_batch_line_count() {
        let layout = GridLayout::new(&cube(), 1.0).unwrap();
        let batch = layout.grid_batch();
        // x: 5, y: 3, z: 4 positions; each face has two families
        let expected = (4 + 5) + (3 + 5) + (3 + 4);
        assert_eq!(batch.len(), expected);
        assert_eq!(batch.state, DrawState::OVERLAY);
        assert_eq!(batch.width, 1.0);
    }

    #[test]
    fn test_bottom_lines_lie_on_min_y() {
        let layout = GridLayout::new(&cube(), 1.0).unwrap();
        let batch = layout.grid_batch();
        // The first z.len() + x.len() segments belong to the bottom face
        for seg in &batch.segments[..9] {
            assert_eq!(seg.start[1], 0.0);
            assert_eq!(seg.end[1], 0.0);
        }
    }

    #[test]
    fn test_bounding_box_batch() {
        let layout = GridLayout::new(&cube(), 1.0).unwrap();
        let batch = layout.bounding_box_batch();
        assert_eq!(batch.len(), 9);
        assert_eq!(batch.width, 2.0);
    }

    #[test]
    fn test_axes_batch() {
        let layout = GridLayout::new(&cube(), 1.0).unwrap();
        let batch = layout.axes_batch();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.width, 3.0);
        assert!((layout.axis_length() - 0.3).abs() < 1e-6);

        let x = batch.segments[0];
        assert_eq!(x.start, [0.0, 0.0, 0.0]);
        assert!((x.end[0] - 0.3).abs() < 1e-6);
        assert_eq!(x.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.segments[1].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(batch.segments[2].color, [0.0, 0.0, 1.0, 1.0]);
    }
}
