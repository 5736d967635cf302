//! Axis-aligned bounding box of a point sequence.

use glam::Vec3;

use crate::Sample;

/// Axis-aligned min/max extent of a point sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Degenerate box collapsed onto the origin, used for empty sequences.
    pub const EMPTY: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of `samples` in one pass.
    ///
    /// Returns [`BoundingBox::EMPTY`] for an empty slice.
    #[must_use]
    pub fn from_samples(samples: &[Sample]) -> Self {
        let Some(first) = samples.first() else {
            return Self::EMPTY;
        };

        let (min, max) = samples
            .iter()
            .fold((first.position, first.position), |(min, max), s| {
                (min.min(s.position), max.max(s.position))
            });

        Self { min, max }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest of the three side lengths.
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }

    /// Smallest of the three side lengths.
    #[must_use]
    pub fn min_extent(&self) -> f32 {
        self.extent().min_element()
    }

    /// Whether any side has zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let e = self.extent();
        e.x == 0.0 || e.y == 0.0 || e.z == 0.0
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_samples_give_degenerate_box() {
        let bounds = BoundingBox::from_samples(&[]);
        assert_eq!(bounds, BoundingBox::EMPTY);
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.min, bounds.max);
    }

    #[test]
    fn test_single_sample_is_degenerate() {
        let bounds = BoundingBox::from_samples(&[Sample::at(Vec3::new(1.0, 2.0, 3.0))]);
        assert_eq!(bounds.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
        assert!(bounds.is_degenerate());
    }

    #[test]
    fn test_extents() {
        let bounds = BoundingBox::from_samples(&[
            Sample::at(Vec3::new(-1.0, 0.0, 2.0)),
            Sample::at(Vec3::new(3.0, 5.0, -2.0)),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 5.0, 2.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, 2.5, 0.0));
        assert_eq!(bounds.max_extent(), 5.0);
        assert_eq!(bounds.min_extent(), 4.0);
        assert!(!bounds.is_degenerate());
    }

    #[test]
    fn test_flat_cloud_is_degenerate() {
        let bounds = BoundingBox::from_samples(&[
            Sample::at(Vec3::new(0.0, 1.0, 0.0)),
            Sample::at(Vec3::new(4.0, 1.0, 4.0)),
        ]);
        assert!(bounds.is_degenerate());
    }

    fn coord() -> impl Strategy<Value = f32> {
        -1.0e4f32..1.0e4
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_every_sample(
            points in prop::collection::vec((coord(), coord(), coord()), 1..200)
        ) {
            let samples: Vec<Sample> = points
                .iter()
                .map(|&(x, y, z)| Sample::at(Vec3::new(x, y, z)))
                .collect();
            let bounds = BoundingBox::from_samples(&samples);
            for s in &samples {
                prop_assert!(bounds.contains(s.position));
            }
        }
    }
}
