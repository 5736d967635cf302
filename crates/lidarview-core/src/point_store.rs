//! The in-memory point sequence and its derived bounds.

use crate::{BoundingBox, Sample};

/// Owns the current point sequence and keeps its bounding box in sync.
///
/// Every replacement recomputes the bounds before the call returns. Clearing
/// only empties the sequence; the last bounds stay so the grid keeps its
/// frame of reference.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    samples: Vec<Sample>,
    bounds: BoundingBox,
}

impl PointStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence and returns the recomputed bounds.
    pub fn replace(&mut self, samples: Vec<Sample>) -> BoundingBox {
        self.bounds = BoundingBox::from_samples(&samples);
        self.samples = samples;
        log::debug!(
            "point store replaced: {} samples, bounds {:?}..{:?}",
            self.samples.len(),
            self.bounds.min,
            self.bounds.max
        );
        self.bounds
    }

    /// Removes all samples. The bounds are left as they were.
    pub fn clear(&mut self) {
        self.samples.clear();
        log::debug!("point store cleared, bounds kept");
    }

    /// Returns the samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the store holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bounding box of the current samples.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::at(Vec3::new(-2.0, 0.0, 1.0)),
            Sample::at(Vec3::new(2.0, 4.0, -1.0)),
            Sample::at(Vec3::new(0.0, 1.0, 0.0)),
        ]
    }

    #[test]
    fn test_replace_recomputes_bounds() {
        let mut store = PointStore::new();
        let bounds = store.replace(samples());

        assert_eq!(store.len(), 3);
        assert_eq!(bounds, store.bounds());
        assert_eq!(bounds.min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 4.0, 1.0));
    }

    #[test]
    fn test_replace_discards_previous_sequence() {
        let mut store = PointStore::new();
        store.replace(samples());
        store.replace(vec![Sample::at(Vec3::splat(7.0))]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.bounds().min, Vec3::splat(7.0));
        assert_eq!(store.bounds().max, Vec3::splat(7.0));
    }

    #[test]
    fn test_replace_with_empty_clears_bounds() {
        let mut store = PointStore::new();
        store.replace(samples());
        let bounds = store.replace(Vec::new());

        assert!(store.is_empty());
        assert_eq!(bounds, BoundingBox::EMPTY);
    }

    #[test]
    fn test_clear() {
        let mut store = PointStore::new();
        store.replace(samples());
        store.clear();

        assert_eq!(store.len(), 0);
        assert!(store.samples().is_empty());
        assert_eq!(store.bounds().min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(store.bounds().max, Vec3::new(2.0, 4.0, 1.0));
    }
}
