//! A single labeled point of a cloud.

use glam::Vec3;

/// One 3D point with color and intensity attributes.
///
/// Colors and intensity are expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in world space.
    pub position: Vec3,
    /// RGB color.
    pub color: Vec3,
    /// Return intensity.
    pub intensity: f32,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Creates a white, full-intensity sample at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::ONE, 1.0)
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
