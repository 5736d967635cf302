//! Per-sample display color rules.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Sample};

/// Rule used to derive a sample's display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColorMode {
    /// The sample's own color.
    #[default]
    Rgb,
    /// Blue-green-red gradient over the normalized height (Y).
    Height,
    /// Grayscale from the sample's intensity.
    Intensity,
    /// Fixed white.
    Uniform,
}

impl ColorMode {
    /// All modes in UI order.
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Rgb,
        ColorMode::Height,
        ColorMode::Intensity,
        ColorMode::Uniform,
    ];

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Rgb => "RGB Colors",
            ColorMode::Height => "Height Map",
            ColorMode::Intensity => "Intensity",
            ColorMode::Uniform => "Uniform White",
        }
    }

    /// Resolves the display color of `sample`.
    ///
    /// `Height` divides by the Y extent of `bounds`; a flat cloud yields NaN
    /// components.
    #[must_use]
    pub fn resolve(self, sample: &Sample, bounds: &BoundingBox) -> Vec3 {
        match self {
            ColorMode::Rgb => sample.color,
            ColorMode::Height => {
                let t = (sample.position.y - bounds.min.y) / (bounds.max.y - bounds.min.y);
                height_gradient(t)
            }
            ColorMode::Intensity => Vec3::splat(sample.intensity),
            ColorMode::Uniform => Vec3::ONE,
        }
    }
}

/// Blue (0) to green (0.5) to red (1) ramp.
#[must_use]
pub fn height_gradient(t: f32) -> Vec3 {
    Vec3::new(t, 1.0 - (t - 0.5).abs() * 2.0, 1.0 - t)
}
