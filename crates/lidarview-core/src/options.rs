//! Configuration options for the renderer and the viewer.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{LidarError, Result};
use crate::ColorMode;

/// Scene rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Screen-space point diameter in pixels.
    pub point_size: f32,

    /// How sample colors are derived.
    pub color_mode: ColorMode,

    /// Whether the reference grid is drawn.
    pub show_grid: bool,

    /// Whether axis labels are drawn (also requires the grid).
    pub show_axis_labels: bool,

    /// Distance between grid lines in world units. Always > 0.
    grid_spacing: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            point_size: 2.0,
            color_mode: ColorMode::Rgb,
            show_grid: true,
            show_axis_labels: true,
            grid_spacing: 1.0,
        }
    }
}

impl RenderOptions {
    /// Grid line spacing in world units.
    #[must_use]
    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    /// Sets the grid spacing. Rejects non-positive and non-finite values.
    pub fn set_grid_spacing(&mut self, spacing: f32) -> Result<()> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(LidarError::InvalidGridSpacing(spacing));
        }
        self.grid_spacing = spacing;
        Ok(())
    }

    /// Checks invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(LidarError::InvalidGridSpacing(self.grid_spacing));
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(LidarError::InvalidConfig(format!(
                "point size must be positive, got {}",
                self.point_size
            )));
        }
        Ok(())
    }
}

/// Settings owned by the viewer binary: window, initial dataset and UI ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window title.
    pub window_title: String,

    /// Initial window size in logical pixels.
    pub window_size: [u32; 2],

    /// Number of samples generated at startup.
    pub initial_point_count: u32,

    /// Lower bound of the point count slider.
    pub min_point_count: u32,

    /// Upper bound of the point count slider.
    pub max_point_count: u32,

    /// Clear color.
    pub background_color: Vec3,

    /// Initial render settings.
    pub render: RenderOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "LIDAR Point Cloud Viewer".to_string(),
            window_size: [1600, 900],
            initial_point_count: 100_000,
            min_point_count: 1_000,
            max_point_count: 1_000_000,
            background_color: Vec3::new(0.1, 0.1, 0.15),
            render: RenderOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded viewer config from {}", path.display());
        Ok(config)
    }

    /// Checks ranges and the embedded render options.
    pub fn validate(&self) -> Result<()> {
        if self.window_size[0] == 0 || self.window_size[1] == 0 {
            return Err(LidarError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.window_size[0], self.window_size[1]
            )));
        }
        if self.min_point_count > self.max_point_count {
            return Err(LidarError::InvalidConfig(format!(
                "point count range is empty: {}..={}",
                self.min_point_count, self.max_point_count
            )));
        }
        self.render.validate()
    }

    /// Initial point count clamped into the slider range.
    #[must_use]
    pub fn clamped_initial_point_count(&self) -> u32 {
        self.initial_point_count
            .clamp(self.min_point_count, self.max_point_count)
    }
}
