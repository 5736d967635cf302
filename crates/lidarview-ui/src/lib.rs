//! UI layer for lidarview using egui.

// Slider ranges and pixel conversions cast between integer and float types
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]

pub mod integration;
pub mod overlay;
pub mod panels;

pub use integration::EguiIntegration;
pub use overlay::EguiLabelSurface;
pub use panels::*;
