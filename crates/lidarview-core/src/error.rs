//! Error types for lidarview.

use thiserror::Error;

/// The main error type for lidarview operations.
#[derive(Error, Debug)]
pub enum LidarError {
    /// Grid spacing must be strictly positive.
    #[error("invalid grid spacing {0}: must be greater than zero")]
    InvalidGridSpacing(f32),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Event loop creation or execution failed.
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for lidarview operations.
pub type Result<T> = std::result::Result<T, LidarError>;
