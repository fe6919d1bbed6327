/*
 * Error Module
 *
 * Errors surfaced by the simulation: invalid entity construction and
 * failures while loading a scene configuration. Numerical edge cases
 * (coincident poles, zero fields) are handled in place and never show up here.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagnetError {
    #[error("Invalid {what}: {value} (must be positive and finite)")]
    InvalidGeometry { what: &'static str, value: f32 },

    #[error("Invalid strength: {0} (must be finite and non-negative)")]
    InvalidStrength(f32),

    #[error("Invalid orientation: {0} (must be finite)")]
    InvalidOrientation(f32),

    #[error("Invalid position: ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },

    #[error("Unknown source index {index} (scene has {count} dipoles)")]
    UnknownSource { index: usize, count: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type MagnetResult<T> = Result<T, MagnetError>;

/// Checks that a geometric quantity is strictly positive and finite.
pub(crate) fn ensure_positive(what: &'static str, value: f32) -> MagnetResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MagnetError::InvalidGeometry { what, value })
    }
}

pub(crate) fn ensure_strength(value: f32) -> MagnetResult<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MagnetError::InvalidStrength(value))
    }
}
