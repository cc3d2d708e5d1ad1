//! Error types for field-core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid radius range: min {min} must be positive and at most max {max}")]
    InvalidRadiusRange { min: f32, max: f32 },

    #[error("invalid pulse speed range: min {min} must be at most max {max}")]
    InvalidPulseRange { min: f32, max: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
