use std::path::PathBuf;

use thiserror::Error;

/// Setup-time failures. Any of these means the scene must not enter its tick loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("missing required reference: {0}")]
    MissingReference(&'static str),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Errors surfaced to whoever owns the tick loop. Both variants are fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("behavior controller observed non-resident state {0}")]
    UnreachableState(&'static str),
}

pub fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

pub fn require_finite(field: &'static str, value: glam::Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

pub fn require_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
