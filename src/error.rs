//! Error types for the fallible edges of the engine.
//!
//! The analysis core itself never fails: degenerate input produces empty or
//! NaN-valued output. Errors only arise when loading configuration or frame
//! files, exporting reports, or validating parameters handed in from outside.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid frame rate: {0} (must be finite and positive)")]
    InvalidFrameRate(f64),
}

pub type Result<T> = std::result::Result<T, GaitError>;
