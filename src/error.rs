//! Configuration errors
//!
//! Ticks never fail; a round either starts from a valid config or not at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen {axis} must be finite and positive, got {value}")]
    BadDimension { axis: &'static str, value: f32 },
    #[error("screen height {height} leaves no room for the wire (need more than {min})")]
    TooShort { height: f32, min: f32 },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
