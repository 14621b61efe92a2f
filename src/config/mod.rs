// Configuration module for duopong
// Handles loading, validating and creating the TOML config file

pub mod loader;
pub mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{create_default_config, get_config_path, load_config, load_config_from};
pub use types::{Config, DisplayConfig, KeyBindings, PhysicsConfig};

/// Everything that can be wrong with a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("paddle_offset must not be negative, got {0}")]
    NegativeOffset(f32),

    #[error("paddle height {paddle_height} does not fit a field {field_height} high")]
    PaddleTallerThanField { paddle_height: f32, field_height: f32 },

    #[error(
        "paddles at offset {offset} with width {paddle_width} do not fit a field {field_width} wide"
    )]
    PaddleOutsideField {
        offset: f32,
        paddle_width: f32,
        field_width: f32,
    },

    #[error("ball diameter {diameter} does not fit a {field_width}x{field_height} field")]
    BallLargerThanField {
        diameter: f32,
        field_width: f32,
        field_height: f32,
    },

    #[error("best_of must be at least 1")]
    ZeroBestOf,

    #[error("target_fps must be at least 1")]
    ZeroFrameRate,

    #[error("unknown key binding {0:?}")]
    UnknownKey(String),

    #[error("key {0:?} is bound to more than one action")]
    DuplicateKey(String),

    #[error("failed to read or write config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
