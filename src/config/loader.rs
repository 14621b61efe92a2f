// Configuration file loading and creation

use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;
use super::ConfigError;

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("duopong");
    path.push("config.toml");
    path
}

/// Load configuration from the default location, creating it if it doesn't exist
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path();

    if config_path.exists() {
        load_config_from(&config_path)
    } else {
        create_default_config(&config_path)?;
        Ok(Config::default())
    }
}

/// Load and validate a configuration file
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config)?;

    let commented_toml = format!(
        "# duopong configuration file\n\
         # Edit this file to customize the match\n\
         # Changes take effect the next time the game starts\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\",\n\
         #                     \"Space\", \"Tab\", \"Backspace\" or single characters like \"W\"\n\
         #\n\
         # Physics values are in field units per tick\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    fs::write(path, commented_toml).map_err(io_err)?;

    tracing::info!(path = %path.display(), "created default configuration");
    Ok(())
}
