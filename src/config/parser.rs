use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// Every section and key is optional; missing values fall back to the
/// defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let settings: Settings = toml::from_str(&content)?;

    validate(&settings)?;

    Ok(settings)
}

/// Computes a SHA-256 hash of the settings file content
///
/// Logged at startup so a rendered document can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads settings and returns them together with the file hash
pub fn load_config_with_hash(path: &Path) -> Result<(Settings, String), ConfigError> {
    let settings = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((settings, hash))
}
