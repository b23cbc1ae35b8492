use crate::config::types::{CrawlerSettings, FilterSettings, OutputSettings, SessionSettings, Settings};
use crate::ConfigError;

/// Validates the entire settings tree
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_crawler_settings(&settings.crawler)?;
    validate_session_settings(&settings.session)?;
    validate_filter_settings(&settings.filter)?;
    validate_output_settings(&settings.output)?;
    Ok(())
}

fn validate_crawler_settings(settings: &CrawlerSettings) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if settings.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            settings.max_pages
        )));
    }

    if settings.navigation_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "navigation_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_session_settings(settings: &SessionSettings) -> Result<(), ConfigError> {
    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if settings.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_filter_settings(settings: &FilterSettings) -> Result<(), ConfigError> {
    for ext in &settings.blocked_extensions {
        validate_extension(ext)?;
    }
    Ok(())
}

/// Validates a blocked extension entry (bare suffix such as `pdf`)
fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() {
        return Err(ConfigError::Validation(
            "blocked extension cannot be empty".to_string(),
        ));
    }

    if ext.contains('.') || ext.contains('/') || ext.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "blocked extension '{}' must be a bare suffix without dots, slashes or spaces",
            ext
        )));
    }

    Ok(())
}

fn validate_output_settings(settings: &OutputSettings) -> Result<(), ConfigError> {
    if settings.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
