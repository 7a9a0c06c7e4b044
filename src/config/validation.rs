use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.retry_attempts < 1 || config.retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be between 1 and 10, got {}",
            config.retry_attempts
        )));
    }

    if config.retry_backoff_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "retry-backoff-ms must be <= 60000, got {}",
            config.retry_backoff_ms
        )));
    }

    if config.max_concurrent_downloads < 1 || config.max_concurrent_downloads > 32 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-downloads must be between 1 and 32, got {}",
            config.max_concurrent_downloads
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_timeout_secs < 1 || config.page_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "page-timeout-secs must be between 1 and 300, got {}",
            config.page_timeout_secs
        )));
    }

    if config.file_timeout_secs < 1 || config.file_timeout_secs > 3600 {
        return Err(ConfigError::Validation(format!(
            "file-timeout-secs must be between 1 and 3600, got {}",
            config.file_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.download_root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "download-root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = Config::default();
        config.crawler.retry_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_retry_attempts_rejected() {
        let mut config = Config::default();
        config.crawler.retry_attempts = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.max_concurrent_downloads = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.http.page_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_download_root_rejected() {
        let mut config = Config::default();
        config.output.download_root = String::new();
        assert!(validate(&config).is_err());
    }
}
