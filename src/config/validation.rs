use crate::config::CrawlConfig;
use crate::url::normalize_url;
use crate::ConfigError;

/// Prepends `https://` to a seed given without a scheme
///
/// Lets users type `example.com` instead of the full URL. Anything that
/// already names an http(s) scheme passes through untouched; other schemes
/// pass through too and are rejected by validation with a clearer message
/// than a parse error.
pub fn coerce_seed_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Validates a crawl configuration before any network work starts
///
/// A configuration that fails here is fatal: the crawl never starts and the
/// process exits nonzero without producing a report.
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    normalize_url(&config.url).map_err(|e| ConfigError::InvalidSeed {
        url: config.url.clone(),
        reason: e.to_string(),
    })?;

    if !config.delay.is_finite() || config.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            config.delay
        )));
    }

    Ok(())
}
