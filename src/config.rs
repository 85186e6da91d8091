//! Runtime configuration for the explorer.
//!
//! The only environment input is the API base URL; everything else has a default.

use crate::error::ExplorerError;
use bon::bon;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "STATION_EXPLORER_API_BASE";

/// Declared request budget of the upstream API. Informational only, nothing enforces it.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Quiet period after the last keystroke before a search is filtered.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the API client and the search pipeline.
///
/// # Examples
///
/// ```
/// use station_explorer::ExplorerConfig;
/// use std::time::Duration;
///
/// let config = ExplorerConfig::builder()
///     .base_url("https://weather.example.com/api/")
///     .search_debounce(Duration::from_millis(150))
///     .build();
/// assert_eq!(config.base_url(), "https://weather.example.com/api");
/// assert_eq!(config.rate_limit_per_minute(), 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    base_url: String,
    rate_limit_per_minute: u32,
    search_debounce: Duration,
    user_agent: String,
}

#[bon]
impl ExplorerConfig {
    #[builder]
    pub fn new(
        #[builder(into)] base_url: String,
        rate_limit_per_minute: Option<u32>,
        search_debounce: Option<Duration>,
        #[builder(into)] user_agent: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            rate_limit_per_minute: rate_limit_per_minute.unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE),
            search_debounce: search_debounce.unwrap_or(DEFAULT_SEARCH_DEBOUNCE),
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ExplorerConfig {
    /// Builds a configuration from [`BASE_URL_ENV`], using defaults for everything else.
    pub fn from_env() -> Result<Self, ExplorerError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ExplorerError::MissingBaseUrl(BASE_URL_ENV))?;
        Ok(Self::builder().base_url(base_url).build())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn stations_url(&self) -> String {
        format!("{}/stations", self.base_url)
    }

    pub(crate) fn historical_weather_url(&self) -> String {
        format!("{}/historical_weather", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::builder().base_url("http://localhost:8080").build();
        assert_eq!(config.rate_limit_per_minute(), DEFAULT_RATE_LIMIT_PER_MINUTE);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert!(config.user_agent().starts_with("station_explorer/"));
    }

    #[test]
    fn test_urls_are_normalised() {
        let config = ExplorerConfig::builder().base_url(" http://host/api// ").build();
        assert_eq!(config.base_url(), "http://host/api");
        assert_eq!(config.stations_url(), "http://host/api/stations");
        assert_eq!(config.historical_weather_url(), "http://host/api/historical_weather");
    }
}
