//! Runtime configuration.
//!
//! Settings are layered: built-in defaults, then environment variables (a
//! `.env` file is loaded by the binary first), then command-line overrides.
//! The result is published once with [`init`] because bubbletea's
//! `Model::init` takes no arguments; [`App`](crate::app::App) reads it back
//! with [`current`].

use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::error::ConfigError;
use crate::pagination::DEFAULT_MAX_VISIBLE;
use crate::search::DEFAULT_BASE_URL;

/// Results per page when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 40;
/// How long notices stay on screen by default.
pub const DEFAULT_NOTICE_TIMEOUT: Duration = Duration::from_millis(3000);

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Everything the gallery needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pixabay API key.
    pub api_key: String,
    /// Search endpoint.
    pub base_url: String,
    /// Results per page, 3..=200 as accepted by the API.
    pub per_page: u32,
    /// Number of page buttons in the pagination row.
    pub max_visible: u32,
    /// How long a notice stays visible.
    pub notice_timeout: Duration,
    /// Pixabay `image_type` filter.
    pub image_type: String,
    /// Pixabay `orientation` filter.
    pub orientation: String,
    /// Pixabay `safesearch` flag.
    pub safesearch: bool,
    /// Query searched for at startup.
    pub initial_query: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_visible: DEFAULT_MAX_VISIBLE,
            notice_timeout: DEFAULT_NOTICE_TIMEOUT,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
            initial_query: None,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--api-key`
    pub api_key: Option<String>,
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--per-page`
    pub per_page: Option<u32>,
    /// `--max-visible`
    pub max_visible: Option<u32>,
    /// Positional `QUERY`
    pub query: Option<String>,
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with variables from `lookup`.
    ///
    /// Reads `PIXABAY_API_KEY`, `PIXABAY_BASE_URL`, `GALLERY_PER_PAGE`,
    /// `GALLERY_MAX_VISIBLE` and `GALLERY_NOTICE_TIMEOUT_MS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(key) = lookup("PIXABAY_API_KEY") {
            config.api_key = key;
        }
        if let Some(url) = lookup("PIXABAY_BASE_URL") {
            config.base_url = url;
        }
        if let Some(v) = lookup("GALLERY_PER_PAGE") {
            config.per_page = parse_number("GALLERY_PER_PAGE", &v)?;
        }
        if let Some(v) = lookup("GALLERY_MAX_VISIBLE") {
            config.max_visible = parse_number("GALLERY_MAX_VISIBLE", &v)?;
        }
        if let Some(v) = lookup("GALLERY_NOTICE_TIMEOUT_MS") {
            let ms: u32 = parse_number("GALLERY_NOTICE_TIMEOUT_MS", &v)?;
            config.notice_timeout = Duration::from_millis(u64::from(ms));
        }
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(key) = overrides.api_key {
            self.api_key = key;
        }
        if let Some(url) = overrides.base_url {
            self.base_url = url;
        }
        if let Some(n) = overrides.per_page {
            self.per_page = n;
        }
        if let Some(n) = overrides.max_visible {
            self.max_visible = n;
        }
        if overrides.query.is_some() {
            self.initial_query = overrides.query;
        }
        self
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !(3..=200).contains(&self.per_page) {
            return Err(invalid("per_page", self.per_page, "must be between 3 and 200"));
        }
        if self.max_visible == 0 {
            return Err(invalid("max_visible", self.max_visible, "must be at least 1"));
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value, "not a whole number"))
}

fn invalid(key: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Publishes the configuration for the running program.
pub fn init(config: Config) -> Result<(), ConfigError> {
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInitialised)
}

/// The published configuration, or the defaults if none was published.
pub fn current() -> Config {
    CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.per_page, 40);
        assert_eq!(config.max_visible, 10);
        assert_eq!(config.base_url, "https://pixabay.com/api/");
        assert_eq!(config.notice_timeout, Duration::from_secs(3));
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_environment_layer() {
        let config = Config::from_lookup(lookup(&[
            ("PIXABAY_API_KEY", "abc"),
            ("GALLERY_PER_PAGE", "20"),
            ("GALLERY_MAX_VISIBLE", "7"),
            ("GALLERY_NOTICE_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.max_visible, 7);
        assert_eq!(config.notice_timeout, Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_number_in_environment() {
        let err = Config::from_lookup(lookup(&[("GALLERY_PER_PAGE", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "GALLERY_PER_PAGE"));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::from_lookup(lookup(&[("PIXABAY_API_KEY", "env")]))
            .unwrap()
            .with_overrides(Overrides {
                api_key: Some("flag".to_string()),
                per_page: Some(12),
                query: Some("otters".to_string()),
                ..Overrides::default()
            });
        assert_eq!(config.api_key, "flag");
        assert_eq!(config.per_page, 12);
        assert_eq!(config.initial_query.as_deref(), Some("otters"));
        assert_eq!(config.max_visible, 10);
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = Config {
            api_key: "k".to_string(),
            ..Config::default()
        };
        config.per_page = 2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
        config.per_page = 40;
        config.max_visible = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }
}
