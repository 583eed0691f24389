use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::core::paginator::{DEFAULT_MAX_PAGES, DEFAULT_PLACE_TYPE};
use crate::services::DEFAULT_BASE_URL;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub places: PlacesSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl PlacesSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_page_token_delay_ms")]
    pub page_token_delay_ms: u64,
    #[serde(default = "default_place_type")]
    pub place_type: String,
    #[serde(default = "default_enforce_max_distance")]
    pub enforce_max_distance: bool,
}

impl SearchSettings {
    pub fn page_token_delay(&self) -> Duration {
        Duration::from_millis(self.page_token_delay_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_token_delay_ms: default_page_token_delay_ms(),
            place_type: default_place_type(),
            enforce_max_distance: default_enforce_max_distance(),
        }
    }
}

fn default_max_pages() -> usize { DEFAULT_MAX_PAGES }
fn default_page_token_delay_ms() -> u64 { 2000 }
fn default_place_type() -> String { DEFAULT_PLACE_TYPE.to_string() }
fn default_enforce_max_distance() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Let LOG_LEVEL and LOG_FORMAT win over the configured values
    pub fn with_env_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            self.format = format;
        }
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FMF_)
    /// 5. The Places API key from GMAPS_API_KEY or NEXT_PUBLIC_GMAPS_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FMF__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FMF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the well-known API key variables used by the web client's deployment
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GMAPS_API_KEY")
        .or_else(|_| env::var("NEXT_PUBLIC_GMAPS_API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("places.api_key", api_key)?;
    }

    builder.build()
}
