use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub google: GoogleSettings,
    #[serde(default)]
    pub yelp: YelpSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

fn default_google_base_url() -> String { "https://maps.googleapis.com".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct YelpSettings {
    #[serde(default = "default_yelp_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for YelpSettings {
    fn default() -> Self {
        Self {
            base_url: default_yelp_base_url(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

fn default_yelp_base_url() -> String { "https://api.yelp.com".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_restaurant_limit")]
    pub restaurant_limit: usize,
    #[serde(default = "default_places_limit")]
    pub places_limit: usize,
    #[serde(default = "default_photo_lookups")]
    pub photo_lookups: usize,
    #[serde(default = "default_cuisine_target")]
    pub cuisine_target: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            restaurant_limit: default_restaurant_limit(),
            places_limit: default_places_limit(),
            photo_lookups: default_photo_lookups(),
            cuisine_target: default_cuisine_target(),
        }
    }
}

fn default_location() -> String { "New York".to_string() }
fn default_restaurant_limit() -> usize { 24 }
fn default_places_limit() -> usize { 40 }
fn default_photo_lookups() -> usize { 16 }
fn default_cuisine_target() -> usize { 8 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub capacity: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: Some(60),
            capacity: Some(1000),
        }
    }
}

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SCOUT)
    /// 5. GOOGLE_MAPS_API_KEY and YELP_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SCOUT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SCOUT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_api_keys(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the conventional vendor key variables on top of the layered config
fn substitute_api_keys(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let google_key = env::var("GOOGLE_MAPS_API_KEY").ok().filter(|k| !k.is_empty());
    let yelp_key = env::var("YELP_API_KEY").ok().filter(|k| !k.is_empty());

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = google_key {
        builder = builder.set_override("google.api_key", key)?;
    }
    if let Some(key) = yelp_key {
        builder = builder.set_override("yelp.api_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_settings() {
        let search = SearchSettings::default();
        assert_eq!(search.default_location, "New York");
        assert_eq!(search.restaurant_limit, 24);
        assert_eq!(search.places_limit, 40);
        assert_eq!(search.photo_lookups, 16);
        assert_eq!(search.cuisine_target, 8);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_config_deserializes_with_defaults() {
        let settings: Settings = Config::builder()
            .set_override("server.port", 9090)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.google.base_url, "https://maps.googleapis.com");
        assert_eq!(settings.cache.ttl_secs, Some(60));
    }
}
