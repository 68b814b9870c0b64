use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    value::Value,
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

use crate::congress::RetryPolicy;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. The bare `MODE` environment variable
/// 4. Environment variables with RF_ prefix (always wins)
///
/// CORS allows any origin unless `RF_CORS__ALLOWED_ORIGINS` (or
/// `cors.allowed_origins`) lists specific ones; an empty value blocks all
/// cross-origin requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub swagger: SwaggerConfig,
    #[serde(default)]
    pub congress: CongressConfig,
    /// Where representative data comes from.
    #[serde(default, deserialize_with = "deserialize_mode")]
    pub mode: DataMode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin (not recommended for production).
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:5173"]` or `"http://localhost:5173,https://app.example.com"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwaggerConfig {
    /// Enable Swagger UI at /swagger-ui.
    /// Default: false. Enable in development via `RF_SWAGGER__ENABLED=true`
    #[serde(default)]
    pub enabled: bool,
}

/// Congress.gov directory settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CongressConfig {
    /// API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key. Read on every request.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Records requested per lookup (the API caps this at 250).
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// How long a successful lookup is served from cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Timeout for each individual request attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per request, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff step; attempt `n` is followed by `n * backoff_ms`.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl CongressConfig {
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_step: Duration::from_millis(self.backoff_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for CongressConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            page_limit: default_page_limit(),
            cache_ttl_secs: default_cache_ttl_secs(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Data source for representative lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Canned sample data, no API key needed
    #[default]
    Mock,
    /// Live Congress.gov lookups
    Real,
}

/// Only `real` (any case) selects live data; everything else means mock.
///
/// The env provider types values as it parses them, so `MODE=1` or
/// `MODE=true` arrive as numbers and booleans rather than strings.
fn deserialize_mode<'de, D>(deserializer: D) -> Result<DataMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Value as Deserialize>::deserialize(deserializer)?;
    if value
        .as_str()
        .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("real"))
    {
        Ok(DataMode::Real)
    } else {
        Ok(DataMode::Mock)
    }
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    // Any origin, so a local client can call the service out of the box.
    // Restrict via RF_CORS__ALLOWED_ORIGINS or config.yaml
    vec!["*".to_string()]
}

fn default_base_url() -> String {
    "https://api.congress.gov/v3".to_string()
}

fn default_api_key_env() -> String {
    "LOC_API_KEY".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_limit() -> u32 {
    75
}

#[allow(clippy::missing_const_for_fn)]
fn default_cache_ttl_secs() -> u64 {
    3600
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    15
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_attempts() -> u32 {
    3
}

#[allow(clippy::missing_const_for_fn)]
fn default_backoff_ms() -> u64 {
    500
}

/// Upper bound for `congress.cache_ttl_secs` (one week).
pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 3600;

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            cors: CorsConfig::default(),
            swagger: SwaggerConfig::default(),
            congress: CongressConfig::default(),
            mode: DataMode::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::raw().only(&["MODE"]))
            .merge(Env::prefixed("RF_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The API key itself is not checked here; a missing key fails each
    /// live lookup instead of startup.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        for origin in &self.cors.allowed_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        let congress = &self.congress;
        if !congress.base_url.starts_with("http://") && !congress.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "congress.base_url must start with http:// or https://, got: '{}'",
                congress.base_url
            )));
        }

        if congress.api_key_env.trim().is_empty() {
            return Err(ConfigError::Validation(
                "congress.api_key_env cannot be empty".into(),
            ));
        }

        if congress.page_limit == 0 || congress.page_limit > 250 {
            return Err(ConfigError::Validation(format!(
                "congress.page_limit must be between 1 and 250, got: {}",
                congress.page_limit
            )));
        }

        if congress.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "congress.max_attempts cannot be 0".into(),
            ));
        }

        if congress.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "congress.timeout_secs cannot be 0".into(),
            ));
        }

        if congress.cache_ttl_secs == 0 || congress.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::Validation(format!(
                "congress.cache_ttl_secs must be between 1 and {MAX_CACHE_TTL_SECS}, got: {}",
                congress.cache_ttl_secs
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.mode, DataMode::Mock);
        assert_eq!(config.congress.base_url, "https://api.congress.gov/v3");
        assert_eq!(config.congress.api_key_env, "LOC_API_KEY");
        assert_eq!(config.congress.page_limit, 75);
        assert_eq!(config.congress.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_default_retry_policy_matches_client_default() {
        let config = Config::default();
        assert_eq!(config.congress.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_validation_accepts_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_cors_defaults_to_any_origin() {
        let config = CorsConfig::default();
        assert_eq!(config.allowed_origins, vec!["*"]);
    }

    #[test]
    fn test_cors_deserialize_comma_separated_string() {
        // Simulate what figment does with env var
        let json = r#"{"allowed_origins": "http://localhost:5173,https://app.example.com"}"#;
        let config: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[0], "http://localhost:5173");
        assert_eq!(config.allowed_origins[1], "https://app.example.com");
    }

    #[test]
    fn test_cors_deserialize_empty_string() {
        let json = r#"{"allowed_origins": ""}"#;
        let config: CorsConfig = serde_json::from_str(json).expect("should parse");
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_swagger_disabled_by_default() {
        let config = SwaggerConfig::default();
        assert!(!config.enabled);
    }

    #[test]
    fn mode_parsing() {
        let cases = [
            ("real", DataMode::Real),
            ("REAL", DataMode::Real),
            (" Real ", DataMode::Real),
            ("mock", DataMode::Mock),
            ("", DataMode::Mock),
            ("production", DataMode::Mock),
        ];

        for (value, expected) in cases {
            let json = format!(r#"{{"server": {{}}, "logging": {{}}, "mode": "{value}"}}"#);
            let config: Config = serde_json::from_str(&json).expect("should parse");
            assert_eq!(config.mode, expected, "case '{value}'");
        }
    }

    #[test]
    fn load_reads_bare_mode_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("MODE", "real");
            let config = Config::load_from("missing.yaml").expect("load");
            assert_eq!(config.mode, DataMode::Real);

            for value in ["true", "1", "0.5", "mock"] {
                jail.set_env("MODE", value);
                let config = Config::load_from("missing.yaml").expect("load");
                assert_eq!(config.mode, DataMode::Mock, "MODE={value}");
            }
            Ok(())
        });
    }

    #[test]
    fn load_prefixed_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
server:
  port: 9000
congress:
  page_limit: 100
  backoff_ms: 250
",
            )?;
            jail.set_env("RF_SERVER__PORT", "9100");
            jail.set_env("RF_CORS__ALLOWED_ORIGINS", "http://localhost:5173");

            let config = Config::load_from("config.yaml").expect("load");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.congress.page_limit, 100);
            assert_eq!(
                config.congress.retry_policy().backoff_step,
                Duration::from_millis(250)
            );
            assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
            Ok(())
        });
    }

    #[test]
    fn load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("RF_CONGRESS__MAX_ATTEMPTS", "0");
            let result = Config::load_from("missing.yaml");
            assert!(matches!(result, Err(ConfigError::Validation(_))));

            jail.set_env("RF_CONGRESS__MAX_ATTEMPTS", "3");
            jail.set_env("RF_CONGRESS__CACHE_TTL_SECS", "18446744073709551615");
            let result = Config::load_from("missing.yaml");
            assert!(matches!(result, Err(ConfigError::Validation(_))));
            Ok(())
        });
    }

    // Table-driven boundary tests for validation rules

    #[test]
    fn port_boundaries() {
        let cases = [
            (0u16, false, "zero port"),
            (1, true, "minimum valid port"),
            (8080, true, "default port"),
            (65535, true, "maximum port"),
        ];

        for (port, should_pass, desc) in cases {
            let mut config = Config::default();
            config.server.port = port;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn page_limit_boundaries() {
        let cases = [
            (0u32, false, "zero"),
            (1, true, "minimum"),
            (75, true, "default"),
            (250, true, "upstream maximum"),
            (251, false, "above upstream maximum"),
        ];

        for (limit, should_pass, desc) in cases {
            let mut config = Config::default();
            config.congress.page_limit = limit;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn congress_timing_boundaries() {
        let mut config = Config::default();
        config.congress.timeout_secs = 0;
        assert!(config.validate().is_err());

        let ttl_cases = [
            (0u64, false, "zero"),
            (1, true, "minimum"),
            (MAX_CACHE_TTL_SECS, true, "one week"),
            (MAX_CACHE_TTL_SECS + 1, false, "above one week"),
            (u64::MAX, false, "overflows instant arithmetic"),
        ];
        for (ttl, should_pass, desc) in ttl_cases {
            let mut config = Config::default();
            config.congress.cache_ttl_secs = ttl;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }

        let mut config = Config::default();
        config.congress.backoff_ms = 0;
        assert!(config.validate().is_ok(), "zero backoff is allowed");
    }

    #[test]
    fn base_url_boundaries() {
        let cases = [
            ("https://api.congress.gov/v3", true, "default"),
            ("http://127.0.0.1:9999", true, "local http"),
            ("api.congress.gov", false, "no scheme"),
            ("", false, "empty"),
        ];

        for (url, should_pass, desc) in cases {
            let mut config = Config::default();
            config.congress.base_url = url.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn cors_origin_boundaries() {
        let cases = [
            (vec!["*"], true, "wildcard"),
            (vec!["http://localhost"], true, "http localhost"),
            (vec!["https://example.com"], true, "https domain"),
            (vec![], true, "empty list"),
            (vec!["ftp://files.com"], false, "ftp scheme"),
            (vec!["localhost"], false, "no scheme"),
        ];

        for (origins, should_pass, desc) in cases {
            let mut config = Config::default();
            config.cors.allowed_origins = origins.into_iter().map(String::from).collect();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }
}
