//! Configuration management for the `TempCep` service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates every setting before the server starts.

use crate::TempCepError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for overrides, e.g. `TEMPCEP_SERVER__PORT`
const ENV_PREFIX: &str = "TEMPCEP";

/// Environment variable naming an alternative config file
const CONFIG_PATH_VAR: &str = "TEMPCEP_CONFIG";

/// Fallback environment variable for the WeatherAPI key
const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Root configuration structure for the `TempCep` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub viacep: ViaCepConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inbound HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// WeatherAPI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI key, required
    #[serde(default)]
    pub api_key: String,
    /// Base URL for WeatherAPI
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

/// ViaCEP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViaCepConfig {
    /// Base URL for ViaCEP
    #[serde(default = "default_viacep_base_url")]
    pub base_url: String,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_weather_base_url() -> String {
    "http://api.weatherapi.com".to_string()
}

fn default_viacep_base_url() -> String {
    "http://viacep.com.br".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("TempCep/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: default_viacep_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from_path(config_path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_from_sources(config_path, None)
    }

    /// Load configuration from specified path and environment.
    ///
    /// `env_vars` replaces the process environment when given.
    pub fn load_from_sources(
        config_path: Option<PathBuf>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        let api_key_fallback = match &env_vars {
            Some(vars) => vars.get(API_KEY_VAR).cloned(),
            None => std::env::var(API_KEY_VAR).ok(),
        };

        // Add environment variable overrides with TEMPCEP_ prefix
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ServiceConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.weather.api_key.is_empty() {
            if let Some(api_key) = api_key_fallback {
                config.weather.api_key = api_key;
            }
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.viacep.base_url.is_empty() {
            self.viacep.base_url = default_viacep_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the WeatherAPI credential
    pub fn validate_api_key(&self) -> Result<()> {
        let api_key = self.weather.api_key.trim();
        if api_key.is_empty() {
            return Err(TempCepError::config(format!(
                "Weather API key is required. Set {ENV_PREFIX}_WEATHER__API_KEY or {API_KEY_VAR}."
            ))
            .into());
        }

        if api_key.len() > 100 {
            return Err(TempCepError::config(
                "Weather API key appears to be invalid (too long). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(TempCepError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TempCepError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TempCepError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather API", &self.weather.base_url),
            ("ViaCEP", &self.viacep.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TempCepError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
