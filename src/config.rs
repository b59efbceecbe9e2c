//! Configuration management for the trip planner
//!
//! Values come from an optional TOML file, then `TRIPPLANNER_` environment
//! variables (nested keys separated by `__`, e.g. `TRIPPLANNER_LLM__MODEL`).
//! `GEMINI_API_KEY` and `OPENWEATHER_API_KEY` fill the API keys when the
//! prefixed variables are not set.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPlannerConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Text-generation service settings
    pub llm: LlmConfig,
    /// Weather service settings
    pub weather: WeatherConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Upper bound for one form submission, both outbound calls included
    pub request_timeout_seconds: u32,
    /// Directory served under `/static`
    pub static_dir: String,
}

/// Text-generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Base URL of the Gemini REST API
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP/HTTP collector base URL; export is disabled when unset
    pub otlp_endpoint: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_request_timeout() -> u32 {
    120
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_llm_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

fn default_llm_temperature() -> f32 {
    1.0
}

fn default_llm_timeout() -> u32 {
    60
}

fn default_weather_base_url() -> String {
    "http://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
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
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.into())
    }
}

impl TripPlannerConfig {
    /// Load configuration from the given file, falling back to `config.toml`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let mut builder = Config::builder();
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_fallbacks();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Fill missing API keys from the provider-conventional variable names
    pub fn apply_env_fallbacks(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        if self.weather.api_key.is_none() {
            self.weather.api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        }
    }

    /// Replace empty or zero values with their defaults
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.llm.endpoint.is_empty() {
            self.llm.endpoint = default_llm_endpoint();
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
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
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Keys are optional at startup; a request without one fails with a
    /// displayed error. A key that is present must not be blank.
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(key) = &self.llm.api_key {
            if key.trim().is_empty() {
                return Err(TripPlannerError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if let Some(key) = &self.weather.api_key {
            if key.trim().is_empty() {
                return Err(TripPlannerError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(TripPlannerError::config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            ))
            .into());
        }

        if self.llm.timeout_seconds > 600 {
            return Err(TripPlannerError::config("LLM timeout cannot exceed 600 seconds").into());
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                TripPlannerError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 900 {
            return Err(
                TripPlannerError::config("Request timeout cannot exceed 900 seconds").into(),
            );
        }

        // The request layer must outlive both outbound calls, otherwise the
        // client sees an empty 408 instead of the outcome text.
        let outbound = self.llm.timeout_seconds + self.weather.timeout_seconds;
        if self.server.request_timeout_seconds < outbound {
            return Err(TripPlannerError::config(format!(
                "Request timeout ({}s) must be at least the LLM and weather timeouts combined ({}s)",
                self.server.request_timeout_seconds, outbound
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("LLM endpoint", &self.llm.endpoint),
            ("Weather API base URL", &self.weather.base_url),
        ] {
            if !is_http_url(url) {
                return Err(TripPlannerError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if !is_http_url(endpoint) {
                return Err(TripPlannerError::config(
                    "OTLP endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Path shown in verbose startup output
    #[must_use]
    pub fn describe_source(path: Option<&Path>) -> String {
        match path {
            Some(path) => path.display().to_string(),
            None => format!("{} (if present) and environment", Self::default_config_path().display()),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
