//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use pcaf_scenario::parallel::DEFAULT_PARALLEL_THRESHOLD;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port outside 1..=65535
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(String),

    /// Unrecognised log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unrecognised log format
    #[error("Invalid log format: {0}. Must be one of: text, json")]
    InvalidLogFormat(String),

    /// Unrecognised deployment environment
    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    /// Parallel threshold that is zero or not a number
    #[error("Invalid scenario parallel threshold: {0}. Must be a positive integer")]
    InvalidParallelThreshold(String),

    /// Unreadable or malformed configuration file
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Per-calculation events
    Debug,
    /// Request and lifecycle events
    #[default]
    Info,
    /// Failed scenarios and rejected requests
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Pre-production
    Staging,
    /// Production
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_level: LogLevel,
    /// Log output format
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_format: LogFormat,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_parsed")]
    pub environment: Environment,
    /// Whether to attach a permissive CORS layer
    pub cors_enabled: bool,
    /// Portfolio size from which scenario entries are stressed in parallel
    pub scenario_parallel_threshold: usize,
}

fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            environment: Environment::Development,
            cors_enabled: true,
            scenario_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Environment variable names read by [`ServerConfig::apply_env`].
pub mod env_vars {
    /// Bind host
    pub const HOST: &str = "PCAF_SERVER_HOST";
    /// Bind port
    pub const PORT: &str = "PCAF_SERVER_PORT";
    /// Log level
    pub const LOG_LEVEL: &str = "PCAF_LOG_LEVEL";
    /// Log format
    pub const LOG_FORMAT: &str = "PCAF_LOG_FORMAT";
    /// Deployment environment
    pub const ENV: &str = "PCAF_ENV";
    /// CORS toggle
    pub const CORS_ENABLED: &str = "PCAF_CORS_ENABLED";
    /// Scenario parallel threshold
    pub const SCENARIO_PARALLEL_THRESHOLD: &str = "PCAF_SCENARIO_PARALLEL_THRESHOLD";
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables yielded by `lookup`
    ///
    /// Only variables that are present override; malformed values are errors.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(env_vars::HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(env_vars::PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(level) = lookup(env_vars::LOG_LEVEL) {
            self.log_level = level.parse()?;
        }
        if let Some(format) = lookup(env_vars::LOG_FORMAT) {
            self.log_format = format.parse()?;
        }
        if let Some(env) = lookup(env_vars::ENV) {
            self.environment = env.parse()?;
        }
        if let Some(cors) = lookup(env_vars::CORS_ENABLED) {
            self.cors_enabled = matches!(cors.trim().to_lowercase().as_str(), "true" | "1" | "yes");
        }
        if let Some(threshold) = lookup(env_vars::SCENARIO_PARALLEL_THRESHOLD) {
            self.scenario_parallel_threshold = threshold
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidParallelThreshold(threshold.clone()))?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }
        if self.scenario_parallel_threshold == 0 {
            return Err(ConfigError::InvalidParallelThreshold(
                self.scenario_parallel_threshold.to_string(),
            ));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.parse()?;
        }
        if let Some(log_format) = &cli.log_format {
            self.log_format = log_format.parse()?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Log format override
    pub log_format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.cors_enabled);
        assert_eq!(config.scenario_parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("TEXT").unwrap(), LogFormat::Text);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str("dev").unwrap(), Environment::Development);
        assert_eq!(Environment::from_str("stage").unwrap(), Environment::Staging);
        assert_eq!(Environment::from_str("prod").unwrap(), Environment::Production);
        assert!(Environment::from_str("invalid").is_err());
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(_))));

        config.port = 65535;
        assert!(config.validate().is_ok());

        config.scenario_parallel_threshold = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParallelThreshold(_))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            log_format = "json"
            environment = "production"
            cors_enabled = false
            scenario_parallel_threshold = 250
        "#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.cors_enabled);
        assert_eq!(config.scenario_parallel_threshold, 250);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: ServerConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_toml_rejects_bad_log_level() {
        assert!(toml::from_str::<ServerConfig>(r#"log_level = "loud""#).is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[
                ("PCAF_SERVER_PORT", "9100"),
                ("PCAF_LOG_FORMAT", "json"),
                ("PCAF_CORS_ENABLED", "false"),
                ("PCAF_SCENARIO_PARALLEL_THRESHOLD", "64"),
            ]))
            .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.cors_enabled);
        assert_eq!(config.scenario_parallel_threshold, 64);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_env_rejects_malformed_values() {
        let mut config = ServerConfig::default();
        assert!(matches!(
            config.apply_env(env(&[("PCAF_SERVER_PORT", "eighty")])),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            config.apply_env(env(&[("PCAF_SCENARIO_PARALLEL_THRESHOLD", "-3")])),
            Err(ConfigError::InvalidParallelThreshold(_))
        ));
    }

    #[test]
    fn test_cli_takes_precedence_over_env() {
        let cli = CliArgs {
            port: Some(7000),
            log_level: Some("warn".to_string()),
            ..Default::default()
        };
        let config = build_config_with_env(
            &cli,
            env(&[("PCAF_SERVER_PORT", "9100"), ("PCAF_SERVER_HOST", "10.0.0.1")]),
        )
        .unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_cli_rejects_bad_log_level() {
        let cli = CliArgs {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        assert!(build_config_with_env(&cli, env(&[])).is_err());
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), env(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/pcaf.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPort("0".to_string());
        assert!(err.to_string().contains("Invalid port"));

        let err = ConfigError::InvalidLogFormat("xml".to_string());
        assert!(err.to_string().contains("text, json"));
    }
}
