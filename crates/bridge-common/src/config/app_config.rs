//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support
//! through dotenvy). Missing required variables are fatal at startup.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub app: AppSettings,
    pub gateway: GatewayConfig,
    pub push: PushConfig,
    pub status: StatusConfig,
    /// Seconds to wait before confirming a departure
    #[serde(default = "default_leave_delay_secs")]
    pub leave_delay_secs: u64,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Upstream voice gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// WebSocket URL of the gateway event stream
    pub url: String,
    /// Guild to scope presence tracking to
    pub guild_id: u64,
}

/// Downstream notification push configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// HTTP endpoint that accepts group messages
    pub url: String,
    /// Target group to deliver notifications to
    pub group_id: u64,
}

/// Status endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_status_host")]
    pub host: String,
    #[serde(default = "default_status_port")]
    pub port: u16,
}

impl StatusConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions
fn default_app_name() -> String {
    "voice-bridge".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_status_host() -> String {
    "127.0.0.1".to_string()
}

fn default_status_port() -> u16 {
    8710
}

fn default_leave_delay_secs() -> u64 {
    60
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    /// or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            gateway: GatewayConfig {
                url: env::var("GATEWAY_URL").map_err(|_| ConfigError::MissingVar("GATEWAY_URL"))?,
                guild_id: require_parsed("GUILD_ID")?,
            },
            push: PushConfig {
                url: env::var("PUSH_URL").map_err(|_| ConfigError::MissingVar("PUSH_URL"))?,
                group_id: require_parsed("GROUP_ID")?,
            },
            status: StatusConfig {
                host: env::var("STATUS_HOST").unwrap_or_else(|_| default_status_host()),
                port: optional_parsed("STATUS_PORT")?.unwrap_or_else(default_status_port),
            },
            leave_delay_secs: optional_parsed("LEAVE_DELAY_SECS")?
                .unwrap_or_else(default_leave_delay_secs),
        })
    }

    /// Departure-confirmation delay as a `Duration`
    #[must_use]
    pub fn leave_delay(&self) -> Duration {
        Duration::from_secs(self.leave_delay_secs)
    }
}

fn require_parsed<T: std::str::FromStr>(name: &'static str) -> Result<T, ConfigError> {
    let raw = env::var(name).map_err(|_| ConfigError::MissingVar(name))?;
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw))
}

fn optional_parsed<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
