//! Configuration module for Brick
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`BRICK_*`, plus the API key variables named in the file)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use brick::config::BrickConfig;
//!
//! let config = BrickConfig::default();
//! assert_eq!(config.server.port, 8080);
//! assert!(!config.primary.is_configured());
//!
//! let toml = r#"
//! [primary]
//! url = "http://localhost:5005"
//! token = "secret"
//! "#;
//! let config: BrickConfig = toml::from_str(toml).unwrap();
//! assert!(config.primary.is_configured());
//! ```

pub mod error;
pub mod fallback;
pub mod history;
pub mod logging;
pub mod persistence;
pub mod primary;
pub mod restaurant;
pub mod server;

pub use error::ConfigError;
pub use fallback::FallbackConfig;
pub use history::HistoryConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use persistence::{PersistenceConfig, StoreBackend};
pub use primary::PrimaryConfig;
pub use restaurant::RestaurantProfile;
pub use server::ServerConfig;

// Sections owned by the modules that use them
pub use crate::cache::CacheConfig;
pub use crate::health::HealthCheckConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Brick assistant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BrickConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Dialogue service connection
    pub primary: PrimaryConfig,
    /// Dialogue service health probing
    pub health_check: HealthCheckConfig,
    /// Generative completion service
    pub fallback: FallbackConfig,
    /// Completion memoization
    pub cache: CacheConfig,
    /// Per-session message history
    pub history: HistoryConfig,
    /// Conversation state storage
    pub persistence: PersistenceConfig,
    /// Venue the assistant speaks for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantProfile>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl BrickConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: p.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the previous value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("BRICK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("BRICK_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("BRICK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BRICK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(url) = std::env::var("BRICK_PRIMARY_URL") {
            self.primary.url = Some(url);
        }
        if let Ok(token) = std::env::var("BRICK_PRIMARY_TOKEN") {
            self.primary.token = Some(token);
        }

        self
    }

    /// Validate configuration
    ///
    /// A missing primary endpoint is not an error: the assistant then runs in
    /// fallback-only mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if let Some(level) = self.logging.unknown_level() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", level),
            ));
        }
        if self.history.max_messages == 0 {
            return Err(ConfigError::invalid(
                "history.max_messages",
                "must keep at least one message",
            ));
        }
        if self.cache.max_size == 0 {
            return Err(ConfigError::invalid(
                "cache.max_size",
                "capacity must be non-zero",
            ));
        }
        if self.fallback.max_tokens == 0 {
            return Err(ConfigError::invalid(
                "fallback.max_tokens",
                "must allow at least one token",
            ));
        }
        if self.persistence.backend == StoreBackend::Postgrest
            && self.persistence.url.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::invalid(
                "persistence.url",
                "required when backend is \"postgrest\"",
            ));
        }
        Ok(())
    }
}
