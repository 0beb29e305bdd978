//! Configuration management for the contact gate
//!
//! Built-in defaults are overlaid by an optional `config.toml` and then by
//! environment variables prefixed with `CONTACT_GATE` (nested keys separated by
//! `__`, e.g. `CONTACT_GATE__GATE__MAX_REQUESTS=10`).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_REQUESTS: u32 = 5;
pub const DEFAULT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_MIN_MESSAGE_LENGTH: usize = 10;

/// Complete service configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ServerConfig {
    pub server: StartupConfig,
    pub gate: GateConfig,
}

/// Network settings, read once at startup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StartupConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,
}

/// Submission gate limits
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GateConfig {
    /// Accepted-into-window requests per client per window
    pub max_requests: u32,

    /// Length of one fixed window
    pub window_secs: u64,

    /// Minimum message length in UTF-16 code units
    pub min_message_length: usize,

    /// Upper bound on client identifiers held by the in-memory store
    pub max_tracked_clients: usize,

    /// Seconds between sweeps of expired records, 0 disables sweeping
    pub sweep_interval_secs: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window_secs: DEFAULT_WINDOW_SECS,
            min_message_length: DEFAULT_MIN_MESSAGE_LENGTH,
            max_tracked_clients: 10_000,
            sweep_interval_secs: 300,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Deployment path first, then the working directory
        Self::load_from(&["contact-gate/config", "config"])
    }

    /// Load from the given config file stems; missing files are skipped.
    pub fn load_from(paths: &[&str]) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&ServerConfig::default())?);

        for path in paths {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("CONTACT_GATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.server.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.gate.max_requests == 0 {
            return Err(config::ConfigError::Message(
                "max_requests must be greater than 0".into(),
            ));
        }

        if self.gate.window_secs == 0 {
            return Err(config::ConfigError::Message(
                "window_secs must be greater than 0".into(),
            ));
        }

        if self.gate.min_message_length == 0 {
            return Err(config::ConfigError::Message(
                "min_message_length must be greater than 0".into(),
            ));
        }

        if self.gate.max_tracked_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_tracked_clients must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl StartupConfig {
    /// Bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl GateConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// `None` when sweeping is disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gate.max_requests, 5);
        assert_eq!(config.gate.window(), Duration::from_secs(60));
        assert_eq!(config.server.listen_socket(), "127.0.0.1:3000");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = ServerConfig::load_from(&["does-not-exist/contact-gate"]).unwrap();
        assert_eq!(config.gate.min_message_length, DEFAULT_MIN_MESSAGE_LENGTH);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = ServerConfig::default();
        config.gate.max_requests = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.gate.window_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.gate.min_message_length = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.gate.max_tracked_clients = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.bind_address = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        // only key touched here, so parallel config tests are unaffected
        const KEY: &str = "CONTACT_GATE__GATE__MAX_TRACKED_CLIENTS";
        unsafe { std::env::set_var(KEY, "42") };
        let loaded = ServerConfig::load_from(&[]);
        unsafe { std::env::remove_var(KEY) };

        assert_eq!(loaded.unwrap().gate.max_tracked_clients, 42);
    }

    #[test]
    fn test_sweep_interval_zero_disables() {
        let mut gate = GateConfig::default();
        assert_eq!(gate.sweep_interval(), Some(Duration::from_secs(300)));
        gate.sweep_interval_secs = 0;
        assert!(gate.sweep_interval().is_none());
    }
}
