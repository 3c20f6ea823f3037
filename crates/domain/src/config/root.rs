use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::lookup::LookupConfig;
use super::servers::ServerAlias;
use crate::RecordType;

const LOCAL_CONFIG_FILE: &str = "dot-lookup.toml";

/// Main configuration structure for dot-lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Port, timeouts and default query type
    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra server aliases, keyed by the name given on the command line
    #[serde(default)]
    pub servers: BTreeMap<String, ServerAlias>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dot-lookup.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.lookup.port = port;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.lookup.connect_timeout_secs = secs;
            self.lookup.read_timeout_secs = secs;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }
        if self.lookup.connect_timeout_secs == 0 || self.lookup.read_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be at least 1 second".to_string(),
            ));
        }
        for (name, alias) in &self.servers {
            if alias.address.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Server alias '{}' has no address",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Record type used when none is given on the command line.
    pub fn default_record_type(&self) -> RecordType {
        RecordType::parse_or_default(&self.lookup.default_record_type)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}
