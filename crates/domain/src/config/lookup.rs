use crate::upstream::DOT_PORT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// TCP connect + TLS handshake deadline
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Deadline for the whole framed response
    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,

    #[serde(default = "default_record_type")]
    pub default_record_type: String,
}

impl LookupConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            connect_timeout_secs: default_timeout_secs(),
            read_timeout_secs: default_timeout_secs(),
            default_record_type: default_record_type(),
        }
    }
}

fn default_port() -> u16 {
    DOT_PORT
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_record_type() -> String {
    "A".to_string()
}
