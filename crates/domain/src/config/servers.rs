use serde::{Deserialize, Serialize};

/// A user-defined `[servers.<alias>]` entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerAlias {
    pub address: String,

    /// Name the server certificate is verified against; defaults to `address`.
    #[serde(default)]
    pub tls_name: Option<String>,
}
