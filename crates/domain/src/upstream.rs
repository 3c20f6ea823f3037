use crate::config::ServerAlias;
use crate::DomainError;
use std::collections::BTreeMap;
use std::fmt;

/// Default DNS-over-TLS port (RFC 7858).
pub const DOT_PORT: u16 = 853;

/// Built-in public resolvers: `(alias, address, tls_name)`.
const PRESETS: [(&str, &str, &str); 3] = [
    ("cloudflare", "1.1.1.1", "1.1.1.1"),
    ("quad9", "9.9.9.9", "dns.quad9.net"),
    ("cleanbrowsing", "185.228.168.168", "cleanbrowsing.org"),
];

/// A DNS-over-TLS server: where to connect and which name its certificate
/// must be valid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotServer {
    pub host: String,
    pub tls_name: String,
    pub port: u16,
}

impl DotServer {
    pub fn new(host: impl Into<String>, tls_name: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            tls_name: tls_name.into(),
            port,
        }
    }

    /// Resolves the `server` command-line argument.
    ///
    /// User-defined aliases win over the built-in presets. Anything that is
    /// not an alias is taken literally and used both as the connect target
    /// and as the name the certificate is verified against.
    pub fn from_arg(
        arg: &str,
        port: u16,
        aliases: &BTreeMap<String, ServerAlias>,
    ) -> Result<Self, DomainError> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(DomainError::InvalidServerName(
                "server must not be empty".to_string(),
            ));
        }

        if let Some(alias) = aliases.get(arg) {
            let tls_name = alias.tls_name.as_deref().unwrap_or(&alias.address);
            return Ok(Self::new(alias.address.as_str(), tls_name, port));
        }

        if let Some((_, address, tls_name)) = PRESETS.iter().find(|(name, _, _)| *name == arg) {
            return Ok(Self::new(*address, *tls_name, port));
        }

        Ok(Self::new(arg, arg, port))
    }
}

impl fmt::Display for DotServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
