//! DNS-over-TLS transport (RFC 7858).
//!
//! One connection per lookup: TCP connect, TLS handshake against the
//! webpki root store, certificate verified for the server's `tls_name`.

use super::resolver::resolve_all;
use super::StreamConnector;
use async_trait::async_trait;
use dot_lookup_domain::{DomainError, DotServer};
use rustls::pki_types::ServerName;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::debug;

/// Shared TLS config, built on first use.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

/// DNS-over-TLS transport (RFC 7858)
#[derive(Clone)]
pub struct TlsTransport {
    config: Arc<rustls::ClientConfig>,
}

impl TlsTransport {
    pub fn new() -> Self {
        Self {
            config: SHARED_TLS_CONFIG.clone(),
        }
    }

    fn server_name(server: &DotServer) -> Result<ServerName<'static>, DomainError> {
        ServerName::try_from(server.tls_name.clone()).map_err(|e| {
            DomainError::InvalidServerName(format!("'{}': {}", server.tls_name, e))
        })
    }
}

impl Default for TlsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamConnector for TlsTransport {
    type Stream = TlsStream<TcpStream>;

    async fn connect(
        &self,
        server: &DotServer,
        timeout: Duration,
    ) -> Result<Self::Stream, DomainError> {
        let server_name = Self::server_name(server)?;
        let connector = tokio_rustls::TlsConnector::from(self.config.clone());
        let addrs = resolve_all(&server.host, server.port, timeout).await?;

        let tcp_stream = tokio::time::timeout(timeout, TcpStream::connect(&addrs[..]))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
                phase: "connecting to",
            })?
            .map_err(|e| DomainError::TransportConnect {
                server: server.to_string(),
                reason: e.to_string(),
            })?;

        tcp_stream.set_nodelay(true).ok();

        let tls_stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
                phase: "during TLS handshake with",
            })?
            .map_err(|e| DomainError::TransportConnect {
                server: server.to_string(),
                reason: format!("TLS handshake failed: {}", e),
            })?;

        debug!(server = %server, tls_name = %server.tls_name, "TLS connection established");
        Ok(tls_stream)
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
