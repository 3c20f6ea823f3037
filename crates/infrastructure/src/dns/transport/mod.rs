pub mod framing;
pub mod resolver;
pub mod tls;

use async_trait::async_trait;
use dot_lookup_domain::{DomainError, DotServer};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};

pub use framing::{read_framed, write_framed};
pub use tls::TlsTransport;

/// Opens the encrypted stream a lookup runs over.
///
/// The stream is verified against `server.tls_name`; dropping it closes the
/// connection.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(
        &self,
        server: &DotServer,
        timeout: Duration,
    ) -> Result<Self::Stream, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
