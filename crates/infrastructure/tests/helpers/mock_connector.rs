#![allow(dead_code)]
use async_trait::async_trait;
use dot_lookup_domain::{DomainError, DotServer};
use dot_lookup_infrastructure::dns::transport::{read_framed, StreamConnector};
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream, ReadBuf};
use tokio::sync::oneshot;

type Reply = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// What the fake server does once it has read the framed query.
#[derive(Clone)]
pub enum Script {
    /// Write these raw bytes (prefix included), then wait for the client to close.
    Reply(Reply),
    /// Write these raw bytes and close immediately.
    ReplyAndClose(Reply),
    /// Never answer; hold the stream open.
    Silent,
}

/// In-memory stand-in for the TLS transport. Each `connect` spawns a fake
/// server on the other end of a duplex pipe.
pub struct ScriptedConnector {
    script: Script,
    connects: Arc<AtomicUsize>,
    closed_rx: Mutex<Option<oneshot::Receiver<()>>>,
    closed_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl ScriptedConnector {
    pub fn new(script: Script) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            script,
            connects: Arc::new(AtomicUsize::new(0)),
            closed_rx: Mutex::new(Some(rx)),
            closed_tx: Mutex::new(Some(tx)),
        }
    }

    pub fn replying<F>(reply: F) -> Self
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::new(Script::Reply(Arc::new(reply)))
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Resolves once the server side has seen the client close the stream.
    pub fn client_closed(&self) -> oneshot::Receiver<()> {
        self.closed_rx
            .lock()
            .unwrap()
            .take()
            .expect("client_closed called twice")
    }
}

#[async_trait]
impl StreamConnector for ScriptedConnector {
    type Stream = DuplexStream;

    async fn connect(
        &self,
        _server: &DotServer,
        _timeout: Duration,
    ) -> Result<Self::Stream, DomainError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        let script = self.script.clone();
        let closed_tx = self.closed_tx.lock().unwrap().take();

        tokio::spawn(async move {
            let query = match read_framed(&mut server, Duration::from_secs(5), "client").await {
                Ok(q) => q,
                Err(_) => return,
            };

            match script {
                Script::Reply(reply) => {
                    let _ = server.write_all(&reply(&query)).await;
                    let mut rest = Vec::new();
                    let _ = server.read_to_end(&mut rest).await;
                    if let Some(tx) = closed_tx {
                        let _ = tx.send(());
                    }
                }
                Script::ReplyAndClose(reply) => {
                    let _ = server.write_all(&reply(&query)).await;
                }
                Script::Silent => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            }
        });

        Ok(client)
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}

/// Connector that always fails, for checking error propagation.
pub struct RefusingConnector {
    pub attempts: AtomicUsize,
}

impl RefusingConnector {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StreamConnector for RefusingConnector {
    type Stream = DuplexStream;

    async fn connect(
        &self,
        server: &DotServer,
        _timeout: Duration,
    ) -> Result<Self::Stream, DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::TransportConnect {
            server: server.to_string(),
            reason: "connection refused".to_string(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}

/// Stream whose graceful shutdown never completes, like a peer that ignores
/// close_notify.
pub struct StallOnShutdown(DuplexStream);

impl AsyncRead for StallOnShutdown {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.0).poll_read(cx, buf)
    }
}

impl AsyncWrite for StallOnShutdown {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.0).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.0).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Pending
    }
}

/// [`ScriptedConnector`] whose streams hang on shutdown.
pub struct StallingConnector {
    pub inner: ScriptedConnector,
}

#[async_trait]
impl StreamConnector for StallingConnector {
    type Stream = StallOnShutdown;

    async fn connect(
        &self,
        server: &DotServer,
        timeout: Duration,
    ) -> Result<Self::Stream, DomainError> {
        self.inner.connect(server, timeout).await.map(StallOnShutdown)
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
