//! One DNS-over-TLS request/response cycle.
//!
//! ```text
//! Idle -> QuerySent -> AwaitingLength -> AwaitingPayload -> Parsed
//!   \________\_____________\________________\____________-> Failed
//! ```
//!
//! Nothing is retried: the first failure ends the lookup.

use super::codec::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::framing::{read_frame_length, read_frame_payload, write_framed};
use super::transport::StreamConnector;
use dot_lookup_domain::config::LookupConfig;
use dot_lookup_domain::{AnswerSet, DomainError, DotServer, RecordType};
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Upper bound on the graceful close after an exchange.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    QuerySent,
    AwaitingLength,
    AwaitingPayload,
    Parsed,
    Failed,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryPhase::Idle => "idle",
            QueryPhase::QuerySent => "query-sent",
            QueryPhase::AwaitingLength => "awaiting-length",
            QueryPhase::AwaitingPayload => "awaiting-payload",
            QueryPhase::Parsed => "parsed",
            QueryPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks where a single exchange is, so failures can say where they happened.
#[derive(Debug)]
struct ExchangeState {
    phase: QueryPhase,
}

impl ExchangeState {
    fn new() -> Self {
        Self {
            phase: QueryPhase::Idle,
        }
    }

    fn advance(&mut self, next: QueryPhase) {
        debug!(from = %self.phase, to = %next, "DNS exchange phase");
        self.phase = next;
    }

    fn fail(&mut self, error: DomainError) -> DomainError {
        warn!(phase = %self.phase, error = %error, "DNS exchange failed");
        self.phase = QueryPhase::Failed;
        error
    }
}

/// Result of a completed lookup, with the phase the exchange ended in.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub response: DnsResponse,
    pub phase: QueryPhase,
}

pub struct QueryDriver<C: StreamConnector> {
    connector: C,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl<C: StreamConnector> QueryDriver<C> {
    pub fn new(connector: C, connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connector,
            connect_timeout,
            read_timeout,
        }
    }

    pub fn from_config(connector: C, config: &LookupConfig) -> Self {
        Self::new(connector, config.connect_timeout(), config.read_timeout())
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Looks up `domain` and returns its answers.
    ///
    /// An empty answer section is reported as [`DomainError::NxDomain`]
    /// carrying the server's RCODE.
    pub async fn resolve(
        &self,
        server: &DotServer,
        domain: &str,
        record_type: RecordType,
    ) -> Result<AnswerSet, DomainError> {
        let outcome = self.lookup(server, domain, record_type).await?;
        let response = outcome.response;

        for record in &response.records {
            debug!(owner = %record.name, rtype = record.rtype, ttl = record.ttl, "Answer record");
        }

        if response.answers.is_empty() {
            return Err(DomainError::NxDomain {
                domain: domain.to_string(),
                rcode: response.rcode.to_string(),
            });
        }

        Ok(response.answers)
    }

    /// Runs one full exchange and returns the parsed response, empty or not.
    ///
    /// The stream lives only inside this call and is shut down on every path.
    pub async fn lookup(
        &self,
        server: &DotServer,
        domain: &str,
        record_type: RecordType,
    ) -> Result<LookupOutcome, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(domain, &record_type)?;

        debug!(
            server = %server,
            protocol = self.connector.protocol_name(),
            domain = %domain,
            record_type = %record_type,
            id = id,
            "Starting DNS lookup"
        );

        let mut stream = self.connector.connect(server, self.connect_timeout).await?;

        let result = self
            .exchange(&mut stream, &server.to_string(), id, &query, record_type)
            .await;

        // dropping the stream closes the socket even if close_notify never completes
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, stream.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(server = %server, error = %e, "TLS shutdown failed"),
            Err(_) => debug!(server = %server, "TLS shutdown timed out"),
        }
        drop(stream);

        result
    }

    async fn exchange<S>(
        &self,
        stream: &mut S,
        peer: &str,
        id: u16,
        query: &[u8],
        record_type: RecordType,
    ) -> Result<LookupOutcome, DomainError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut state = ExchangeState::new();

        write_framed(stream, query)
            .await
            .map_err(|e| state.fail(e))?;
        state.advance(QueryPhase::QuerySent);

        let deadline = Instant::now() + self.read_timeout;

        state.advance(QueryPhase::AwaitingLength);
        let length = read_frame_length(stream, deadline, peer)
            .await
            .map_err(|e| state.fail(e))?;

        state.advance(QueryPhase::AwaitingPayload);
        let payload = read_frame_payload(stream, length, deadline, peer)
            .await
            .map_err(|e| state.fail(e))?;

        debug!(server = %peer, response_len = payload.len(), "DNS response received");

        let response = ResponseParser::parse(&payload, record_type).map_err(|e| state.fail(e))?;
        Self::check_matches_query(&response, id).map_err(|e| state.fail(e))?;

        state.advance(QueryPhase::Parsed);
        Ok(LookupOutcome {
            response,
            phase: state.phase,
        })
    }

    fn check_matches_query(response: &DnsResponse, id: u16) -> Result<(), DomainError> {
        if !response.header.is_response() {
            return Err(DomainError::MalformedResponse(
                "QR bit not set in reply".to_string(),
            ));
        }
        if response.id() != id {
            return Err(DomainError::IdMismatch {
                expected: id,
                actual: response.id(),
            });
        }
        Ok(())
    }
}
