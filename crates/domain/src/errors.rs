use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("Connection to {server} failed: {reason}")]
    TransportConnect { server: String, reason: String },

    #[error("Timeout {phase} {server}")]
    TransportTimeout { server: String, phase: &'static str },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Malformed DNS response: {0}")]
    MalformedResponse(String),

    #[error("Response ID {actual:#06x} does not match query ID {expected:#06x}")]
    IdMismatch { expected: u16, actual: u16 },

    #[error("Host {domain} not found: {rcode}")]
    NxDomain { domain: String, rcode: String },
}

/// Coarse classification of a [`DomainError`], one per user-facing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Connect,
    Timeout,
    MalformedResponse,
    NoAnswer,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidDomainName(_) | DomainError::InvalidServerName(_) => {
                ErrorKind::Usage
            }
            DomainError::TransportConnect { .. } | DomainError::IoError(_) => ErrorKind::Connect,
            DomainError::TransportTimeout { .. } => ErrorKind::Timeout,
            DomainError::MalformedResponse(_) | DomainError::IdMismatch { .. } => {
                ErrorKind::MalformedResponse
            }
            DomainError::NxDomain { .. } => ErrorKind::NoAnswer,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NoAnswer
    }
}
