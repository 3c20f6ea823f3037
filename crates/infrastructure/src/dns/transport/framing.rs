//! RFC 1035 section 4.2.2 / RFC 7858 stream framing: every message travels
//! behind a 2-byte big-endian length.

use dot_lookup_domain::DomainError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};

pub const LENGTH_PREFIX_LEN: usize = 2;
pub const MAX_MESSAGE_SIZE: usize = u16::MAX as usize;

/// Returns `message` behind its length prefix, ready for a single write.
pub fn frame(message: &[u8]) -> Result<Vec<u8>, DomainError> {
    let length = u16::try_from(message.len()).map_err(|_| {
        DomainError::IoError(format!(
            "DNS message of {} bytes exceeds {} byte frame limit",
            message.len(),
            MAX_MESSAGE_SIZE
        ))
    })?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_LEN + message.len());
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message);
    Ok(framed)
}

pub async fn write_framed<S>(stream: &mut S, message: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWrite + Unpin,
{
    let framed = frame(message)?;

    stream
        .write_all(&framed)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

/// First stage of a framed read: the 2-byte length, which must arrive before
/// `deadline`.
pub async fn read_frame_length<S>(
    stream: &mut S,
    deadline: Instant,
    peer: &str,
) -> Result<usize, DomainError>
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; LENGTH_PREFIX_LEN];
    timeout_at(deadline, stream.read_exact(&mut len_buf))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: peer.to_string(),
            phase: "waiting for response length from",
        })?
        .map_err(|e| DomainError::IoError(format!("Failed to read response length: {}", e)))?;

    let length = u16::from_be_bytes(len_buf) as usize;
    if length == 0 {
        return Err(DomainError::MalformedResponse(
            "zero-length response frame".to_string(),
        ));
    }
    Ok(length)
}

/// Second stage: exactly `length` bytes. `read_exact` loops over partial
/// reads; a stream that closes early is an error, never a short message.
pub async fn read_frame_payload<S>(
    stream: &mut S,
    length: usize,
    deadline: Instant,
    peer: &str,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncRead + Unpin,
{
    let mut payload = vec![0u8; length];
    timeout_at(deadline, stream.read_exact(&mut payload))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: peer.to_string(),
            phase: "reading response body from",
        })?
        .map_err(|e| DomainError::IoError(format!("Failed to read response body: {}", e)))?;

    Ok(payload)
}

/// Reads one length-prefixed message; `timeout` bounds both stages together.
pub async fn read_framed<S>(
    stream: &mut S,
    timeout: std::time::Duration,
    peer: &str,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncRead + Unpin,
{
    let deadline = Instant::now() + timeout;
    let length = read_frame_length(stream, deadline, peer).await?;
    read_frame_payload(stream, length, deadline, peer).await
}
