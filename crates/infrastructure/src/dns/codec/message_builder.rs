//! DNS Message Builder
//!
//! Writes query messages straight into wire format: a 12-byte header, one
//! question, no additional records.

use super::header::{Header, HEADER_LEN};
use super::name::{encode_name_into, validate_name};
use dot_lookup_domain::{DomainError, RecordType};

/// QCLASS IN
pub const CLASS_IN: u16 = 1;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message with a random ID
    ///
    /// Creates a standard query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag set
    /// - Single question section, class IN
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(domain, record_type).map(|(_, bytes)| bytes)
    }

    /// Build a query message and return both the ID and bytes
    ///
    /// The caller needs the ID to check that the response answers this query.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query_for_id(id, domain, record_type)?;
        Ok((id, bytes))
    }

    /// Build a query message with a caller-chosen ID
    pub fn build_query_for_id(
        id: u16,
        domain: &str,
        record_type: &RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let name = validate_name(domain)?;

        let mut buf = Vec::with_capacity(HEADER_LEN + name.len() + 6);
        Header::query(id).write_to(&mut buf);
        encode_name_into(&mut buf, name);
        buf.extend_from_slice(&record_type.to_u16().to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());

        Ok(buf)
    }
}
