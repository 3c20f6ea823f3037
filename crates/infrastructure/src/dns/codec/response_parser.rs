use super::header::Header;
use super::name::decode_name;
use super::reader::WireReader;
use dot_lookup_domain::{AnswerSet, DomainError, RecordType, ResponseCode};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

const TYPE_A: u16 = 1;
const TYPE_CNAME: u16 = 5;
const TYPE_AAAA: u16 = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(String),
    Other(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: RData,
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub header: Header,

    pub answers: AnswerSet,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub min_ttl: Option<u32>,

    pub records: Vec<ResourceRecord>,
}

impl DnsResponse {
    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.answers.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses a complete response message.
    ///
    /// Every answer record is walked through its own owner name and RDLENGTH,
    /// so answer sections that mix CNAME, A and AAAA records decode in order.
    /// Record types other than A, AAAA and CNAME are kept in `records` but
    /// contribute nothing to `answers`.
    pub fn parse(
        response_bytes: &[u8],
        requested_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let mut reader = WireReader::new(response_bytes);
        let header = Header::parse(&mut reader)?;
        let rcode = header.response_code();

        let mut response = DnsResponse {
            header,
            answers: AnswerSet::new(),
            rcode,
            truncated: header.truncated(),
            min_ttl: None,
            records: Vec::new(),
        };

        if header.ancount == 0 {
            debug!(rcode = %rcode, requested = %requested_type, "DNS response has no answers");
            return Ok(response);
        }

        for _ in 0..header.qdcount {
            Self::skip_question(&mut reader)?;
        }

        for _ in 0..header.ancount {
            let record = Self::parse_record(&mut reader)?;
            response.min_ttl = Some(
                response
                    .min_ttl
                    .map_or(record.ttl, |current| current.min(record.ttl)),
            );

            match &record.rdata {
                RData::A(addr) => response.answers.ipv4.push(addr.to_string()),
                RData::AAAA(addr) => response.answers.ipv6.push(addr.to_string()),
                RData::CNAME(target) => response.answers.cname.push(target.clone()),
                RData::Other(rtype) => {
                    debug!(rtype = rtype, owner = %record.name, "Skipping unsupported record type");
                }
            }
            response.records.push(record);
        }

        if !response
            .records
            .iter()
            .any(|r| r.rtype == requested_type.to_u16())
        {
            debug!(requested = %requested_type, "No answer matches the requested type");
        }

        debug!(
            rcode = %rcode,
            ipv4 = response.answers.ipv4.len(),
            ipv6 = response.answers.ipv6.len(),
            cname = response.answers.cname.len(),
            min_ttl = ?response.min_ttl,
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    /// Shorthand for callers that only need the decoded answers.
    pub fn parse_answers(
        response_bytes: &[u8],
        requested_type: RecordType,
    ) -> Result<AnswerSet, DomainError> {
        Self::parse(response_bytes, requested_type).map(|r| r.answers)
    }

    fn skip_question(reader: &mut WireReader<'_>) -> Result<(), DomainError> {
        let (_, consumed) = decode_name(reader.message(), reader.position())?;
        reader.skip(consumed)?;
        // QTYPE + QCLASS
        reader.skip(4)
    }

    fn parse_record(reader: &mut WireReader<'_>) -> Result<ResourceRecord, DomainError> {
        let message = reader.message();
        let (name, consumed) = decode_name(message, reader.position())?;
        reader.skip(consumed)?;

        let rtype = reader.read_u16()?;
        let class = reader.read_u16()?;
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()? as usize;
        let rdata_start = reader.position();
        let rdata_bytes = reader.read_bytes(rdlength)?;

        let rdata = match rtype {
            TYPE_A => {
                let octets: [u8; 4] = rdata_bytes
                    .try_into()
                    .map_err(|_| bad_rdlength("A", rdlength, 4))?;
                RData::A(Ipv4Addr::from(octets))
            }
            TYPE_AAAA => {
                let octets: [u8; 16] = rdata_bytes
                    .try_into()
                    .map_err(|_| bad_rdlength("AAAA", rdlength, 16))?;
                RData::AAAA(Ipv6Addr::from(octets))
            }
            TYPE_CNAME => {
                // pointers inside RDATA are relative to the whole message
                let (target, used) = decode_name(message, rdata_start)?;
                if used > rdlength {
                    return Err(DomainError::MalformedResponse(format!(
                        "CNAME at offset {} overruns its RDLENGTH {}",
                        rdata_start, rdlength
                    )));
                }
                RData::CNAME(target)
            }
            other => RData::Other(other),
        };

        Ok(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rdata,
        })
    }
}

fn bad_rdlength(kind: &str, got: usize, want: usize) -> DomainError {
    DomainError::MalformedResponse(format!(
        "{} record has RDLENGTH {}, expected {}",
        kind, got, want
    ))
}
