#![allow(dead_code)]
use dot_lookup_domain::DotServer;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const DEFAULT_TTL: u32 = 300;

pub struct DnsServerBuilder;

impl DnsServerBuilder {
    pub fn cloudflare_tls() -> DotServer {
        DotServer::new("1.1.1.1", "1.1.1.1", 853)
    }

    pub fn quad9_tls() -> DotServer {
        DotServer::new("9.9.9.9", "dns.quad9.net", 853)
    }

    pub fn local_test() -> DotServer {
        DotServer::new("127.0.0.1", "localhost", 15853)
    }
}

/// Hand-assembled response messages. Owner names are written as a pointer to
/// the question name at offset 12, the way real servers compress them.
pub struct ResponseBuilder {
    id: u16,
    flags: u16,
    question: Vec<u8>,
    qdcount: u16,
    answers: Vec<u8>,
    ancount: u16,
}

impl ResponseBuilder {
    pub fn new(qname: &str, qtype: u16) -> Self {
        let mut question = encode(qname);
        question.extend_from_slice(&qtype.to_be_bytes());
        question.extend_from_slice(&1u16.to_be_bytes());
        Self {
            id: 0xabcd,
            flags: 0x8180,
            question,
            qdcount: 1,
            answers: Vec::new(),
            ancount: 0,
        }
    }

    /// Echoes the ID and question section of a query built by the client.
    pub fn for_query(query: &[u8]) -> Self {
        Self {
            id: u16::from_be_bytes([query[0], query[1]]),
            flags: 0x8180,
            question: query[12..].to_vec(),
            qdcount: 1,
            answers: Vec::new(),
            ancount: 0,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & 0xFFF0) | (rcode as u16 & 0x0F);
        self
    }

    /// Declares an answer count without adding records.
    pub fn ancount(mut self, ancount: u16) -> Self {
        self.ancount = ancount;
        self
    }

    pub fn a(self, ip: &str) -> Self {
        let ip: Ipv4Addr = ip.parse().unwrap();
        self.record(1, DEFAULT_TTL, &ip.octets())
    }

    pub fn aaaa(self, ip: &str) -> Self {
        let ip: Ipv6Addr = ip.parse().unwrap();
        self.record(28, DEFAULT_TTL, &ip.octets())
    }

    pub fn cname(self, target: &str) -> Self {
        self.record(5, DEFAULT_TTL, &encode(target))
    }

    /// CNAME whose RDATA is `prefix` followed by a pointer to the question name.
    pub fn cname_under_qname(self, prefix: &str) -> Self {
        let mut rdata = Vec::new();
        for label in prefix.split('.') {
            rdata.push(label.len() as u8);
            rdata.extend_from_slice(label.as_bytes());
        }
        rdata.extend_from_slice(&[0xC0, 0x0C]);
        self.record(5, DEFAULT_TTL, &rdata)
    }

    pub fn record(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.answers.extend_from_slice(&[0xC0, 0x0C]);
        self.answers.extend_from_slice(&rtype.to_be_bytes());
        self.answers.extend_from_slice(&1u16.to_be_bytes());
        self.answers.extend_from_slice(&ttl.to_be_bytes());
        self.answers
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.ancount += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut msg = Vec::new();
        for field in [self.id, self.flags, self.qdcount, self.ancount, 0, 0] {
            msg.extend_from_slice(&field.to_be_bytes());
        }
        msg.extend_from_slice(&self.question);
        msg.extend_from_slice(&self.answers);
        msg
    }

    pub fn build_framed(self) -> Vec<u8> {
        let msg = self.build();
        let mut framed = (msg.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&msg);
        framed
    }
}

fn encode(name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf
}
