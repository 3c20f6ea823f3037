pub mod header;
pub mod message_builder;
pub mod name;
pub mod reader;
pub mod response_parser;

pub use header::{Header, HEADER_LEN};
pub use message_builder::MessageBuilder;
pub use name::{decode_name, encode_name, validate_name};
pub use response_parser::{DnsResponse, RData, ResourceRecord, ResponseParser};
