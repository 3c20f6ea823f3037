//! dot-lookup domain layer: record types, answers, servers, configuration.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod upstream;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{AnswerSet, RecordType, ResponseCode};
pub use errors::{DomainError, ErrorKind};
pub use upstream::{DotServer, DOT_PORT};
