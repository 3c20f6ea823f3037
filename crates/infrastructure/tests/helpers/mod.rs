pub mod builders;
pub mod mock_connector;

#[allow(unused_imports)]
pub use builders::{DnsServerBuilder, ResponseBuilder};
#[allow(unused_imports)]
pub use mock_connector::{RefusingConnector, Script, ScriptedConnector, StallingConnector};
