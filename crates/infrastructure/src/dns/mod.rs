pub mod codec;
pub mod lookup;
pub mod transport;

pub use lookup::{LookupOutcome, QueryDriver, QueryPhase};
