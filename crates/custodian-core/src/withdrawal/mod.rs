pub mod dispatcher;
pub mod envelope;

pub use dispatcher::{execute, ExecutionError};
pub use envelope::{parse_execution_hash, parse_payload_kind, EnvelopeError};
