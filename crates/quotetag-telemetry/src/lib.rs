//! Structured logging for quotetag.
//!
//! The codec crates only emit `tracing` events; installing a subscriber is
//! left to the host application through `init_logging`.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, init_test_logging};
