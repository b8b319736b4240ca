//! Observability module
//!
//! Logging infrastructure for reporting assertion outcomes and run
//! progress while a test plan executes.

pub mod logging;

pub use logging::{LogFormat, init_logging};
