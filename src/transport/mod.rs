//! HTTP transport
//!
//! The reqwest-based adapter that performs the actual HTTP calls and
//! returns structured response data for assertion evaluation.

pub mod http;

pub use http::{HttpTransport, TransportResponse};
