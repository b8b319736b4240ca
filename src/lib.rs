//! `apicheck` - Declarative HTTP API smoke-test runner
//!
//! This library provides the components for executing YAML-declared API
//! test plans: route chaining, assertion evaluation, and HTTP transport.

pub mod asserts;
pub mod capture;
pub mod chain;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod runner;
pub mod transport;
