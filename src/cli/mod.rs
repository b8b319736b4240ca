//! Command-line interface
//!
//! Clap argument definitions and command handlers.

pub mod args;
pub mod commands;
