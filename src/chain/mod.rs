//! Route chaining
//!
//! Captured response envelopes and the placeholder resolver that feeds
//! data from earlier routes into the paths of later routes in the same
//! group.

pub mod resolver;
pub mod store;

pub use resolver::resolve;
pub use store::{ResponseEnvelope, ResponseStore};
