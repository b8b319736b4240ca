//! Test plan configuration
//!
//! Loading, schema types, and validation for YAML test plans.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{LoadResult, load, parse};
pub use schema::{
    AssertSpec, AuthConfig, BodyFormat, CompareMode, GroupConfig, HeaderAssert, HttpMethod,
    RouteConfig, SchemaAssert, StatusAssert, TestPlan,
};
pub use validation::validate;
