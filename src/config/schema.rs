//! Test plan schema types
//!
//! These types are deserialized from YAML test plan files. A plan names a
//! base URL, optional authentication, and ordered groups of routes with
//! their expected assertions. All of them are read-only once parsed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Top-Level Plan
// ============================================================================

/// Root configuration for an `apicheck` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPlan {
    /// Base URL every route is resolved against (required)
    pub url: String,

    /// Optional authentication performed before any group runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Route groups, executed in declared order
    pub groups: Vec<GroupConfig>,
}

/// Authentication configuration.
///
/// The runner posts `{username, password}` to `url + path` and extracts the
/// bearer token from the response body field named by `token_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Path of the authentication endpoint, relative to the base URL
    pub path: String,

    /// HTTP method for the authentication call
    #[serde(default = "default_auth_method")]
    pub method: HttpMethod,

    /// Credential sent as `username`
    pub username: String,

    /// Credential sent as `password`
    pub password: String,

    /// Name of the token field in the authentication response body
    pub token_name: String,
}

const fn default_auth_method() -> HttpMethod {
    HttpMethod::Post
}

// ============================================================================
// Groups and Routes
// ============================================================================

/// An ordered set of routes sharing a URL prefix and an optional request
/// body model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group name, used as the uniqueness prefix for synthesized values
    pub name: String,

    /// URL prefix prepended to every route path in the group
    #[serde(default)]
    pub prefix: String,

    /// Per-field type directives for the synthesized request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<IndexMap<String, serde_json::Value>>,

    /// Routes, executed in declared order
    pub routes: Vec<RouteConfig>,
}

/// One HTTP call definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route name, unique within its group; later routes reference captured
    /// responses through it
    pub name: String,

    /// HTTP method
    pub method: HttpMethod,

    /// Path template, may embed one `{routeName.field...}` placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Request body encoding
    #[serde(default)]
    pub format: BodyFormat,

    /// Assertions evaluated against the captured response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asserts: Option<AssertSpec>,
}

/// HTTP method for a route or the auth call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Uppercase wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether the group model is attached as the request body.
    #[must_use]
    pub const fn takes_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// JSON-encoded body
    #[default]
    Json,
    /// URL form-encoded body
    Form,
}

// ============================================================================
// Assertions
// ============================================================================

/// Declared assertion tree for one route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertSpec {
    /// Optional human label used in place of the category-specific default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status code assertion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusAssert>,

    /// Header assertions, evaluated in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HeaderAssert>>,

    /// Schema assertions over the decoded response body, evaluated in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<SchemaAssert>>,
}

/// Status code assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusAssert {
    /// Expected status code
    pub code: u16,

    /// Comparison mode
    #[serde(default, rename = "type")]
    pub compare: CompareMode,
}

/// Comparison mode for the status assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareMode {
    /// Pass when actual equals expected
    #[default]
    Equal,
    /// Pass when actual differs from expected
    NotEqual,
}

/// One header assertion.
///
/// The header must exist; `type` and `value` add optional checks against
/// the header's first value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderAssert {
    /// Header name
    pub name: String,

    /// Expected value type (`url`, `int`, `bool`, `array`, `object`,
    /// `string`; unknown names fall back to `string`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Expected exact value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One schema assertion over the decoded response body.
///
/// `kind` is kept as a free string so unrecognized kinds degrade to a
/// warning at evaluation time instead of failing the plan at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaAssert {
    /// Assertion kind (`notNull`, `null`, `found`, `notFound`, `equal`,
    /// `notEqual`; anything else is reported as a warning)
    #[serde(rename = "type")]
    pub kind: String,

    /// Nested key → type-name-or-value mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}
