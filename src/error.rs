//! Error types for `apicheck`.
//!
//! One top-level error aggregates the domain-specific errors and maps each
//! variant to a process exit code, so `main` can report and exit uniformly.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `apicheck` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution, all assertions passed
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (missing file, invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Transport error (DNS, TLS, connection failure)
    pub const TRANSPORT_ERROR: i32 = 4;

    /// Authentication error (token absent after the auth call)
    pub const AUTH_ERROR: i32 = 5;

    /// A hard assertion failed
    pub const ASSERTION_FAILED: i32 = 6;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `apicheck` operations.
#[derive(Debug, Error)]
pub enum ApiCheckError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport layer error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Hard assertion failure
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ApiCheckError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Transport(_) => ExitCode::TRANSPORT_ERROR,
            Self::Auth(_) => ExitCode::AUTH_ERROR,
            Self::Assertion(_) => ExitCode::ASSERTION_FAILED,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Test plan file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the test plan file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Plan validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the test plan file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Required field is missing from the plan
    #[error("missing required field '{field}' at {location}")]
    MissingRequired {
        /// Name of the missing field
        field: String,
        /// Location in the plan (e.g., "groups[0].routes[2]")
        location: String,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

/// A single validation issue found during plan validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "groups[1].routes[0].path")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Validation failure that prevents the plan from running
    Error,
    /// Potential issue that does not prevent the plan from running
    Warning,
}

// ============================================================================
// Transport Errors
// ============================================================================

/// HTTP transport errors. All of these are fatal to the run, no retry.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request URL could not be parsed
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// DNS, TLS, or connection failure
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request body could not be encoded in the declared format
    #[error("body encoding failed: {0}")]
    BodyEncoding(String),

    /// Failed to read the response body
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// HTTP client could not be constructed
    #[error("client build failed: {0}")]
    ClientBuild(String),
}

// ============================================================================
// Authentication Errors
// ============================================================================

/// Authentication errors. Fatal before any group executes.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth response did not contain the configured token field
    #[error("token '{token_name}' not found in authentication response")]
    TokenNotFound {
        /// Configured name of the token field
        token_name: String,
    },
}

// ============================================================================
// Assertion Errors
// ============================================================================

/// A hard assertion failure. Aborts the entire run (fail-fast).
#[derive(Debug, Error)]
#[error("assertion failed: {description}")]
pub struct AssertionError {
    /// Human-readable diagnostic with actual/expected values
    pub description: String,
}

impl AssertionError {
    /// Creates a failure carrying the given diagnostic.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `apicheck` operations.
pub type Result<T> = std::result::Result<T, ApiCheckError>;

// ============================================================================
// Tests
// ============================================================================
