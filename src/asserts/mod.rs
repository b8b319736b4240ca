//! Assertion evaluation
//!
//! Walks a declared assertion tree against a captured response envelope
//! and reports pass/warning outcomes; the first unmet hard assertion
//! aborts with an [`AssertionError`](crate::error::AssertionError).

pub mod evaluator;

pub use evaluator::{EvalOptions, evaluate};

/// Result of one evaluated assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Outcome category.
    pub kind: OutcomeKind,
    /// Human-readable diagnostic; the sole reporting surface.
    pub description: String,
}

/// Outcome category.
///
/// Hard failures never appear here: they abort evaluation through the
/// error channel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The assertion held.
    Passed,
    /// The assertion could not be evaluated (e.g. unrecognized kind) and
    /// was skipped without failing the run.
    Warning,
}

impl Outcome {
    /// A passing outcome.
    #[must_use]
    pub fn passed(description: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Passed,
            description: description.into(),
        }
    }

    /// A non-fatal warning outcome.
    #[must_use]
    pub fn warning(description: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Warning,
            description: description.into(),
        }
    }

    /// Whether this outcome is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self.kind, OutcomeKind::Passed)
    }
}
