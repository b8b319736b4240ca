//! Assertion evaluator
//!
//! Sequential evaluation of the three assertion branches (status, headers,
//! schema) against a captured response envelope. Hard assertions abort on
//! the first mismatch; unrecognized schema kinds degrade to warnings.

use serde_json::Value;

use crate::chain::store::ResponseEnvelope;
use crate::config::schema::{AssertSpec, CompareMode, HeaderAssert, SchemaAssert, StatusAssert};
use crate::error::AssertionError;

use super::Outcome;

/// Evaluation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    /// When set, the leaf type check inside `found`/`notFound` decides the
    /// result. By default presence alone decides, reproducing the historic
    /// behavior plans may depend on.
    pub strict_types: bool,
}

/// Evaluates an assertion tree against a response envelope.
///
/// Branches run in declared order: status, then each header assertion,
/// then each schema assertion.
///
/// # Errors
///
/// Returns an [`AssertionError`] for the first hard assertion whose
/// condition is false; outcomes collected up to that point are discarded
/// because the run aborts anyway.
pub fn evaluate(
    envelope: &ResponseEnvelope,
    spec: &AssertSpec,
    options: EvalOptions,
) -> Result<Vec<Outcome>, AssertionError> {
    let mut outcomes = Vec::new();
    let label = spec.description.as_deref();

    if let Some(status) = &spec.status {
        eval_status(&mut outcomes, envelope, status, label)?;
    }

    if let Some(headers) = &spec.headers {
        for header in headers {
            eval_header(&mut outcomes, envelope, header, label)?;
        }
    }

    if let Some(schemas) = &spec.schema {
        for schema in schemas {
            eval_schema(&mut outcomes, envelope, schema, label, options)?;
        }
    }

    Ok(outcomes)
}

/// Records a pass or aborts with a hard failure.
fn hard(
    outcomes: &mut Vec<Outcome>,
    condition: bool,
    description: String,
) -> Result<(), AssertionError> {
    if condition {
        outcomes.push(Outcome::passed(description));
        Ok(())
    } else {
        Err(AssertionError::new(description))
    }
}

// ============================================================================
// Status
// ============================================================================

fn eval_status(
    outcomes: &mut Vec<Outcome>,
    envelope: &ResponseEnvelope,
    status: &StatusAssert,
    label: Option<&str>,
) -> Result<(), AssertionError> {
    let actual = envelope.status;
    let category = label.unwrap_or("status code");

    match status.compare {
        CompareMode::Equal => hard(
            outcomes,
            actual == status.code,
            format!("{category} got {actual}, expected {}", status.code),
        ),
        CompareMode::NotEqual => hard(
            outcomes,
            actual != status.code,
            format!("{category} got {actual}, expected not {}", status.code),
        ),
    }
}

// ============================================================================
// Headers
// ============================================================================

fn eval_header(
    outcomes: &mut Vec<Outcome>,
    envelope: &ResponseEnvelope,
    header: &HeaderAssert,
    label: Option<&str>,
) -> Result<(), AssertionError> {
    let name = &header.name;
    let first = header_first_value(envelope, name);

    hard(
        outcomes,
        first.is_some(),
        label.map_or_else(|| format!("found header {name}"), ToString::to_string),
    )?;

    // The found check above passed, so a first value exists.
    let Some(first) = first else { return Ok(()) };

    if let Some(type_name) = &header.value_type {
        let value = Value::String(first.to_string());
        hard(
            outcomes,
            check_type(type_name, &value),
            label.map_or_else(
                || format!("header {name} has type {type_name}, got '{first}'"),
                ToString::to_string,
            ),
        )?;
    }

    if let Some(expected) = &header.value {
        hard(
            outcomes,
            first == expected,
            label.map_or_else(
                || format!("header {name} equals '{expected}', got '{first}'"),
                ToString::to_string,
            ),
        )?;
    }

    Ok(())
}

/// First value of a header, looked up case-insensitively.
fn header_first_value<'a>(envelope: &'a ResponseEnvelope, name: &str) -> Option<&'a str> {
    envelope
        .headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

// ============================================================================
// Type Checks
// ============================================================================

/// Checks a JSON value against a declared type name.
///
/// `int` accepts numbers and numeric strings so header values can be
/// type-checked with the same rules as body leaves. Unknown type names
/// fall back to the `string` check.
#[must_use]
pub fn check_type(type_name: &str, value: &Value) -> bool {
    match type_name {
        "url" => value
            .as_str()
            .is_some_and(|s| url::Url::parse(s).is_ok()),
        "int" => value.is_number() || value.as_str().is_some_and(is_numeric),
        "bool" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        // "string" and any unknown type name
        _ => value.is_string(),
    }
}

fn is_numeric(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

// ============================================================================
// Schema
// ============================================================================

fn eval_schema(
    outcomes: &mut Vec<Outcome>,
    envelope: &ResponseEnvelope,
    assertion: &SchemaAssert,
    label: Option<&str>,
    options: EvalOptions,
) -> Result<(), AssertionError> {
    let response = envelope.response.as_ref();
    let schema = assertion.schema.as_ref().unwrap_or(&Value::Null);
    let describe = |default: String| label.map_or(default, ToString::to_string);

    match assertion.kind.as_str() {
        "notNull" => hard(
            outcomes,
            response.is_some_and(|v| !v.is_null()),
            describe("response body is not null".to_string()),
        ),
        "null" => hard(
            outcomes,
            matches!(response, Some(Value::Null)),
            describe("response body is null".to_string()),
        ),
        "found" => hard(
            outcomes,
            response.is_some_and(|r| check_found(r, schema, options.strict_types)),
            describe(format!("found schema key {schema}")),
        ),
        "notFound" => hard(
            outcomes,
            !response.is_some_and(|r| check_found(r, schema, options.strict_types)),
            describe(format!("not found schema key {schema}")),
        ),
        "equal" => hard(
            outcomes,
            response.is_some_and(|r| check_equal(r, schema)),
            describe(format!("schema equals {schema}")),
        ),
        "notEqual" => hard(
            outcomes,
            !response.is_some_and(|r| check_equal(r, schema)),
            describe(format!("schema not equal {schema}")),
        ),
        other => {
            outcomes.push(Outcome::warning(format!(
                "schema assertion type '{other}' not found, skipped"
            )));
            Ok(())
        }
    }
}

/// Recursive descent check for `found`/`notFound`.
///
/// The first declared schema key present in the response container decides
/// the result: a nested mapping recurses into the matching sub-container, a
/// leaf is type-checked. Declaration order is preserved end to end (the
/// schema maps keep insertion order), so "first" means first in the plan
/// file, not first alphabetically. Unless `strict` is set, presence alone drives the
/// leaf result and the type check outcome is deliberately ignored, which
/// is the historic behavior existing plans rely on.
fn check_found(response: &Value, schema: &Value, strict: bool) -> bool {
    let Some(schema_map) = schema.as_object() else {
        return false;
    };
    let Some(response_map) = response.as_object() else {
        return false;
    };

    for (key, expected) in schema_map {
        if let Some(actual) = response_map.get(key) {
            if expected.is_object() {
                return check_found(actual, expected, strict);
            }
            let type_ok = check_type(expected.as_str().unwrap_or("string"), actual);
            return if strict { type_ok } else { true };
        }
    }

    false
}

/// Recursive equality check for `equal`/`notEqual`.
///
/// The first schema key present in the response decides: nested mappings
/// recurse, leaves compare string representations for exact equality.
fn check_equal(response: &Value, schema: &Value) -> bool {
    let Some(schema_map) = schema.as_object() else {
        return false;
    };
    let Some(response_map) = response.as_object() else {
        return false;
    };

    for (key, expected) in schema_map {
        if let Some(actual) = response_map.get(key) {
            if expected.is_object() {
                return check_equal(actual, expected);
            }
            return coerce(actual) == coerce(expected);
        }
    }

    false
}

/// String coercion used by the equality check: strings compare by content,
/// everything else by JSON representation.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
