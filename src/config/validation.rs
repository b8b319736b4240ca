//! Test plan validation
//!
//! Structural checks that run after parsing and before any request is
//! made. Errors abort the run; warnings are reported and execution
//! continues.

use std::collections::HashSet;

use crate::chain::resolver;
use crate::config::schema::TestPlan;
use crate::error::{Severity, ValidationIssue};

/// Validates a parsed test plan and returns every issue found.
///
/// Checks:
/// - non-empty base URL
/// - non-empty auth fields when auth is configured
/// - route names unique within each group
/// - at most one `{...}` placeholder per route path
/// - placeholders reference a route declared earlier in the same group
#[must_use]
pub fn validate(plan: &TestPlan) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if plan.url.trim().is_empty() {
        issues.push(error("url", "url is missing"));
    }

    if let Some(auth) = &plan.auth {
        for (field, value) in [
            ("auth.path", &auth.path),
            ("auth.username", &auth.username),
            ("auth.password", &auth.password),
            ("auth.tokenName", &auth.token_name),
        ] {
            if value.trim().is_empty() {
                issues.push(error(field, "field is empty"));
            }
        }
    }

    for (gi, group) in plan.groups.iter().enumerate() {
        let group_path = format!("groups[{gi}]");

        if group.name.trim().is_empty() {
            issues.push(error(&group_path, "group name is empty"));
        }

        if group.routes.is_empty() {
            issues.push(warning(&group_path, "group has no routes"));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (ri, route) in group.routes.iter().enumerate() {
            let route_path = format!("{group_path}.routes[{ri}]");

            if route.name.trim().is_empty() {
                issues.push(error(&route_path, "route name is empty"));
            } else if !seen.insert(route.name.as_str()) {
                issues.push(error(
                    &route_path,
                    format!("duplicate route name '{}'", route.name),
                ));
            }

            if let Some(path) = &route.path {
                check_placeholders(path, &route_path, &seen, &mut issues);
            }
        }
    }

    issues
}

/// Placeholder checks for one route path.
///
/// Multiple placeholders in one template are unsupported and rejected
/// loudly here rather than silently mishandled at resolution time.
fn check_placeholders(
    path: &str,
    location: &str,
    earlier_routes: &HashSet<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let count = resolver::placeholder_count(path);
    if count > 1 {
        issues.push(error(
            &format!("{location}.path"),
            format!("{count} placeholders in one path, at most one is supported"),
        ));
        return;
    }

    if let Some(expr) = resolver::placeholder_expression(path) {
        let mut segments = expr.split('.');
        let route_name = segments.next().unwrap_or_default();

        if segments.next().is_none() {
            issues.push(warning(
                &format!("{location}.path"),
                format!("placeholder '{{{expr}}}' has no field segments"),
            ));
        }

        // The store only holds responses of routes that already ran, so a
        // forward or unknown reference can never resolve.
        if !earlier_routes.contains(route_name) {
            issues.push(warning(
                &format!("{location}.path"),
                format!("placeholder references '{route_name}', which is not an earlier route in this group"),
            ));
        }
    }
}

fn error(path: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message: message.into(),
        severity: Severity::Error,
    }
}

fn warning(path: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message: message.into(),
        severity: Severity::Warning,
    }
}
