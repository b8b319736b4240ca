//! Path resolver
//!
//! Rewrites a `{routeName.field.field...}` placeholder in a route path
//! using response data captured earlier in the same group. When a
//! navigation step lands on an array, one element is picked uniformly at
//! random before continuing, so chained routes exercise varying records
//! across runs.

use rand::seq::IndexedRandom;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

use super::store::ResponseStore;

/// Regex matching one `{...}` placeholder expression.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid regex"));

/// Number of `{...}` placeholders in a path template.
///
/// Plans with more than one per template are rejected at validation time.
#[must_use]
pub fn placeholder_count(template: &str) -> usize {
    PLACEHOLDER_RE.find_iter(template).count()
}

/// The expression inside the first `{...}` placeholder, if any.
#[must_use]
pub fn placeholder_expression(template: &str) -> Option<&str> {
    PLACEHOLDER_RE
        .captures(template)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves the placeholder in `template` against the group's response
/// store.
///
/// - A template without a placeholder (including `""` and `"/"`) is
///   returned unchanged.
/// - An unknown route name, an envelope without a decoded body, or a
///   failed navigation step yields `None`. Resolution failure is
///   non-fatal; the caller decides whether to skip the route.
#[must_use]
pub fn resolve(template: &str, store: &ResponseStore) -> Option<String> {
    let Some(expr) = placeholder_expression(template) else {
        return Some(template.to_string());
    };

    let mut segments = expr.split('.');
    let route_name = segments.next()?;

    let Some(response) = store.get(route_name).and_then(|e| e.response.as_ref()) else {
        warn!("no results found for {route_name}");
        return None;
    };

    let value = walk(response, segments)?;
    let placeholder = format!("{{{expr}}}");
    Some(template.replacen(&placeholder, &render(&value), 1))
}

/// Walks the navigation path into a decoded response body.
///
/// Each segment descends one level: object keys by name, array positions
/// by numeric index. Whenever the value reached by a segment is itself an
/// array, one element is picked uniformly at random before the next
/// segment applies. Navigation stops with `None` the moment a segment is
/// absent in the current container or the current value is a scalar with
/// segments remaining.
fn walk<'a>(root: &Value, segments: impl Iterator<Item = &'a str>) -> Option<Value> {
    let mut rng = rand::rng();
    let mut current = root;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };

        if let Value::Array(items) = current {
            current = items.choose(&mut rng)?;
        }
    }

    Some(current.clone())
}

/// Renders a resolved value for substitution into the path.
///
/// Strings are used as-is; anything else uses its JSON representation.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::store::ResponseEnvelope;
    use serde_json::json;
    use std::collections::HashMap;

    fn store_with(route: &str, response: Option<Value>) -> ResponseStore {
        let mut store = ResponseStore::new();
        store.put(
            route,
            ResponseEnvelope {
                url: "http://localhost/x".to_string(),
                method: "GET".to_string(),
                body: None,
                status: 200,
                raw_body: String::new(),
                response,
                headers: HashMap::new(),
            },
        );
        store
    }

    #[test]
    fn template_without_placeholder_is_unchanged() {
        let store = ResponseStore::new();
        assert_eq!(resolve("/health", &store).unwrap(), "/health");
        assert_eq!(resolve("/", &store).unwrap(), "/");
        assert_eq!(resolve("", &store).unwrap(), "");
    }

    #[test]
    fn resolves_scalar_field() {
        let store = store_with("login", Some(json!({"id": 42})));
        assert_eq!(resolve("/user/{login.id}", &store).unwrap(), "/user/42");
    }

    #[test]
    fn resolves_string_field_without_quotes() {
        let store = store_with("login", Some(json!({"name": "alice"})));
        assert_eq!(
            resolve("/user/{login.name}/posts", &store).unwrap(),
            "/user/alice/posts"
        );
    }

    #[test]
    fn resolves_nested_field() {
        let store = store_with("login", Some(json!({"user": {"id": 7}})));
        assert_eq!(resolve("/user/{login.user.id}", &store).unwrap(), "/user/7");
    }

    #[test]
    fn array_field_picks_one_declared_element() {
        let store = store_with("list", Some(json!({"ids": [1, 2, 3]})));
        for _ in 0..50 {
            let resolved = resolve("/user/{list.ids}", &store).unwrap();
            assert!(
                ["/user/1", "/user/2", "/user/3"].contains(&resolved.as_str()),
                "unexpected resolution: {resolved}"
            );
        }
    }

    #[test]
    fn navigates_into_random_array_element() {
        // Every element has the same id, so the random pick is observable
        // but the outcome is deterministic.
        let store = store_with(
            "list",
            Some(json!({"users": [{"id": 9}, {"id": 9}, {"id": 9}]})),
        );
        assert_eq!(resolve("/user/{list.users.id}", &store).unwrap(), "/user/9");
    }

    #[test]
    fn missing_route_yields_none() {
        let store = ResponseStore::new();
        assert!(resolve("/x/{missing.id}", &store).is_none());
    }

    #[test]
    fn route_without_decoded_body_yields_none() {
        let store = store_with("login", None);
        assert!(resolve("/x/{login.id}", &store).is_none());
    }

    #[test]
    fn missing_key_yields_none() {
        let store = store_with("login", Some(json!({"id": 42})));
        assert!(resolve("/x/{login.nope}", &store).is_none());
    }

    #[test]
    fn scalar_with_remaining_segments_yields_none() {
        let store = store_with("login", Some(json!({"id": 42})));
        assert!(resolve("/x/{login.id.deeper}", &store).is_none());
    }

    #[test]
    fn empty_array_yields_none() {
        let store = store_with("list", Some(json!({"ids": []})));
        assert!(resolve("/x/{list.ids}", &store).is_none());
    }

    #[test]
    fn numeric_segment_indexes_top_level_array() {
        let store = store_with("list", Some(json!([{"id": 5}])));
        assert_eq!(resolve("/user/{list.0.id}", &store).unwrap(), "/user/5");
    }

    #[test]
    fn null_field_renders_as_null() {
        let store = store_with("login", Some(json!({"id": null})));
        assert_eq!(resolve("/x/{login.id}", &store).unwrap(), "/x/null");
    }

    #[test]
    fn surrounding_text_is_preserved() {
        let store = store_with("login", Some(json!({"id": 42})));
        assert_eq!(
            resolve("/a/{login.id}/b?x=1", &store).unwrap(),
            "/a/42/b?x=1"
        );
    }

    #[test]
    fn placeholder_count_counts_all() {
        assert_eq!(placeholder_count("/a/b"), 0);
        assert_eq!(placeholder_count("/a/{x.y}"), 1);
        assert_eq!(placeholder_count("/{x.y}/{z.w}"), 2);
    }

    #[test]
    fn placeholder_expression_extracts_first() {
        assert_eq!(placeholder_expression("/a/{x.y}"), Some("x.y"));
        assert_eq!(placeholder_expression("/a/b"), None);
    }
}
