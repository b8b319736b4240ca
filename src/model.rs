//! Request model builder
//!
//! Synthesizes a request payload for a route group from declarative
//! per-field type directives. Directive values are strings (`int`,
//! `string`, `email`, `date`, …); any other value passes through verbatim,
//! which is how plans pin fixed test values.

use chrono::{DateTime, Months, Utc};
use indexmap::IndexMap;
use rand::Rng;
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Default inclusive range for the `int` directive.
pub const DEFAULT_RANDOM_RANGE: (i64, i64) = (0, 10);

/// Builds a request payload from a field → directive mapping.
///
/// `prefix` (the group name) scopes generated unique identifiers so runs
/// against shared environments do not collide. `min`/`max` bound the `int`
/// directive inclusively; they are normalized if given in reverse order.
///
/// Never fails: every unrecognized directive falls through to passthrough.
#[must_use]
pub fn build_model(
    fields: &IndexMap<String, Value>,
    prefix: &str,
    min: i64,
    max: i64,
) -> Map<String, Value> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let mut rng = rand::rng();
    let mut built = Map::new();

    for (name, directive) in fields {
        let value = match directive.as_str() {
            Some("object") => json!({}),
            Some("array") => json!([]),
            Some("int") => json!(rng.random_range(lo..=hi)),
            Some("null") => Value::Null,
            Some("empty") => json!(""),
            Some("phone") => json!("+33123456789"),
            Some("address") => json!(format!("{} rue de l'avant", rng.random_range(1..=100))),
            Some("email") => json!(format!("{}-test@localhost.lan", unique_id(prefix))),
            Some("postal_code") => json!(format!(
                "{}{}",
                rng.random_range(10..=299),
                rng.random_range(111..=999)
            )),
            Some("date") => json!(random_date(&mut rng)),
            Some("string") => json!(unique_id(prefix)),
            // Passthrough: fixed test values, including non-string YAML values
            _ => directive.clone(),
        };
        built.insert(name.clone(), value);
    }

    built
}

/// A unique identifier scoped by `prefix`.
fn unique_id(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

/// A `YYYY-MM-DD` date drawn uniformly between 1970-01-01 and twenty years
/// before now.
fn random_date<R: Rng>(rng: &mut R) -> String {
    let upper = Utc::now()
        .checked_sub_months(Months::new(240))
        .map_or(0, |d| d.timestamp());
    let secs = rng.random_range(0..=upper.max(0));

    DateTime::<Utc>::from_timestamp(secs, 0)
        .map_or_else(|| "1970-01-01".to_string(), |d| d.format("%Y-%m-%d").to_string())
}
