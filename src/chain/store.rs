//! Response store
//!
//! Mapping from route name to its captured response envelope. A store
//! lives for exactly one group, so response data never leaks across
//! groups.

use std::collections::HashMap;

use serde::Serialize;

/// The captured record of one executed route.
///
/// Created exactly once per route execution and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// Final request URL
    pub url: String,

    /// Request method
    pub method: String,

    /// Request body that was sent, if any
    pub body: Option<serde_json::Value>,

    /// Response status code
    pub status: u16,

    /// Raw response body text
    pub raw_body: String,

    /// Decoded response body; `None` when the body was empty or not valid
    /// JSON
    pub response: Option<serde_json::Value>,

    /// Response headers, each name mapping to its ordered values
    pub headers: HashMap<String, Vec<String>>,
}

/// Per-group storage of captured response envelopes, keyed by route name.
///
/// Lookup by route name is the only access pattern; no expiry besides the
/// group-boundary [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct ResponseStore {
    entries: HashMap<String, ResponseEnvelope>,
}

impl ResponseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the envelope captured for `route_name`, replacing any
    /// previous entry with the same name.
    pub fn put(&mut self, route_name: impl Into<String>, envelope: ResponseEnvelope) {
        self.entries.insert(route_name.into(), envelope);
    }

    /// Looks up the envelope captured for `route_name`.
    #[must_use]
    pub fn get(&self, route_name: &str) -> Option<&ResponseEnvelope> {
        self.entries.get(route_name)
    }

    /// Drops every stored envelope.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored envelopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no envelopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(status: u16) -> ResponseEnvelope {
        ResponseEnvelope {
            url: "http://localhost/x".to_string(),
            method: "GET".to_string(),
            body: None,
            status,
            raw_body: r#"{"id": 1}"#.to_string(),
            response: Some(json!({"id": 1})),
            headers: HashMap::new(),
        }
    }

    #[test]
    fn put_then_get() {
        let mut store = ResponseStore::new();
        store.put("login", envelope(200));
        assert_eq!(store.get("login").unwrap().status, 200);
        assert!(store.get("other").is_none());
    }

    #[test]
    fn put_replaces_existing() {
        let mut store = ResponseStore::new();
        store.put("login", envelope(200));
        store.put("login", envelope(401));
        assert_eq!(store.get("login").unwrap().status, 401);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_drops_every_entry() {
        let mut store = ResponseStore::new();
        store.put("a", envelope(200));
        store.put("b", envelope(201));
        store.clear();
        assert!(store.is_empty());
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_none());
    }

    #[test]
    fn envelope_serializes_to_json() {
        let env = envelope(200);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["response"]["id"], 1);
        assert_eq!(value["method"], "GET");
    }
}
