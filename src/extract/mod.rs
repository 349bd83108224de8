//! Response normalization
//!
//! Applies a declarative [`ResponseMapping`] to an arbitrary provider JSON
//! document: a root path selects the list of raw items, and per-field paths
//! pull each output value out of the items. Every provider ends up in the
//! same flat `{title, url, snippet}`-style shape regardless of how its API
//! nests things.

mod path;

pub use path::query;

use crate::results::ResultEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rules for mapping a provider response into normalized entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseMapping {
    /// Path selecting the list of raw result items
    pub root_path: String,
    /// Output field name -> path evaluated against each item,
    /// in declaration order
    pub fields: IndexMap<String, String>,
}

impl Default for ResponseMapping {
    fn default() -> Self {
        Self {
            root_path: "@".to_string(),
            fields: IndexMap::new(),
        }
    }
}

/// Extract normalized result entries from a provider response document.
///
/// A root path that resolves to nothing (or to anything other than an
/// array) yields an empty list, not an error. Within an item, a path that
/// misses or hits `null` normalizes to an empty string; scalars that are
/// present but falsy (`0`, `false`) keep their rendered value.
pub fn extract(document: &Value, mapping: &ResponseMapping) -> Vec<ResultEntry> {
    let items = match query(document, &mapping.root_path) {
        Some(Value::Array(items)) => items,
        _ => return Vec::new(),
    };

    items
        .iter()
        .map(|item| {
            mapping
                .fields
                .iter()
                .map(|(out_key, source_path)| {
                    let value = query(item, source_path).unwrap_or(Value::Null);
                    (out_key.clone(), render(&value))
                })
                .collect()
        })
        .collect()
}

/// Render an extracted value as the entry's string form.
fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Nested structures keep their compact JSON form
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(root: &str, fields: &[(&str, &str)]) -> ResponseMapping {
        ResponseMapping {
            root_path: root.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_extracts_mapped_fields() {
        let doc = json!({"data": {"items": [{"t": "A", "u": "http://x"}]}});
        let mapping = mapping(
            "data.items",
            &[("title", "t"), ("url", "u"), ("snippet", "missing")],
        );

        let entries = extract(&doc, &mapping);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["title"], "A");
        assert_eq!(entries[0]["url"], "http://x");
        assert_eq!(entries[0]["snippet"], "");
    }

    #[test]
    fn test_entry_order_follows_root_list() {
        let doc = json!({"items": [{"t": "first"}, {"t": "second"}, {"t": "third"}]});
        let mapping = mapping("items", &[("title", "t")]);

        let titles: Vec<_> = extract(&doc, &mapping)
            .into_iter()
            .map(|e| e["title"].clone())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_field_order_follows_mapping_declaration() {
        let doc = json!({"items": [{"a": "1", "b": "2", "c": "3"}]});
        let mapping = mapping("items", &[("snippet", "c"), ("title", "a"), ("url", "b")]);

        let entry = &extract(&doc, &mapping)[0];
        let keys: Vec<_> = entry.keys().cloned().collect();
        assert_eq!(keys, vec!["snippet", "title", "url"]);
    }

    #[test]
    fn test_missing_root_yields_empty_list() {
        let doc = json!({"data": {}});
        let mapping = mapping("data.items", &[("title", "t")]);
        assert!(extract(&doc, &mapping).is_empty());
    }

    #[test]
    fn test_non_array_root_yields_empty_list() {
        let doc = json!({"data": {"items": {"t": "not a list"}}});
        let mapping = mapping("data.items", &[("title", "t")]);
        assert!(extract(&doc, &mapping).is_empty());
    }

    #[test]
    fn test_identity_root_over_top_level_array() {
        let doc = json!([{"t": "A"}]);
        let mapping = mapping("@", &[("title", "t")]);
        assert_eq!(extract(&doc, &mapping)[0]["title"], "A");
    }

    #[test]
    fn test_falsy_scalars_keep_their_value() {
        let doc = json!({"items": [{"count": 0, "flag": false, "gone": null}]});
        let mapping = mapping("items", &[("count", "count"), ("flag", "flag"), ("gone", "gone")]);

        let entry = &extract(&doc, &mapping)[0];
        assert_eq!(entry["count"], "0");
        assert_eq!(entry["flag"], "false");
        assert_eq!(entry["gone"], "");
    }

    #[test]
    fn test_nested_value_renders_as_json() {
        let doc = json!({"items": [{"meta": {"k": 1}}]});
        let mapping = mapping("items", &[("meta", "meta")]);
        assert_eq!(extract(&doc, &mapping)[0]["meta"], "{\"k\":1}");
    }
}
