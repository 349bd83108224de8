//! Template filling for provider request definitions
//!
//! Provider descriptors carry `{key}` placeholders in their URL, header,
//! parameter, and payload templates. Filling substitutes each placeholder
//! with a value from the request context and recurses through nested
//! mappings. Substitution is atomic per string: if any placeholder names a
//! key the context does not contain, the whole string is returned unchanged
//! rather than partially filled.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Fill `{key}` placeholders in a template value from the given context.
///
/// Strings are substituted, objects are filled recursively with keys
/// preserved, and every other value (numbers, booleans, null, arrays)
/// passes through unchanged.
pub fn fill(template: &Value, context: &HashMap<String, String>) -> Value {
    match template {
        Value::String(s) => Value::String(fill_str(s, context)),
        Value::Object(map) => Value::Object(fill_map(map, context)),
        other => other.clone(),
    }
}

/// Fill every value of a string-keyed template mapping.
pub fn fill_map(map: &Map<String, Value>, context: &HashMap<String, String>) -> Map<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), fill(v, context))).collect()
}

/// Fill placeholders in a bare string template (URLs and the like).
pub fn fill_text(template: &str, context: &HashMap<String, String>) -> String {
    fill_str(template, context)
}

/// Substitute placeholders in a single string.
///
/// Returns the original string when a placeholder references a key absent
/// from the context, or when a `{` is never closed. Partial substitution
/// never happens.
fn fill_str(template: &str, context: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unterminated placeholder: the substitution cannot resolve
            return template.to_string();
        };
        let key = &after[..close];
        match context.get(key) {
            Some(value) => out.push_str(value),
            None => return template.to_string(),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_string_is_fixed_point() {
        let context = ctx(&[("query", "rust")]);
        let template = json!("no placeholders here");
        assert_eq!(fill(&template, &context), json!("no placeholders here"));
    }

    #[test]
    fn test_substitutes_known_keys() {
        let context = ctx(&[("query", "rust"), ("limit", "10")]);
        let template = json!("q={query}&n={limit}");
        assert_eq!(fill(&template, &context), json!("q=rust&n=10"));
    }

    #[test]
    fn test_missing_key_returns_original_unchanged() {
        let context = ctx(&[("query", "rust")]);
        let template = json!("q={query}&key={api_key}");
        // Atomic failure: {query} must not be substituted either
        assert_eq!(fill(&template, &context), json!("q={query}&key={api_key}"));
    }

    #[test]
    fn test_unterminated_placeholder_returns_original() {
        let context = ctx(&[("query", "rust")]);
        let template = json!("q={query");
        assert_eq!(fill(&template, &context), json!("q={query"));
    }

    #[test]
    fn test_empty_value_substitutes_to_empty() {
        let context = ctx(&[("api_key", "")]);
        let template = json!("Bearer {api_key}");
        assert_eq!(fill(&template, &context), json!("Bearer "));
    }

    #[test]
    fn test_nested_mapping_preserves_shape() {
        let context = ctx(&[("query", "rust"), ("language", "en-US")]);
        let template = json!({
            "search": {
                "q": "{query}",
                "locale": {"lang": "{language}"}
            },
            "version": 2
        });
        let filled = fill(&template, &context);
        assert_eq!(
            filled,
            json!({
                "search": {
                    "q": "rust",
                    "locale": {"lang": "en-US"}
                },
                "version": 2
            })
        );
    }

    #[test]
    fn test_non_string_values_pass_through() {
        let context = ctx(&[("query", "rust")]);
        assert_eq!(fill(&json!(42), &context), json!(42));
        assert_eq!(fill(&json!(true), &context), json!(true));
        assert_eq!(fill(&json!(null), &context), json!(null));
        assert_eq!(fill(&json!(["{query}"]), &context), json!(["{query}"]));
    }

    #[test]
    fn test_fill_text_on_urls() {
        let context = ctx(&[("query", "rust"), ("limit", "5")]);
        assert_eq!(
            fill_text("https://api.example.com/search?q={query}&n={limit}", &context),
            "https://api.example.com/search?q=rust&n=5"
        );
        assert_eq!(
            fill_text("https://api.example.com/search", &context),
            "https://api.example.com/search"
        );
    }

    #[test]
    fn test_fill_map_keeps_keys() {
        let context = ctx(&[("api_key", "secret")]);
        let map = json!({"Authorization": "Bearer {api_key}", "Accept": "application/json"});
        let Value::Object(map) = map else { unreachable!() };
        let filled = fill_map(&map, &context);
        assert_eq!(filled["Authorization"], json!("Bearer secret"));
        assert_eq!(filled["Accept"], json!("application/json"));
    }
}
