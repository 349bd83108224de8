//! Declarative provider descriptors

use crate::extract::ResponseMapping;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A provider definition loaded from configuration.
///
/// Descriptors are fully specified before first use: optional sections
/// missing from the configuration deserialize to empty structures. After
/// load (when the registry injects `name` from the configuration key) a
/// descriptor is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderDescriptor {
    /// Unique identifier, injected from the configuration key at load time
    pub name: String,
    /// Implementation selector; anything but a known vendor tag gets the
    /// generic template-driven provider
    #[serde(rename = "type")]
    pub kind: String,
    /// Default endpoint template; may contain placeholders
    pub url: String,
    /// HTTP method, compared case-insensitively at request time
    pub method: String,
    /// Header templates
    pub headers: Map<String, Value>,
    /// Query parameter templates
    pub params: Map<String, Value>,
    /// JSON body templates
    pub payload: Map<String, Value>,
    /// Rules for normalizing the response
    pub response_mapping: ResponseMapping,
}

impl Default for ProviderDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: KIND_GENERIC.to_string(),
            url: String::new(),
            method: "GET".to_string(),
            headers: Map::new(),
            params: Map::new(),
            payload: Map::new(),
            response_mapping: ResponseMapping::default(),
        }
    }
}

/// Tag for the generic template-driven provider
pub const KIND_GENERIC: &str = "generic";
/// Tag for the Querit vendor-native provider
pub const KIND_QUERIT: &str = "querit";

impl ProviderDescriptor {
    /// Whether the request should be a POST. `GET` in any casing gets a
    /// GET; every other method value issues a POST.
    pub fn is_post(&self) -> bool {
        !self.method.eq_ignore_ascii_case("GET")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let descriptor: ProviderDescriptor =
            serde_yaml::from_str("url: https://api.example.com/search\n").unwrap();

        assert_eq!(descriptor.url, "https://api.example.com/search");
        assert_eq!(descriptor.kind, KIND_GENERIC);
        assert_eq!(descriptor.method, "GET");
        assert!(descriptor.headers.is_empty());
        assert!(descriptor.params.is_empty());
        assert!(descriptor.payload.is_empty());
        assert_eq!(descriptor.response_mapping.root_path, "@");
        assert!(descriptor.response_mapping.fields.is_empty());
    }

    #[test]
    fn test_type_tag_maps_to_kind() {
        let descriptor: ProviderDescriptor = serde_yaml::from_str("type: querit\n").unwrap();
        assert_eq!(descriptor.kind, KIND_QUERIT);
    }

    #[test]
    fn test_method_comparison_is_case_insensitive() {
        let mut descriptor = ProviderDescriptor::default();
        assert!(!descriptor.is_post());

        descriptor.method = "get".to_string();
        assert!(!descriptor.is_post());

        descriptor.method = "post".to_string();
        assert!(descriptor.is_post());

        // Unrecognized methods fall through to POST
        descriptor.method = "PATCH".to_string();
        assert!(descriptor.is_post());
    }

    #[test]
    fn test_full_descriptor_roundtrip() {
        let yaml = r#"
url: "https://api.example.com/search"
method: POST
headers:
  Authorization: "Bearer {api_key}"
params:
  q: "{query}"
payload:
  options:
    count: "{limit}"
response_mapping:
  root_path: "data.items"
  fields:
    title: "name"
    url: "link"
    snippet: "summary"
"#;
        let descriptor: ProviderDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert!(descriptor.is_post());
        assert_eq!(descriptor.headers["Authorization"], "Bearer {api_key}");
        assert_eq!(descriptor.response_mapping.root_path, "data.items");
        let fields: Vec<_> = descriptor.response_mapping.fields.keys().cloned().collect();
        assert_eq!(fields, vec!["title", "url", "snippet"]);
    }
}
