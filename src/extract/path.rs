//! Minimal path-query evaluation over JSON documents
//!
//! Supports the subset provider mappings actually need: `@` for the current
//! document, dotted field chains (`data.items`), array indexing
//! (`items[0]`, `[1]`), and array flattening (`items[].title`). Anything a
//! path cannot resolve yields `None` rather than an error.

use serde_json::Value;

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Object field access
    Field(String),
    /// Array element access
    Index(usize),
    /// Project the remaining path over every array element
    Flatten,
}

/// Evaluate `path` against `document`.
///
/// `@`, an empty path, and whitespace-only paths select the document
/// itself. Unresolvable paths (wrong shape, missing field, index out of
/// bounds, malformed syntax) return `None`.
pub fn query(document: &Value, path: &str) -> Option<Value> {
    let path = path.trim();
    if path.is_empty() || path == "@" {
        return Some(document.clone());
    }
    let segments = parse(path)?;
    eval(document, &segments)
}

fn eval(value: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match segment {
        Segment::Field(name) => value.as_object()?.get(name).and_then(|v| eval(v, rest)),
        Segment::Index(i) => value.as_array()?.get(*i).and_then(|v| eval(v, rest)),
        Segment::Flatten => {
            let items = value
                .as_array()?
                .iter()
                .filter_map(|v| eval(v, rest))
                .filter(|v| !v.is_null())
                .collect();
            Some(Value::Array(items))
        }
    }
}

fn parse(path: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let mut rest = part;

        // Leading name, if any
        if let Some(bracket) = rest.find('[') {
            if bracket > 0 {
                segments.push(Segment::Field(rest[..bracket].to_string()));
            }
            rest = &rest[bracket..];
        } else {
            if rest.is_empty() {
                return None;
            }
            segments.push(Segment::Field(rest.to_string()));
            continue;
        }

        // One or more [idx] / [] suffixes
        while !rest.is_empty() {
            if !rest.starts_with('[') {
                return None;
            }
            let close = rest.find(']')?;
            let inner = &rest[1..close];
            if inner.is_empty() {
                segments.push(Segment::Flatten);
            } else {
                segments.push(Segment::Index(inner.parse().ok()?));
            }
            rest = &rest[close + 1..];
        }
    }

    Some(segments)
}
