//! Decoding and encoding between text and `Node` trees.
//!
//! Decoding goes through `serde_yaml`, which also accepts JSON since JSON is
//! a subset of YAML. The resulting `serde_yaml::Value` is converted into our
//! own `Node` representation so the rest of the crate never depends on the
//! decoder's value type.
//!
//! # Example
//!
//! ```
//! use yamlnub::document::parser::{parse_yaml, to_json};
//!
//! let node = parse_yaml("name: Alice\nage: 30\n").unwrap();
//! assert_eq!(to_json(&node).unwrap(), r#"{"name":"Alice","age":30}"#);
//! ```

use super::node::Node;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_yaml::Value as SerdeValue;

/// Parses a YAML (or JSON) string into a `Node`.
///
/// An empty or whitespace-only document decodes to `Node::Null`.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML.
pub fn parse_yaml(source: &str) -> Result<Node> {
    if source.trim().is_empty() {
        return Ok(Node::Null);
    }
    let value: SerdeValue = serde_yaml::from_str(source).context("Failed to parse YAML")?;
    let node = parse_value(&value);
    tracing::debug!(kind = %node.kind(), bytes = source.len(), "decoded document");
    Ok(node)
}

/// Converts a decoded `serde_yaml::Value` into a `Node`.
///
/// Non-string map keys are rendered as text (`1: two` yields the key `"1"`)
/// and YAML tags are dropped in favor of the tagged value.
pub fn parse_value(value: &SerdeValue) -> Node {
    match value {
        SerdeValue::Null => Node::Null,
        SerdeValue::Bool(b) => Node::Bool(*b),
        SerdeValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Int(i)
            } else {
                // u64 beyond i64::MAX and real floats both land here
                Node::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        SerdeValue::String(s) => Node::String(s.clone()),
        SerdeValue::Sequence(items) => Node::Sequence(items.iter().map(parse_value).collect()),
        SerdeValue::Mapping(mapping) => {
            let mut map = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_to_string(key), parse_value(value));
            }
            Node::Map(map)
        }
        SerdeValue::Tagged(tagged) => parse_value(&tagged.value),
    }
}

fn key_to_string(key: &SerdeValue) -> String {
    match key {
        SerdeValue::String(s) => s.clone(),
        SerdeValue::Null => "null".to_string(),
        SerdeValue::Bool(b) => b.to_string(),
        SerdeValue::Number(n) => n.to_string(),
        other => parse_value(other).to_string(),
    }
}

/// Serializes a node as a YAML document.
pub fn to_yaml(node: &Node) -> Result<String> {
    serde_yaml::to_string(node).context("Failed to serialize YAML")
}

/// Serializes a node as compact JSON.
pub fn to_json(node: &Node) -> Result<String> {
    serde_json::to_string(node).context("Failed to serialize JSON")
}

/// Serializes a node as indented JSON.
pub fn to_json_pretty(node: &Node) -> Result<String> {
    serde_json::to_string_pretty(node).context("Failed to serialize JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_map() {
        let node = parse_yaml("1:\n  2: two\n").unwrap();
        let inner = node.get("1").unwrap();
        assert_eq!(inner.get("2").and_then(Node::as_str), Some("two"));
    }

    #[test]
    fn test_parse_sequence_of_numbers() {
        let node = parse_yaml("foo:\n  - 1\n  - 2\n  - 3\n").unwrap();
        assert_eq!(node.get("foo").unwrap().to_strings(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_json_input() {
        let node = parse_yaml(r#"{"a": [1, 2.5, "x", null, true]}"#).unwrap();
        let items = node.get("a").and_then(Node::as_seq).unwrap();
        assert_eq!(items[0], Node::Int(1));
        assert_eq!(items[1], Node::Float(2.5));
        assert_eq!(items[2], Node::from("x"));
        assert_eq!(items[3], Node::Null);
        assert_eq!(items[4], Node::Bool(true));
    }

    #[test]
    fn test_parse_empty_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Node::Null);
        assert_eq!(parse_yaml("  \n").unwrap(), Node::Null);
    }

    #[test]
    fn test_parse_invalid_fails() {
        assert!(parse_yaml("a: [1, 2").is_err());
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let node = parse_yaml("z: 1\na: 2\nm: 3\n").unwrap();
        let keys: Vec<&str> = node.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let source = "name: foo\nitems:\n- 1\n- 2\n";
        let node = parse_yaml(source).unwrap();
        let encoded = to_yaml(&node).unwrap();
        assert_eq!(parse_yaml(&encoded).unwrap(), node);
    }

    #[test]
    fn test_to_json_pretty_is_valid_json() {
        let node = parse_yaml("a:\n  b: [1, 2]\n").unwrap();
        let json = to_json_pretty(&node).unwrap();
        assert!(json.contains('\n'));
        assert_eq!(parse_yaml(&json).unwrap(), node);
    }
}
