//! Tree node representation for decoded YAML/JSON documents.
//!
//! A document is a tree of `Node` values: maps keyed by strings, ordered
//! sequences, and scalars. Maps keep their insertion order so an edited
//! document serializes back in the order it was read.
//!
//! # Example
//!
//! ```
//! use yamlnub::document::node::{Kind, Node};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Node::from("yamlnub"));
//! map.insert("version".to_string(), Node::from(1));
//! let node = Node::Map(map);
//!
//! assert_eq!(node.kind(), Kind::Map);
//! assert_eq!(node.get("name").and_then(Node::as_str), Some("yamlnub"));
//! ```

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// The runtime kind of a node.
///
/// Collections pin themselves to one kind and reject values of any other,
/// except that `Int` and `Float` admit each other: node equality already
/// treats them as one number, so a decoded `[1, 2.5]` is a valid collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Map,
    Seq,
}

impl Kind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Float)
    }

    /// Whether a collection of this kind accepts a value of kind `other`.
    pub fn admits(self, other: Kind) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Map => "map",
            Kind::Seq => "sequence",
        };
        f.write_str(name)
    }
}

/// A value in a decoded document tree.
///
/// Equality is numerically tolerant: `Int(2)` equals `Float(2.0)`, because
/// the same number may come back as either depending on the source format.
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(IndexMap<String, Node>),
    Sequence(Vec<Node>),
}

/// A scalar literal, as written in a path predicate such as `[name:2]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Decodes a literal with YAML scalar rules.
    ///
    /// `2` is an integer, `2.5` a float, `true` a boolean, `~` or `null` is
    /// null, and everything else (including text that would decode to a
    /// container) is kept as the raw string.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlnub::document::node::Scalar;
    ///
    /// assert_eq!(Scalar::parse("2"), Scalar::Int(2));
    /// assert_eq!(Scalar::parse("true"), Scalar::Bool(true));
    /// assert_eq!(Scalar::parse("foo"), Scalar::String("foo".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Scalar {
        match serde_yaml::from_str::<serde_yaml::Value>(raw) {
            Ok(serde_yaml::Value::Null) if !raw.trim().is_empty() => Scalar::Null,
            Ok(serde_yaml::Value::Bool(b)) => Scalar::Bool(b),
            Ok(serde_yaml::Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else {
                    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Ok(serde_yaml::Value::String(s)) => Scalar::String(s),
            _ => Scalar::String(raw.to_string()),
        }
    }

    /// Reports whether `node` holds this scalar, comparing numbers by value.
    pub fn matches(&self, node: &Node) -> bool {
        match (self, node) {
            (Scalar::Null, Node::Null) => true,
            (Scalar::Bool(a), Node::Bool(b)) => a == b,
            (Scalar::String(a), Node::String(b)) => a == b,
            (Scalar::Int(_) | Scalar::Float(_), Node::Int(_) | Node::Float(_)) => {
                numbers_equal(&Node::from(self.clone()), node)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

fn numbers_equal(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Int(x), Node::Int(y)) => x == y,
        (Node::Float(x), Node::Float(y)) => x == y,
        (Node::Int(i), Node::Float(f)) | (Node::Float(f), Node::Int(i)) => {
            f.fract() == 0.0 && (*i as f64) == *f
        }
        _ => false,
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Map(a), Node::Map(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a == b,
            (Node::Int(_) | Node::Float(_), Node::Int(_) | Node::Float(_)) => {
                numbers_equal(self, other)
            }
            _ => false,
        }
    }
}

impl Node {
    /// Creates an empty map node.
    pub fn map() -> Self {
        Node::Map(IndexMap::new())
    }

    /// Creates an empty sequence node.
    pub fn sequence() -> Self {
        Node::Sequence(Vec::new())
    }

    /// Returns the runtime kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::String(_) => Kind::Str,
            Node::Map(_) => Kind::Map,
            Node::Sequence(_) => Kind::Seq,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    /// Returns true for maps and sequences.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Sequence(_))
    }

    /// Looks up a map entry. Returns `None` for non-map nodes.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up a sequence element, negative indices counting from the end.
    pub fn at(&self, i: isize) -> Option<&Node> {
        match self {
            Node::Sequence(items) => crate::index::abs_index(items.len(), i).map(|i| &items[i]),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, accepting floats with no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            Node::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_seq_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Renders every element of a sequence as text.
    ///
    /// Non-sequence nodes yield an empty vector.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlnub::document::node::Node;
    ///
    /// let node = Node::Sequence(vec![Node::from(1), Node::from("two")]);
    /// assert_eq!(node.to_strings(), vec!["1".to_string(), "two".to_string()]);
    /// ```
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Node::Sequence(items) => items.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Renders every value of a map as text, keeping the key order.
    ///
    /// Non-map nodes yield an empty map.
    pub fn to_string_map(&self) -> IndexMap<String, String> {
        match self {
            Node::Map(map) => map
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect(),
            _ => IndexMap::new(),
        }
    }
}

/// Scalars render as their plain text; containers render as compact JSON.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Int(i) => write!(f, "{}", i),
            Node::Float(fl) => write!(f, "{}", fl),
            Node::String(s) => f.write_str(s),
            Node::Map(_) | Node::Sequence(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Int(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Node::Sequence(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Node::Null,
            Scalar::Bool(b) => Node::Bool(b),
            Scalar::Int(i) => Node::Int(i),
            Scalar::Float(f) => Node::Float(f),
            Scalar::String(s) => Node::String(s),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Int(i64::from(i))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Int(i)
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(map: IndexMap<String, Node>) -> Self {
        Node::Map(map)
    }
}
