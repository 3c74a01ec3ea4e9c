//! Owned document trees with path-based access.
//!
//! `Tree` wraps a root [`Node`] and exposes the path engines on it, plus the
//! whole-tree operations that do not fit a single path: merging another
//! document over this one and substituting text inside string values.
//!
//! # Example
//!
//! ```
//! use yamlnub::document::tree::Tree;
//! use yamlnub::document::node::Node;
//!
//! let mut tree: Tree = "name: Alice\ntags: [a]\n".parse().unwrap();
//! tree.mutate("tags.[-1]", Node::from("b")).unwrap();
//! tree.insert("tags.[0]", Node::from("first")).unwrap();
//!
//! let tags = tree.query("tags").unwrap().unwrap();
//! assert_eq!(tags.to_strings(), vec!["first", "b"]);
//! ```

use super::node::Node;
use super::parser::{parse_yaml, to_json, to_json_pretty, to_yaml};
use crate::yamlpath::{mutator, Evaluator, Parser, PathError};
use anyhow::Result;
use std::str::FromStr;

/// A complete document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Creates a new tree with the given root node.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Returns a reference to the root node of the tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns a mutable reference to the root node of the tree.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Looks up a node by path.
    ///
    /// A path that is well formed but does not exist in this document yields
    /// `Ok(None)`.
    pub fn query(&self, path: &str) -> Result<Option<&Node>, PathError> {
        let path = Parser::parse(path)?;
        Ok(Evaluator::new(&self.root).evaluate(&path.segments))
    }

    /// Like [`Tree::query`], treating a malformed path as absent.
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.query(path).ok().flatten()
    }

    /// Writes `value` at `path`, creating missing containers on the way.
    pub fn mutate(&mut self, path: &str, value: Node) -> Result<&mut Self, PathError> {
        let path = Parser::parse(path)?;
        mutator::apply(&mut self.root, &path, value)?;
        Ok(self)
    }

    /// Writes `value` at `path` with the last segment in insert form, so
    /// `items.[0]` inserts at the front instead of overwriting.
    pub fn insert(&mut self, path: &str, value: Node) -> Result<&mut Self, PathError> {
        let path = Parser::parse(path)?.into_insert_form();
        mutator::apply(&mut self.root, &path, value)?;
        Ok(self)
    }

    /// Deep-merges `other` over this tree. Values from `other` win.
    ///
    /// Maps merge key by key, recursively. Sequences are overwritten
    /// element-wise and any extra elements of `other` are appended. Every
    /// other combination replaces the existing value.
    pub fn merge(&mut self, other: Node) -> &mut Self {
        merge_nodes(&mut self.root, other);
        self
    }

    /// Replaces every occurrence of each `(from, to)` pair, in order, inside
    /// every string value of the tree. Map keys are left alone.
    pub fn replace_strings(&mut self, pairs: &[(&str, &str)]) -> &mut Self {
        replace_in(&mut self.root, pairs);
        self
    }

    pub fn to_yaml(&self) -> Result<String> {
        to_yaml(&self.root)
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(&self.root)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        to_json_pretty(&self.root)
    }
}

fn merge_nodes(base: &mut Node, incoming: Node) {
    match (base, incoming) {
        (Node::Map(base), Node::Map(incoming)) => {
            for (key, value) in incoming {
                match base.get_mut(&key) {
                    Some(existing) => merge_nodes(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Node::Sequence(base), Node::Sequence(incoming)) => {
            for (i, value) in incoming.into_iter().enumerate() {
                if i < base.len() {
                    base[i] = value;
                } else {
                    base.push(value);
                }
            }
        }
        (base, incoming) => *base = incoming,
    }
}

fn replace_in(node: &mut Node, pairs: &[(&str, &str)]) {
    match node {
        Node::String(s) => {
            for (from, to) in pairs {
                if !from.is_empty() && s.contains(from) {
                    *s = s.replace(from, to);
                }
            }
        }
        Node::Map(map) => map.values_mut().for_each(|value| replace_in(value, pairs)),
        Node::Sequence(items) => items.iter_mut().for_each(|item| replace_in(item, pairs)),
        _ => {}
    }
}

impl FromStr for Tree {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Tree::new(parse_yaml(s)?))
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Tree::new(root)
    }
}
