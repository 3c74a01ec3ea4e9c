//! Path expressions for addressing locations inside a document tree.
//!
//! # Supported Syntax
//!
//! - `name` - Map entry
//! - `[n]` - Sequence position (negative counts from the end)
//! - `[key:value]` - First map element whose `key` entry equals `value`
//! - `[[n]]` - Insert at position `n` on write
//! - `[[key:value]]` - Insert before the matching element on write
//!
//! Segments are joined with `.`, e.g. `spec.containers.[name:web].image`.
//! Predicate values are read as YAML scalars, so `[port:80]` matches the
//! number 80 and `[port:'80']` matches the string.
//!
//! # Examples
//!
//! ```
//! use yamlnub::document::parser::parse_yaml;
//! use yamlnub::document::node::Node;
//! use yamlnub::yamlpath;
//!
//! let mut root = parse_yaml("containers: [{name: foo, image: 'foo:1'}]").unwrap();
//! yamlpath::mutate(&mut root, "containers.[name:foo].image", Node::from("foo:2")).unwrap();
//!
//! let image = yamlpath::query(&root, "containers.[0].image").unwrap();
//! assert_eq!(image, Some(&Node::from("foo:2")));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod mutator;
pub mod parser;

pub use ast::{PathSegment, YamlPath};
pub use error::PathError;
pub use evaluator::Evaluator;
pub use parser::Parser;

use crate::document::node::Node;

/// Looks up `path` in `root`.
///
/// Returns `Ok(None)` when the path does not exist in the document. Only a
/// malformed path is an error.
pub fn query<'a>(root: &'a Node, path: &str) -> Result<Option<&'a Node>, PathError> {
    let path = Parser::parse(path)?;
    Ok(Evaluator::new(root).evaluate(&path.segments))
}

/// Writes `value` at `path` inside `root`, creating missing containers.
///
/// A malformed path is rejected before anything is touched. See
/// [`mutator::apply`] for how each kind of segment lands.
pub fn mutate(root: &mut Node, path: &str, value: Node) -> Result<(), PathError> {
    let path = Parser::parse(path)?;
    mutator::apply(root, &path, value)
}
