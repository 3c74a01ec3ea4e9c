//! Read-side path evaluation.
//!
//! Evaluation walks one segment at a time from the root. A segment that does
//! not fit the node it is applied to ends the walk with no result; reads
//! never fail once the path itself has parsed.

use super::ast::PathSegment;
use crate::document::node::{Node, Scalar};
use crate::index::abs_index;

pub struct Evaluator<'a> {
    root: &'a Node,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Node) -> Self {
        Evaluator { root }
    }

    /// Returns the node addressed by `segments`, or `None` if any step misses.
    ///
    /// An empty segment list addresses the root.
    pub fn evaluate(&self, segments: &[PathSegment]) -> Option<&'a Node> {
        let mut current = self.root;
        for segment in segments {
            match self.evaluate_segment(current, segment) {
                Some(next) => current = next,
                None => {
                    tracing::trace!(segment = %segment, "path segment not found");
                    return None;
                }
            }
        }
        Some(current)
    }

    fn evaluate_segment(&self, node: &'a Node, segment: &PathSegment) -> Option<&'a Node> {
        match (segment, node) {
            (PathSegment::Key(key), Node::Map(map)) => map.get(key),
            (PathSegment::Index(i) | PathSegment::InsertIndex(i), Node::Sequence(items)) => {
                abs_index(items.len(), *i).map(|idx| &items[idx])
            }
            (
                PathSegment::Predicate { key, value } | PathSegment::InsertPredicate { key, value },
                Node::Sequence(items),
            ) => find_match(items, key, value).map(|idx| &items[idx]),
            _ => None,
        }
    }
}

/// Position of the first map element whose `key` entry holds `value`.
pub(crate) fn find_match(items: &[Node], key: &str, value: &Scalar) -> Option<usize> {
    items
        .iter()
        .position(|item| item.get(key).is_some_and(|entry| value.matches(entry)))
}
