//! Write-side path evaluation.
//!
//! Writes follow the same walk as reads, but create what is missing on the
//! way down. A null node becomes a sequence when the segment applied to it
//! is bracketed and a map otherwise. Positions past the end of a sequence
//! grow it: positive indices append, negative indices prepend.
//!
//! Containers created before a later segment fails are left in place.

use super::ast::{PathSegment, YamlPath};
use super::error::PathError;
use super::evaluator::find_match;
use crate::document::node::{Node, Scalar};
use crate::index::{abs_index, insert_offset};
use indexmap::IndexMap;

/// Writes `value` at `path` inside `root`.
///
/// The last segment decides how the value lands:
///
/// - `key` sets or overwrites the map entry
/// - `[n]` overwrites in place, or grows the sequence when out of range
/// - `[k:v]` overwrites the first match, or appends when nothing matches
/// - `[[n]]` inserts before position `n` (after it, for negative `n`)
/// - `[[k:v]]` inserts before the first match, or appends when nothing matches
///
/// # Errors
///
/// Fails when a segment meets a scalar it would have to descend through, or
/// a container of the wrong kind (`[0]` applied to a map).
pub fn apply(root: &mut Node, path: &YamlPath, value: Node) -> Result<(), PathError> {
    if path.segments.is_empty() {
        *root = value;
        return Ok(());
    }
    write(root, &path.segments, value)
}

fn write(node: &mut Node, segments: &[PathSegment], value: Node) -> Result<(), PathError> {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };

    vivify(node, segment);
    if rest.is_empty() {
        return assign(node, segment, value);
    }
    let child = descend(node, segment)?;
    write(child, rest, value)
}

/// Turns a null node into the container `segment` expects.
fn vivify(node: &mut Node, segment: &PathSegment) {
    if node.is_null() {
        *node = if segment.is_bracketed() {
            Node::sequence()
        } else {
            Node::map()
        };
        tracing::debug!(segment = %segment, kind = %node.kind(), "auto-vivified container");
    }
}

/// Where an insert at `i` lands, growing at the matching end when `i` is out
/// of range.
fn insert_position(len: usize, i: isize) -> usize {
    insert_offset(len, i).unwrap_or(if i < 0 { 0 } else { len })
}

fn predicate_element(key: &str, value: &Scalar) -> Node {
    let mut map = IndexMap::new();
    map.insert(key.to_string(), Node::from(value.clone()));
    Node::Map(map)
}

fn mismatch(segment: &PathSegment, node: &Node) -> PathError {
    if node.is_container() {
        PathError::SegmentMismatch {
            segment: segment.to_string(),
            found: node.kind(),
        }
    } else {
        PathError::NotAContainer {
            segment: segment.to_string(),
            found: node.kind(),
        }
    }
}

fn descend<'a>(node: &'a mut Node, segment: &PathSegment) -> Result<&'a mut Node, PathError> {
    tracing::trace!(segment = %segment, "descending");
    match (segment, node) {
        (PathSegment::Key(key), Node::Map(map)) => Ok(map.entry(key.clone()).or_default()),
        (PathSegment::Index(i), Node::Sequence(items)) => match abs_index(items.len(), *i) {
            Some(idx) => Ok(&mut items[idx]),
            None => {
                let idx = if *i < 0 { 0 } else { items.len() };
                tracing::debug!(index = *i, len = items.len(), "growing sequence");
                items.insert(idx, Node::Null);
                Ok(&mut items[idx])
            }
        },
        (PathSegment::InsertIndex(i), Node::Sequence(items)) => {
            let idx = insert_position(items.len(), *i);
            items.insert(idx, Node::Null);
            Ok(&mut items[idx])
        }
        (PathSegment::Predicate { key, value }, Node::Sequence(items)) => {
            match find_match(items, key, value) {
                Some(idx) => Ok(&mut items[idx]),
                None => {
                    tracing::debug!(key = %key, value = %value, "no match, appending element");
                    items.push(predicate_element(key, value));
                    let last = items.len() - 1;
                    Ok(&mut items[last])
                }
            }
        }
        (PathSegment::InsertPredicate { key, value }, Node::Sequence(items)) => {
            let idx = find_match(items, key, value).unwrap_or(items.len());
            items.insert(idx, predicate_element(key, value));
            Ok(&mut items[idx])
        }
        (segment, node) => Err(mismatch(segment, node)),
    }
}

fn assign(node: &mut Node, segment: &PathSegment, value: Node) -> Result<(), PathError> {
    match (segment, node) {
        (PathSegment::Key(key), Node::Map(map)) => {
            map.insert(key.clone(), value);
        }
        (PathSegment::Index(i), Node::Sequence(items)) => match abs_index(items.len(), *i) {
            Some(idx) => items[idx] = value,
            None if *i < 0 => items.insert(0, value),
            None => items.push(value),
        },
        (PathSegment::InsertIndex(i), Node::Sequence(items)) => {
            let idx = insert_position(items.len(), *i);
            items.insert(idx, value);
        }
        (PathSegment::Predicate { key, value: wanted }, Node::Sequence(items)) => {
            match find_match(items, key, wanted) {
                Some(idx) => items[idx] = value,
                None => items.push(value),
            }
        }
        (PathSegment::InsertPredicate { key, value: wanted }, Node::Sequence(items)) => {
            let idx = find_match(items, key, wanted).unwrap_or(items.len());
            items.insert(idx, value);
        }
        (segment, node) => return Err(mismatch(segment, node)),
    }
    Ok(())
}
