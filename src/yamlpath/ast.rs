//! Parsed form of path expressions.

use crate::document::node::Scalar;
use std::fmt;

/// A segment in a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Map entry (`name`)
    Key(String),
    /// Sequence position (`[0]`, `[-1]`)
    Index(isize),
    /// Insert at a sequence position on write (`[[0]]`)
    InsertIndex(isize),
    /// First map element whose `key` entry equals `value` (`[name:foo]`)
    Predicate { key: String, value: Scalar },
    /// Insert before the matching element on write (`[[name:foo]]`)
    InsertPredicate { key: String, value: Scalar },
}

impl PathSegment {
    /// Segments that address into a sequence rather than a map.
    pub fn is_bracketed(&self) -> bool {
        !matches!(self, PathSegment::Key(_))
    }

    /// Returns the insert form of a bracketed segment. Keys and segments
    /// already in insert form are returned unchanged.
    pub fn to_insert_form(&self) -> PathSegment {
        match self {
            PathSegment::Index(i) => PathSegment::InsertIndex(*i),
            PathSegment::Predicate { key, value } => PathSegment::InsertPredicate {
                key: key.clone(),
                value: value.clone(),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::InsertIndex(i) => write!(f, "[[{}]]", i),
            PathSegment::Predicate { key, value } => write!(f, "[{}:{}]", key, value),
            PathSegment::InsertPredicate { key, value } => write!(f, "[[{}:{}]]", key, value),
        }
    }
}

/// A complete path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlPath {
    pub segments: Vec<PathSegment>,
}

impl YamlPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Converts the last segment to its insert form, so that writing through
    /// the path inserts instead of overwriting.
    pub fn into_insert_form(mut self) -> Self {
        if let Some(last) = self.segments.last_mut() {
            *last = last.to_insert_form();
        }
        self
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
