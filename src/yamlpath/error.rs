//! Error types for path parsing and path-driven writes.

use crate::document::node::Kind;
use thiserror::Error;

/// Errors that can occur while parsing a path or writing through one.
///
/// Reads never produce the structural variants: a path that does not fit
/// the document simply finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("path is empty")]
    Empty,

    /// A `[` without its `]`, or a stray `]`.
    #[error("unbalanced bracket at position {position}")]
    UnbalancedBracket { position: usize },

    /// Two separators in a row, or a leading/trailing separator.
    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },

    /// Bracket content that is neither an index nor `key:value`.
    #[error("invalid predicate '{segment}', expected [key:value]")]
    InvalidPredicate { segment: String },

    /// Text outside brackets that still contains one, e.g. `a[0]` or `[0]x`.
    #[error("invalid key '{segment}', brackets must enclose the whole segment")]
    InvalidKey { segment: String },

    /// Bracket content that looks like an index but is not a usable one.
    #[error("invalid index '{segment}'")]
    InvalidIndex { segment: String },

    /// A write tried to descend through a scalar.
    #[error("cannot descend into a {found} at '{segment}'")]
    NotAContainer { segment: String, found: Kind },

    /// A write applied a segment to the wrong container, e.g. `[0]` to a map.
    #[error("segment '{segment}' does not apply to a {found}")]
    SegmentMismatch { segment: String, found: Kind },
}

impl PathError {
    /// True for errors raised while parsing the path text itself.
    pub fn is_malformed(&self) -> bool {
        !matches!(
            self,
            PathError::NotAContainer { .. } | PathError::SegmentMismatch { .. }
        )
    }
}
