//! Error types for collection operations.

use crate::document::node::Kind;
use thiserror::Error;

/// Errors raised by the checked collection API.
///
/// The unchecked counterparts (`append`, `insert`, `set`, ...) panic with
/// the same message instead of returning it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A value of a different kind than the collection's element kind.
    #[error("can't add type '{found}' to a collection of '{expected}'")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Direct indexing outside the collection.
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: isize, len: usize },

    /// The element kind has no natural order.
    #[error("elements of type '{kind}' have no natural order")]
    Unorderable { kind: Kind },
}

impl CollectionError {
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }
}

/// Result type for checked collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
