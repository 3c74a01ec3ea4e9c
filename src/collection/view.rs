//! Mutable windows into a collection's storage.

use super::error::{CollectionError, CollectionResult};
use super::{check_kind, sort_nodes, Collection};
use crate::document::node::{Kind, Node};
use crate::index::abs_index;

/// A mutable slice of a [`Collection`].
///
/// A view shares storage with the collection it came from, so writes are
/// visible there. It can reorder and overwrite elements but never change
/// the length. Use [`Collection::copy`] for an independent collection.
#[derive(Debug)]
pub struct View<'a> {
    kind: Option<Kind>,
    items: &'a mut [Node],
}

impl<'a> View<'a> {
    pub(super) fn new(kind: Option<Kind>, items: &'a mut [Node]) -> Self {
        Self { kind, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items[..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn at(&self, i: isize) -> Option<&Node> {
        abs_index(self.items.len(), i).map(|idx| &self.items[idx])
    }

    pub fn try_set(&mut self, i: isize, value: impl Into<Node>) -> CollectionResult<&mut Self> {
        let value = value.into();
        let len = self.items.len();
        let idx = abs_index(len, i).ok_or(CollectionError::OutOfBounds { index: i, len })?;
        check_kind(self.kind, &value)?;
        self.items[idx] = value;
        Ok(self)
    }

    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the value has the wrong kind.
    pub fn set(&mut self, i: isize, value: impl Into<Node>) -> &mut Self {
        match self.try_set(i, value) {
            Ok(view) => view,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn swap(&mut self, i: isize, j: isize) -> &mut Self {
        let len = self.items.len();
        if let (Some(a), Some(b)) = (abs_index(len, i), abs_index(len, j)) {
            self.items.swap(a, b);
        }
        self
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    pub fn sort(&mut self) -> CollectionResult<&mut Self> {
        sort_nodes(self.kind, self.items, false)?;
        Ok(self)
    }

    pub fn sort_reverse(&mut self) -> CollectionResult<&mut Self> {
        sort_nodes(self.kind, self.items, true)?;
        Ok(self)
    }

    /// Copies the viewed elements into a new collection.
    pub fn to_collection(&self) -> Collection {
        Collection {
            kind: self.kind,
            items: self.items.to_vec(),
        }
    }
}
