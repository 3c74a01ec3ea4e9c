//! Kind-checked ordered collections.
//!
//! A `Collection` holds `Node` elements of a single runtime kind. The kind is
//! taken from the first value added and every later value must match it, so
//! a collection of integers never silently turns into a collection of
//! strings. An empty collection is valid and untyped until its first append.
//!
//! Indices follow the conventions in [`crate::index`]: negative values count
//! from the end and ranges are inclusive, so `slice(0, -1)` is everything.
//!
//! There are two call surfaces. The `try_*` methods return a
//! [`CollectionError`]; the plain methods panic with the same message and
//! are meant for callers that know their values are well-typed.
//!
//! # Example
//!
//! ```
//! use yamlnub::collection::Collection;
//!
//! let mut numbers = Collection::from_values([3, 1, 2, 1, 3]);
//! numbers.unique();
//! assert_eq!(numbers.to_string(), "[3 1 2]");
//!
//! numbers.sort().unwrap();
//! assert_eq!(numbers.slice(-2, -1), Collection::from_values([2, 3]).as_slice());
//!
//! assert!(numbers.try_append("four").is_err());
//! ```

pub mod error;
pub mod view;

pub use error::{CollectionError, CollectionResult};
pub use view::View;

use crate::document::node::{Kind, Node};
use crate::index::{abs_index, abs_range, insert_offset};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

/// An ordered, kind-checked sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    kind: Option<Kind>,
    items: Vec<Node>,
}

/// Checks `value` against an established element kind.
pub(crate) fn check_kind(expected: Option<Kind>, value: &Node) -> CollectionResult<()> {
    match expected {
        Some(kind) if !kind.admits(value.kind()) => Err(CollectionError::TypeMismatch {
            expected: kind,
            found: value.kind(),
        }),
        _ => Ok(()),
    }
}

/// Validates a batch of values, establishing `kind` from the first value when
/// it is still unset. A leading null makes a collection of nulls. Nothing is
/// returned unless every value passes.
fn admit<I>(kind: &mut Option<Kind>, values: I) -> CollectionResult<Vec<Node>>
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    let mut established = *kind;
    let mut accepted = Vec::new();
    for value in values {
        let value = value.into();
        match established {
            None => established = Some(value.kind()),
            Some(_) => check_kind(established, &value)?,
        }
        accepted.push(value);
    }
    *kind = established;
    Ok(accepted)
}

fn natural_cmp(a: &Node, b: &Node) -> Ordering {
    match (a, b) {
        (Node::Bool(x), Node::Bool(y)) => x.cmp(y),
        (Node::Int(x), Node::Int(y)) => x.cmp(y),
        (Node::Float(x), Node::Float(y)) => x.total_cmp(y),
        (Node::Int(x), Node::Float(y)) => (*x as f64).total_cmp(y),
        (Node::Float(x), Node::Int(y)) => x.total_cmp(&(*y as f64)),
        (Node::String(x), Node::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Sorts nodes of one kind by their natural order. The sort is stable.
pub(crate) fn sort_nodes(
    kind: Option<Kind>,
    items: &mut [Node],
    reverse: bool,
) -> CollectionResult<()> {
    if let Some(kind @ (Kind::Null | Kind::Map | Kind::Seq)) = kind {
        return Err(CollectionError::Unorderable { kind });
    }
    if reverse {
        items.sort_by(|a, b| natural_cmp(b, a));
    } else {
        items.sort_by(natural_cmp);
    }
    Ok(())
}

fn or_panic<T>(result: CollectionResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

impl Collection {
    /// Creates an empty, untyped collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection that only accepts `kind`.
    pub fn with_kind(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            items: Vec::new(),
        }
    }

    /// Builds a collection from values, failing if their kinds differ.
    pub fn try_from_values<I>(values: I) -> CollectionResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let mut collection = Self::new();
        collection.try_extend(values)?;
        Ok(collection)
    }

    /// Builds a collection from values.
    ///
    /// # Panics
    ///
    /// Panics if the values are not all of one kind.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        or_panic(Self::try_from_values(values))
    }

    /// Builds a collection from a tree node.
    ///
    /// A sequence contributes its elements, null gives an empty collection
    /// and any other node becomes a one-element collection.
    pub fn from_node(node: Node) -> CollectionResult<Self> {
        match node {
            Node::Sequence(items) => Self::try_from_values(items),
            Node::Null => Ok(Self::new()),
            other => Self::try_from_values([other]),
        }
    }

    /// The element kind, or `None` while the collection is untyped.
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when there is exactly one element.
    pub fn is_single(&self) -> bool {
        self.items.len() == 1
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Appends a value, establishing the element kind if untyped.
    pub fn try_append(&mut self, value: impl Into<Node>) -> CollectionResult<&mut Self> {
        self.try_extend([value.into()])
    }

    /// Appends a value.
    ///
    /// # Panics
    ///
    /// Panics if the value's kind differs from the element kind.
    pub fn append(&mut self, value: impl Into<Node>) -> &mut Self {
        or_panic(self.try_extend([value.into()]))
    }

    /// Appends every value, or none of them if any has the wrong kind.
    pub fn try_extend<I>(&mut self, values: I) -> CollectionResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let accepted = admit(&mut self.kind, values)?;
        self.items.extend(accepted);
        Ok(self)
    }

    /// Appends every value.
    ///
    /// # Panics
    ///
    /// Panics if any value's kind differs from the element kind.
    pub fn extend<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        or_panic(self.try_extend(values))
    }

    /// Returns the element at `i`, or `None` when out of bounds.
    pub fn at(&self, i: isize) -> Option<&Node> {
        abs_index(self.items.len(), i).map(|i| &self.items[i])
    }

    pub fn first(&self) -> Option<&Node> {
        self.at(0)
    }

    pub fn last(&self) -> Option<&Node> {
        self.at(-1)
    }

    /// Replaces the element at `i`.
    pub fn try_set(&mut self, i: isize, value: impl Into<Node>) -> CollectionResult<&mut Self> {
        let value = value.into();
        let len = self.items.len();
        let idx = abs_index(len, i).ok_or(CollectionError::OutOfBounds { index: i, len })?;
        check_kind(self.kind, &value)?;
        self.items[idx] = value;
        Ok(self)
    }

    /// Replaces the element at `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the value has the wrong kind.
    pub fn set(&mut self, i: isize, value: impl Into<Node>) -> &mut Self {
        or_panic(self.try_set(i, value))
    }

    /// Inserts `values` as one block before the element at `i`.
    ///
    /// A negative `i` inserts after the resolved element, so `-1` appends.
    /// Inserting into an empty collection appends. An index that does not
    /// resolve to an element leaves the collection unchanged, though the
    /// values are still kind-checked.
    pub fn try_insert<I>(&mut self, i: isize, values: I) -> CollectionResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        if self.items.is_empty() {
            return self.try_extend(values);
        }
        let mut kind = self.kind;
        let accepted = admit(&mut kind, values)?;
        if let Some(offset) = insert_offset(self.items.len(), i) {
            self.kind = kind;
            self.items.splice(offset..offset, accepted);
        }
        Ok(self)
    }

    /// Inserts `values` as one block before the element at `i`.
    ///
    /// # Panics
    ///
    /// Panics if any value's kind differs from the element kind.
    pub fn insert<I>(&mut self, i: isize, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        or_panic(self.try_insert(i, values))
    }

    /// Inserts a value at the front.
    pub fn try_prepend(&mut self, value: impl Into<Node>) -> CollectionResult<&mut Self> {
        self.try_insert(0, [value.into()])
    }

    /// Inserts a value at the front.
    ///
    /// # Panics
    ///
    /// Panics if the value's kind differs from the element kind.
    pub fn prepend(&mut self, value: impl Into<Node>) -> &mut Self {
        or_panic(self.try_insert(0, [value.into()]))
    }

    /// Returns a new collection holding this one followed by `other`.
    pub fn concat(&self, other: &Collection) -> CollectionResult<Collection> {
        let mut joined = self.clone();
        joined.try_extend(other.items.iter().cloned())?;
        Ok(joined)
    }

    /// Removes the inclusive range `i..=j`.
    pub fn drop_range(&mut self, i: isize, j: isize) -> &mut Self {
        if let Some((start, end)) = abs_range(self.items.len(), i, j) {
            self.items.drain(start..end);
        }
        self
    }

    pub fn drop_at(&mut self, i: isize) -> &mut Self {
        self.drop_range(i, i)
    }

    pub fn drop_first(&mut self) -> &mut Self {
        self.drop_range(0, 0)
    }

    pub fn drop_last(&mut self) -> &mut Self {
        self.drop_range(-1, -1)
    }

    pub fn drop_first_n(&mut self, n: usize) -> &mut Self {
        let n = n.min(self.items.len());
        self.items.drain(..n);
        self
    }

    pub fn drop_last_n(&mut self, n: usize) -> &mut Self {
        let keep = self.items.len().saturating_sub(n);
        self.items.truncate(keep);
        self
    }

    /// Removes every element matching `pred`.
    pub fn drop_where(&mut self, mut pred: impl FnMut(&Node) -> bool) -> &mut Self {
        self.items.retain(|item| !pred(item));
        self
    }

    /// Removes every element. The element kind is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    /// Borrows the inclusive range `i..=j`. Empty when nothing is addressed.
    pub fn slice(&self, i: isize, j: isize) -> &[Node] {
        match abs_range(self.items.len(), i, j) {
            Some((start, end)) => &self.items[start..end],
            None => &[],
        }
    }

    /// Mutably borrows the inclusive range `i..=j` as a [`View`].
    ///
    /// Writes through the view land in this collection's storage.
    pub fn slice_mut(&mut self, i: isize, j: isize) -> View<'_> {
        let (start, end) = abs_range(self.items.len(), i, j).unwrap_or((0, 0));
        View::new(self.kind, &mut self.items[start..end])
    }

    /// Copies the inclusive range `i..=j` into an independent collection.
    pub fn copy(&self, i: isize, j: isize) -> Collection {
        Collection {
            kind: self.kind,
            items: self.slice(i, j).to_vec(),
        }
    }

    /// Borrows up to the first `n` elements.
    pub fn first_n(&self, n: usize) -> &[Node] {
        &self.items[..n.min(self.items.len())]
    }

    /// Borrows up to the last `n` elements.
    pub fn last_n(&self, n: usize) -> &[Node] {
        &self.items[self.items.len().saturating_sub(n)..]
    }

    /// Removes the inclusive range `i..=j` and returns it.
    pub fn take(&mut self, i: isize, j: isize) -> Collection {
        let taken = self.copy(i, j);
        self.drop_range(i, j);
        taken
    }

    /// Removes and returns the element at `i`.
    pub fn take_at(&mut self, i: isize) -> Option<Node> {
        abs_index(self.items.len(), i).map(|idx| self.items.remove(idx))
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.take_at(-1)
    }

    pub fn shift(&mut self) -> Option<Node> {
        self.take_at(0)
    }

    /// Sorts in place by the element kind's natural order.
    pub fn sort(&mut self) -> CollectionResult<&mut Self> {
        sort_nodes(self.kind, &mut self.items, false)?;
        Ok(self)
    }

    /// Sorts in place, largest first.
    pub fn sort_reverse(&mut self) -> CollectionResult<&mut Self> {
        sort_nodes(self.kind, &mut self.items, true)?;
        Ok(self)
    }

    /// Returns a sorted copy.
    pub fn sorted(&self) -> CollectionResult<Collection> {
        let mut copy = self.clone();
        copy.sort()?;
        Ok(copy)
    }

    /// Returns a copy sorted largest first.
    pub fn sorted_reverse(&self) -> CollectionResult<Collection> {
        let mut copy = self.clone();
        copy.sort_reverse()?;
        Ok(copy)
    }

    /// Removes duplicates, keeping the first occurrence of each element.
    pub fn unique(&mut self) -> &mut Self {
        let mut seen: Vec<Node> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if !seen.contains(&item) {
                seen.push(item);
            }
        }
        self.items = seen;
        self
    }

    /// Swaps two elements. Does nothing if either index is out of bounds.
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

    pub fn contains(&self, value: &Node) -> bool {
        self.items.contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &Node) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: &Node) -> usize {
        self.items.iter().filter(|item| *item == value).count()
    }

    /// Returns a new collection of the elements matching `pred`.
    pub fn select(&self, mut pred: impl FnMut(&Node) -> bool) -> Collection {
        Collection {
            kind: self.kind,
            items: self.items.iter().filter(|item| pred(item)).cloned().collect(),
        }
    }

    /// Renders each element as text and joins them with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Converts back into a sequence node.
    pub fn into_node(self) -> Node {
        Node::Sequence(self.items)
    }
}

/// Direct indexing fails fast: an out of bounds index panics.
impl Index<isize> for Collection {
    type Output = Node;

    fn index(&self, i: isize) -> &Node {
        let len = self.items.len();
        match abs_index(len, i) {
            Some(idx) => &self.items[idx],
            None => panic!("{}", CollectionError::OutOfBounds { index: i, len }),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.join(" "))
    }
}

impl From<Collection> for Node {
    fn from(collection: Collection) -> Self {
        collection.into_node()
    }
}

impl TryFrom<Node> for Collection {
    type Error = CollectionError;

    fn try_from(node: Node) -> CollectionResult<Self> {
        Collection::from_node(node)
    }
}

impl IntoIterator for Collection {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
