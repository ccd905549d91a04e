//! Array container.

use std::ops::Index;
use std::slice;
use std::vec;

use crate::error::{Error, Result};
use crate::value::Value;

/// An ordered sequence of exclusively owned values.
///
/// Growth never moves an element to a different index; only [`Array::erase`]
/// shifts the elements after the erased one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    /// Create an empty array.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a value, reporting allocation failure instead of aborting.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.items.try_reserve(1)?;
        self.items.push(value.into());
        Ok(())
    }

    /// Bounds-checked element access.
    pub fn at(&self, index: usize) -> Result<&Value> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Bounds-checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Element access returning `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Mutable element access returning `None` when out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Remove and return the element at `index`, shifting later elements down.
    pub fn erase(&mut self, index: usize) -> Result<Value> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Iterate mutably over the elements in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    /// View the elements as a slice.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl Index<usize> for Array {
    type Output = Value;

    /// Panics when out of range, like slice indexing. Use [`Array::at`] for a
    /// checked lookup.
    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl From<Array> for Vec<Value> {
    fn from(array: Array) -> Self {
        array.items
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
