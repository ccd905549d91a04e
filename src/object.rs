//! Object container.
//!
//! Members are kept sorted by name, which gives logarithmic lookup, a
//! deterministic iteration order, and therefore reproducible serialization.
//! Insertion order is not preserved.

use std::borrow::Borrow;
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::value::Value;

/// A collection of uniquely named, exclusively owned values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    members: BTreeMap<String, Value>,
}

impl Object {
    /// Create an empty object.
    pub const fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the object has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member by name.
    pub fn find<Q>(&self, name: &Q) -> Option<&Value>
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.members.get(name)
    }

    /// Look up a member by name for mutation.
    pub fn find_mut<Q>(&mut self, name: &Q) -> Option<&mut Value>
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.members.get_mut(name)
    }

    /// Returns true if a member named `name` exists.
    pub fn contains_key<Q>(&self, name: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.members.contains_key(name)
    }

    /// Insert a member, replacing and returning any previous value.
    pub fn insert_or_assign(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.members.insert(name.into(), value.into())
    }

    /// Return the member named `name`, inserting `Null` first if absent.
    pub fn entry_or_null(&mut self, name: impl Into<String>) -> &mut Value {
        self.members.entry(name.into()).or_default()
    }

    /// Remove and return the member named `name`.
    pub fn erase<Q>(&mut self, name: &Q) -> Option<Value>
    where
        String: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.members.remove(name)
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Iterate over `(name, value)` pairs sorted by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.members.iter()
    }

    /// Iterate mutably over `(name, value)` pairs sorted by name.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, Value> {
        self.members.iter_mut()
    }

    /// Iterate over member names in sorted order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.members.keys()
    }
}

impl From<BTreeMap<String, Value>> for Object {
    fn from(members: BTreeMap<String, Value>) -> Self {
        Self { members }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    /// Later pairs replace earlier pairs with the same name.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            members: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
