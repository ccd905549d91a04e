//! Proxies: lvalue-like handles into a value tree.
//!
//! A [`Proxy`] names a location, not a value: a mutably borrowed parent plus
//! a path of keys that may not exist yet. It has two halves:
//!
//! - **Read** ([`Proxy::get`], [`Proxy::is_null`], `as_*`) resolves the path
//!   without touching the parent. A missing key, an out-of-range index, or a
//!   `null` along the way resolves to `null`.
//! - **Write** ([`Proxy::set`]) materializes the path: parents that are not
//!   containers of the needed shape become empty ones, missing keys are
//!   inserted, and an index equal to the array length appends.
//!
//! The borrow checker enforces the "use once, then discard" contract: a proxy
//! holds `&mut` to its parent, so nothing else can reshape the tree while it
//! is alive, and `set` consumes it.
//!
//! ```
//! use json_variant::Value;
//!
//! let mut v = Value::Null;
//! v.at("a").at("b").set(5).unwrap();
//! assert!(v.is_object());
//! assert!(v.at("a").get().unwrap().is_object());
//! assert_eq!(v.at("a").at("b").as_i64().unwrap(), 5);
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::value::{Value, NULL};

/// One step of a proxy path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Position within an array
    Index(usize),
    /// Member name within an object
    Name(String),
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "[{i}]"),
            Key::Name(name) => write!(f, "[\"{}\"]", crate::escape::escape(name)),
        }
    }
}

/// A location within a parent [`Value`], created by [`Value::at`].
pub struct Proxy<'a> {
    parent: &'a mut Value,
    path: Vec<Key>,
}

impl<'a> Proxy<'a> {
    pub(crate) fn new(parent: &'a mut Value, key: Key) -> Self {
        Self {
            parent,
            path: vec![key],
        }
    }

    /// Extend the path by one key.
    pub fn at(mut self, key: impl Into<Key>) -> Self {
        self.path.push(key.into());
        self
    }

    /// Keys from the parent to this location.
    pub fn path(&self) -> &[Key] {
        &self.path
    }

    /// Resolve the location without modifying the parent.
    ///
    /// Missing entries and `null` intermediates resolve to `null`. A scalar
    /// intermediate, or a container of the wrong shape for its key, fails
    /// with `TypeMismatch`.
    pub fn get(&self) -> Result<&Value> {
        let mut current: &Value = self.parent;
        for key in &self.path {
            current = match (key, current) {
                (_, Value::Null) => return Ok(&NULL),
                (Key::Name(name), Value::Object(obj)) => obj.find(name.as_str()).unwrap_or(&NULL),
                (Key::Index(index), Value::Array(arr)) => arr.get(*index).unwrap_or(&NULL),
                (Key::Name(_), other) => {
                    return Err(Error::type_mismatch("object", other.kind()))
                }
                (Key::Index(_), other) => {
                    return Err(Error::type_mismatch("array", other.kind()))
                }
            };
        }
        Ok(current)
    }

    /// True if the location resolves to `null`, including when it is absent.
    pub fn is_null(&self) -> bool {
        matches!(self.get(), Ok(Value::Null))
    }

    /// True if the location resolves to an existing, non-null value.
    pub fn exists(&self) -> bool {
        matches!(self.get(), Ok(v) if !v.is_null())
    }

    /// Size of the resolved value (see [`Value::size`]).
    pub fn size(&self) -> Result<usize> {
        self.get().map(Value::size)
    }

    /// Emptiness of the resolved value (see [`Value::is_empty`]).
    pub fn is_empty(&self) -> Result<bool> {
        self.get().map(Value::is_empty)
    }

    /// Read the resolved value as a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.get()?.as_bool()
    }

    /// Read the resolved value as a double.
    pub fn as_f64(&self) -> Result<f64> {
        self.get()?.as_f64()
    }

    /// Read the resolved value as `i64`.
    pub fn as_i64(&self) -> Result<i64> {
        self.get()?.as_i64()
    }

    /// Read the resolved value as `u64`.
    pub fn as_u64(&self) -> Result<u64> {
        self.get()?.as_u64()
    }

    /// Read the resolved value as `i32`.
    pub fn as_i32(&self) -> Result<i32> {
        self.get()?.as_i32()
    }

    /// Read the resolved value as `u32`.
    pub fn as_u32(&self) -> Result<u32> {
        self.get()?.as_u32()
    }

    /// Read the resolved value as a string.
    pub fn as_string(&self) -> Result<String> {
        self.get()?.as_string()
    }

    /// Deep copy of the resolved value.
    pub fn to_value(&self) -> Result<Value> {
        self.get().cloned()
    }

    /// Serialized text of the resolved value.
    pub fn to_json_string(&self) -> Result<String> {
        self.get().map(Value::to_string)
    }

    /// Store `value` at this location, creating the path as needed.
    ///
    /// Returns the stored value. Fails with `IndexOutOfRange` if an index
    /// along the path is greater than the length of its array (only
    /// `index == len` appends); the parent is left unmodified in that case.
    pub fn set(self, value: impl Into<Value>) -> Result<&'a mut Value> {
        self.check_writable()?;

        let mut current: &'a mut Value = self.parent;
        for key in self.path {
            current = match key {
                Key::Name(name) => {
                    if !current.is_object() {
                        *current = Value::object();
                    }
                    current.as_object_mut()?.entry_or_null(name)
                }
                Key::Index(index) => {
                    if !current.is_array() {
                        *current = Value::array();
                    }
                    let arr = current.as_array_mut()?;
                    if index == arr.len() {
                        arr.push(Value::Null)?;
                    }
                    arr.at_mut(index)?
                }
            };
        }
        *current = value.into();
        Ok(current)
    }

    /// Walk the path as `set` would, failing before any mutation.
    fn check_writable(&self) -> Result<()> {
        // `None` stands for a slot that `set` would create fresh.
        let mut current: Option<&Value> = Some(self.parent);
        for key in &self.path {
            current = match (key, current) {
                (Key::Name(name), Some(Value::Object(obj))) => obj.find(name.as_str()),
                (Key::Name(_), _) => None,
                (Key::Index(index), Some(Value::Array(arr))) => {
                    if *index > arr.len() {
                        return Err(Error::IndexOutOfRange {
                            index: *index,
                            len: arr.len(),
                        });
                    }
                    arr.get(*index)
                }
                (Key::Index(index), _) => {
                    if *index > 0 {
                        return Err(Error::IndexOutOfRange {
                            index: *index,
                            len: 0,
                        });
                    }
                    None
                }
            };
        }
        Ok(())
    }
}

impl fmt::Debug for Proxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("path", &self.path)
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_auto_vivification_from_null() {
        let mut v = Value::Null;
        v.at("a").at("b").set(Value::Int(5)).unwrap();
        assert!(v.is_object());
        assert!(v.at("a").get().unwrap().is_object());
        assert_eq!(v.at("a").at("b").as_i64().unwrap(), 5);
    }

    #[test]
    fn test_set_returns_stored_value() {
        let mut v = Value::Null;
        let stored = v.at("k").set("text").unwrap();
        assert_eq!(stored.as_str().unwrap(), "text");
        *stored = Value::Bool(true);
        assert_eq!(v["k"], true);
    }

    #[test]
    fn test_missing_read_is_null_and_does_not_mutate() {
        let mut v = parse(r#"{"a": 1}"#).unwrap();
        assert!(v.at("missing").at("x").is_null());
        assert!(v.at("missing").at(3).is_null());
        assert_eq!(v.size(), 1);
        assert_eq!(v.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_read_as_on_missing_is_type_mismatch() {
        let mut v = Value::object();
        assert_eq!(v.at("missing").as_i64().unwrap_err().code(), 200);
    }

    #[test]
    fn test_read_through_scalar_is_type_mismatch() {
        let mut v = parse(r#"{"a": 1}"#).unwrap();
        assert_eq!(v.at("a").at("b").get().unwrap_err().code(), 200);
        assert!(!v.at("a").at("b").is_null());
        assert_eq!(v.at("a").at(0).get().unwrap_err().code(), 200);
    }

    #[test]
    fn test_append_at_len() {
        let mut v = parse("[1, 2]").unwrap();
        v.at(2).set(3i64).unwrap();
        assert_eq!(v.to_string(), "[1,2,3]");
    }

    #[test]
    fn test_replace_existing_element() {
        let mut v = parse("[1, 2]").unwrap();
        v.at(0).set("first").unwrap();
        assert_eq!(v.to_string(), r#"["first",2]"#);
    }

    #[test]
    fn test_index_past_len_fails_without_mutation() {
        let mut v = parse(r#"{"list": [1]}"#).unwrap();
        let before = v.clone();
        let err = v.at("list").at(5).set(0i64).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(v, before);
    }

    #[test]
    fn test_deep_failure_leaves_parent_untouched() {
        let mut v = Value::Null;
        let err = v.at("a").at("b").at(1).set(true).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 1, len: 0 });
        assert!(v.is_null());
    }

    #[test]
    fn test_vivify_array_path() {
        let mut v = Value::Null;
        v.at("rows").at(0).at("id").set(7i64).unwrap();
        v.at("rows").at(1).at("id").set(8i64).unwrap();
        assert_eq!(v.to_string(), r#"{"rows":[{"id":7},{"id":8}]}"#);
    }

    #[test]
    fn test_write_converts_wrong_shape() {
        let mut v = parse(r#"{"a": 1}"#).unwrap();
        v.at("a").at("b").set(2i64).unwrap();
        assert_eq!(v.to_string(), r#"{"a":{"b":2}}"#);

        let mut s = Value::from("scalar");
        s.at(0).set(1i64).unwrap();
        assert_eq!(s.to_string(), "[1]");
    }

    #[test]
    fn test_proxy_helpers() {
        let mut v = parse(r#"{"a": [1, 2, 3], "s": "x"}"#).unwrap();
        assert_eq!(v.at("a").size().unwrap(), 3);
        assert!(v.at("a").exists());
        assert!(!v.at("zzz").exists());
        assert_eq!(v.at("s").as_string().unwrap(), "x");
        assert_eq!(v.at("a").to_json_string().unwrap(), "[1,2,3]");
        assert_eq!(v.at("a").at(1).to_value().unwrap(), Value::Int(2));
        assert_eq!(v.at("a").at(1).path(), &[Key::from("a"), Key::Index(1)]);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Index(3).to_string(), "[3]");
        assert_eq!(Key::from("a\"b").to_string(), r#"["a\"b"]"#);
    }
}
