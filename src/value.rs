//! The JSON value type.
//!
//! [`Value`] is a closed sum type with exactly one active payload, selected
//! by its [`Kind`]. Scalars are stored inline; arrays and objects own their
//! children exclusively, so a value tree never shares nodes and can never
//! contain itself.
//!
//! # Ownership
//!
//! - `clone()` deep-copies the whole subtree.
//! - [`Value::take`] moves the payload out in O(1) and leaves `Null` behind.
//! - [`Value::assign`] copies then swaps, so the target is untouched if the
//!   copy fails.
//!
//! # Access
//!
//! Direct accessors ([`Value::get`], [`Value::get_index`],
//! [`Value::set_member`]) never change the kind of a value. Chained access
//! that creates missing structure goes through [`Value::at`], which returns
//! a [`Proxy`].

use std::fmt;
use std::io;
use std::mem;
use std::ops;
use std::str::FromStr;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::object::Object;
use crate::parser;
use crate::proxy::{Key, Proxy};
use crate::writer::{self, WriteOptions};

/// Shared null returned by non-creating lookups.
pub(crate) static NULL: Value = Value::Null;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// 64-bit float
    Double,
    /// Signed 64-bit integer
    SignedInt,
    /// Unsigned 64-bit integer
    UnsignedInt,
    /// Text
    String,
    /// Ordered sequence of values
    Array,
    /// Named members
    Object,
}

impl Kind {
    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Double => "double",
            Kind::SignedInt => "int64",
            Kind::UnsignedInt => "uint64",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Returns true for the three numeric kinds.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Kind::Double | Kind::SignedInt | Kind::UnsignedInt)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// Number with a fraction or exponent, or an integer too large for 64 bits
    Double(f64),
    /// Integer that fits `i64`
    Int(i64),
    /// Integer above `i64::MAX` that fits `u64`
    UInt(u64),
    /// JSON string
    String(String),
    /// JSON array
    Array(Array),
    /// JSON object
    Object(Object),
}

impl Value {
    /// An empty array value.
    pub const fn array() -> Self {
        Value::Array(Array::new())
    }

    /// An empty object value.
    pub const fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Parse JSON text with the default limits.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// The kind of the active payload.
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Double(_) => Kind::Double,
            Value::Int(_) => Kind::SignedInt,
            Value::UInt(_) => Kind::UnsignedInt,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns the kind name as a string for error messages.
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true for any of the three numeric kinds.
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Returns true if this is a double.
    pub fn is_f64(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns true if this is a signed integer.
    pub fn is_i64(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns true if this is an unsigned integer.
    pub fn is_u64(&self) -> bool {
        matches!(self, Value::UInt(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The numeric payload, if this value is a number.
    pub fn number(&self) -> Option<Number> {
        match *self {
            Value::Double(d) => Some(Number::Double(d)),
            Value::Int(i) => Some(Number::Int(i)),
            Value::UInt(u) => Some(Number::UInt(u)),
            _ => None,
        }
    }

    fn expect_number(&self) -> Result<Number> {
        self.number()
            .ok_or_else(|| Error::type_mismatch("number", self.kind()))
    }

    /// The boolean payload.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }

    /// Any number, converted to a double.
    pub fn as_f64(&self) -> Result<f64> {
        self.expect_number().map(Number::as_f64)
    }

    /// Any number, converted to `i64` (see [`Number::as_i64`]).
    pub fn as_i64(&self) -> Result<i64> {
        self.expect_number().map(Number::as_i64)
    }

    /// Any number, converted to `u64` (see [`Number::as_u64`]).
    pub fn as_u64(&self) -> Result<u64> {
        self.expect_number().map(Number::as_u64)
    }

    /// Any number, truncated to `i32`.
    pub fn as_i32(&self) -> Result<i32> {
        self.as_i64().map(|i| i as i32)
    }

    /// Any number, truncated to `u32`.
    pub fn as_u32(&self) -> Result<u32> {
        self.as_u64().map(|u| u as u32)
    }

    /// Borrow the string payload.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }

    /// Copy the string payload.
    pub fn as_string(&self) -> Result<String> {
        self.as_str().map(str::to_owned)
    }

    /// Borrow the array container.
    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    /// Mutably borrow the array container.
    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    /// Borrow the object container.
    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(Error::type_mismatch("object", other.kind())),
        }
    }

    /// Mutably borrow the object container.
    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(Error::type_mismatch("object", other.kind())),
        }
    }

    /// Element count: 0 for null, 1 for any scalar, the length of a container.
    pub fn size(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Array(a) => a.len(),
            Value::Object(o) => o.len(),
            _ => 1,
        }
    }

    /// True for null, the empty string, and empty containers.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Array element at `index`.
    ///
    /// Fails with `IndexOutOfRange` past the end and `TypeMismatch` on a
    /// non-array.
    pub fn get_index(&self, index: usize) -> Result<&Value> {
        self.as_array()?.at(index)
    }

    /// Mutable array element at `index`. Never appends.
    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut Value> {
        self.as_array_mut()?.at_mut(index)
    }

    /// Object member named `name`, or a shared null if there is none.
    ///
    /// Never inserts. Fails with `TypeMismatch` on a non-object.
    pub fn get(&self, name: &str) -> Result<&Value> {
        Ok(self.as_object()?.find(name).unwrap_or(&NULL))
    }

    /// Mutable object member named `name`; `None` if absent.
    ///
    /// Never inserts. Fails with `TypeMismatch` on a non-object.
    pub fn get_mut(&mut self, name: &str) -> Result<Option<&mut Value>> {
        Ok(self.as_object_mut()?.find_mut(name))
    }

    /// Insert or replace a member of an object.
    ///
    /// Unlike writing through [`Value::at`], this never converts a
    /// non-object: it fails with `TypeMismatch` instead.
    pub fn set_member(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.as_object_mut()?.insert_or_assign(name, value);
        Ok(())
    }

    /// Append to an array. Fails with `TypeMismatch` on a non-array.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.as_array_mut()?.push(value)
    }

    /// A proxy for the location `key` within this value.
    ///
    /// Reads through the proxy never modify `self`; [`Proxy::set`] creates
    /// whatever containers and entries the path needs.
    ///
    /// ```
    /// use json_variant::Value;
    ///
    /// let mut doc = Value::Null;
    /// doc.at("a").at(0).at("b").set(5).unwrap();
    /// assert_eq!(doc.to_string(), r#"{"a":[{"b":5}]}"#);
    /// assert!(doc.at("missing").at("x").is_null());
    /// ```
    pub fn at(&mut self, key: impl Into<Key>) -> Proxy<'_> {
        Proxy::new(self, key.into())
    }

    /// Move the payload out, leaving `Null`.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    /// Exchange payloads with `other`.
    pub fn swap(&mut self, other: &mut Value) {
        mem::swap(self, other);
    }

    /// Replace this value with a deep copy of `source`.
    ///
    /// The copy is built before anything in `self` changes.
    pub fn assign(&mut self, source: &Value) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }

    /// Serialize with explicit options.
    pub fn to_string_with(&self, options: &WriteOptions) -> String {
        writer::to_string_with(self, options)
    }

    /// Stream the serialized text to `out`.
    pub fn write_to<W: io::Write>(&self, out: W) -> Result<()> {
        writer::to_writer(self, out, &WriteOptions::default())
    }

    /// Stream the serialized text to `out` with explicit options.
    pub fn write_to_with<W: io::Write>(&self, out: W, options: &WriteOptions) -> Result<()> {
        writer::to_writer(self, out, options)
    }
}

/// Structural equality.
///
/// Arrays compare by position, objects by name. Integers compare by value
/// across the signed and unsigned kinds; doubles only equal doubles.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.number() == Some(Number::Int(*other))
    }
}

impl PartialEq<u64> for Value {
    fn eq(&self, other: &u64) -> bool {
        self.number() == Some(Number::UInt(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Double(d) if d == other)
    }
}

/// Types usable with `value[...]` read-only indexing.
///
/// This trait is sealed.
pub trait ValueIndex: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Array(a) => a.get(*self),
            _ => None,
        }
    }
}

impl ValueIndex for str {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Object(o) => o.find(self),
            _ => None,
        }
    }
}

impl ValueIndex for String {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(v)
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// Read-only chained indexing: `doc["a"][0]["b"]`.
///
/// A missing key, an out-of-range index, or a value of the wrong shape all
/// yield a shared `Null`, so chains never panic. Use [`Value::at`] to write.
impl<I: ValueIndex> ops::Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        index.index_into(self).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writer::to_fmt(self, f, &WriteOptions::default())
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(u64::from(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(i) => Value::Int(i),
            Number::UInt(u) => Value::UInt(u),
            Number::Double(d) => Value::Double(d),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

/// Deep copy, so `proxy.set(&other)` leaves `other` untouched.
impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().collect())
    }
}

/// Collect values into an array in one pass.
impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut obj = Object::new();
        obj.insert_or_assign("list", Value::from(vec![1i64, 2, 3]));
        obj.insert_or_assign("name", "x");
        Value::Object(obj)
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(1.5).kind(), Kind::Double);
        assert_eq!(Value::from(-1i64).kind(), Kind::SignedInt);
        assert_eq!(Value::from(u64::MAX).kind(), Kind::UnsignedInt);
        assert_eq!(Value::from("s").kind(), Kind::String);
        assert_eq!(Value::array().kind(), Kind::Array);
        assert_eq!(Value::object().kind(), Kind::Object);
    }

    #[test]
    fn test_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::from(false).is_bool());
        assert!(Value::from(1.0).is_numeric());
        assert!(Value::from(1i64).is_numeric());
        assert!(Value::from(1u64).is_numeric());
        assert!(!Value::from("1").is_numeric());
        assert!(Value::from("s").is_string());
        assert!(Value::array().is_array());
        assert!(Value::object().is_object());
    }

    #[test]
    fn test_numeric_cross_conversions() {
        assert_eq!(Value::from(3.75).as_i64().unwrap(), 3);
        assert_eq!(Value::from(7i64).as_f64().unwrap(), 7.0);
        assert_eq!(Value::from(7u64).as_i64().unwrap(), 7);
        assert_eq!(Value::from(-2i64).as_i32().unwrap(), -2);
        assert_eq!(Value::from(5_000_000_000u64).as_u32().unwrap(), 705_032_704);
    }

    #[test]
    fn test_conversions_fail_on_wrong_kind() {
        let err = Value::from("5").as_i64().unwrap_err();
        assert_eq!(err, Error::type_mismatch("number", Kind::String));
        assert!(Value::Null.as_bool().is_err());
        assert!(Value::from(1i64).as_bool().is_err());
        assert!(Value::from(1i64).as_string().is_err());
        assert!(Value::array().as_f64().is_err());
        assert!(Value::object().as_str().is_err());
    }

    #[test]
    fn test_size_is_total() {
        assert_eq!(Value::Null.size(), 0);
        assert_eq!(Value::from(true).size(), 1);
        assert_eq!(Value::from("abc").size(), 1);
        assert_eq!(sample().size(), 2);
        assert_eq!(sample()["list"].size(), 3);
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::array().is_empty());
        assert!(!Value::from(0i64).is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_get_index() {
        let v = sample();
        let list = v.get("list").unwrap();
        assert_eq!(list.get_index(1).unwrap(), &Value::Int(2));
        assert_eq!(
            list.get_index(5).unwrap_err(),
            Error::IndexOutOfRange { index: 5, len: 3 }
        );
        assert_eq!(v.get_index(0).unwrap_err().code(), 200);
    }

    #[test]
    fn test_get_missing_returns_null_without_inserting() {
        let v = sample();
        assert!(v.get("missing").unwrap().is_null());
        assert_eq!(v.size(), 2);
        assert!(Value::array().get("x").is_err());
    }

    #[test]
    fn test_set_member_requires_object() {
        let mut v = Value::object();
        v.set_member("a", 1i64).unwrap();
        v.set_member("a", 2i64).unwrap();
        assert_eq!(v["a"], 2i64);

        let mut n = Value::Null;
        assert_eq!(n.set_member("a", 1i64).unwrap_err().code(), 200);
        assert!(n.is_null());
    }

    #[test]
    fn test_push_requires_array() {
        let mut v = Value::array();
        v.push("a").unwrap();
        assert_eq!(v.size(), 1);
        assert!(Value::from(1i64).push(1i64).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let a = sample();
        let mut b = a.clone();
        b.as_object_mut()
            .unwrap()
            .find_mut("list")
            .unwrap()
            .push(4i64)
            .unwrap();
        assert_eq!(a["list"].size(), 3);
        assert_eq!(b["list"].size(), 4);
    }

    #[test]
    fn test_take_leaves_null() {
        let mut a = sample();
        let expected = a.clone();
        let b = a.take();
        assert!(a.is_null());
        assert_eq!(b, expected);
    }

    #[test]
    fn test_swap_and_assign() {
        let mut a = Value::from(1i64);
        let mut b = Value::from("b");
        a.swap(&mut b);
        assert_eq!(a, "b");
        assert_eq!(b, 1i64);

        let source = sample();
        a.assign(&source);
        assert_eq!(a, source);
    }

    #[test]
    fn test_integer_equality_across_kinds() {
        assert_eq!(Value::Int(5), Value::UInt(5));
        assert_ne!(Value::Int(5), Value::Double(5.0));
        assert_eq!(Value::Double(0.5), 0.5);
    }

    #[test]
    fn test_read_only_indexing() {
        let v = sample();
        assert_eq!(v["list"][2], 3i64);
        assert_eq!(v["name"], "x");
        assert!(v["missing"]["deeper"][7].is_null());
        assert!(v["name"][0].is_null());
    }

    #[test]
    fn test_from_iterator_builds_array() {
        let v: Value = (1..=3i64).collect();
        assert!(v.is_array());
        assert_eq!(v.size(), 3);
    }

    #[test]
    fn test_from_option() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some("x")), "x");
    }

    #[test]
    fn test_get_mut_never_inserts() {
        let mut v = sample();
        *v.get_mut("name").unwrap().unwrap() = Value::Bool(false);
        assert_eq!(v["name"], false);
        assert!(v.get_mut("missing").unwrap().is_none());
        assert_eq!(v.size(), 2);
        assert_eq!(Value::Null.get_mut("x").unwrap_err().code(), 200);
    }

    #[test]
    fn test_set_from_reference_copies() {
        let source = sample();
        let mut target = Value::Null;
        target.at("copy").set(&source).unwrap();
        target.at("copy").at("name").set("changed").unwrap();
        assert_eq!(source["name"], "x");
        assert_eq!(target["copy"]["list"], source["list"]);
    }
}
