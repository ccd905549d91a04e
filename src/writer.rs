//! JSON serialization.
//!
//! Renders a [`Value`] as compact JSON text: no whitespace, object members in
//! sorted key order, integers written exactly, doubles in their shortest
//! round-trip form. The same value always produces the same text, so output
//! can be compared byte for byte.
//!
//! Output goes to any [`fmt::Write`] sink ([`to_fmt`]), an [`io::Write`]
//! stream ([`to_writer`]), or a new `String` ([`to_string`]).

use std::fmt;
use std::io;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::escape::write_escaped;
use crate::number::Number;
use crate::object::Object;
use crate::value::Value;

/// Serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Write every character above U+007F as a `\uXXXX` escape.
    pub escape_non_ascii: bool,
}

impl WriteOptions {
    /// Default options: non-ASCII text passes through.
    pub const fn new() -> Self {
        Self {
            escape_non_ascii: false,
        }
    }

    /// Set whether non-ASCII characters are escaped.
    pub const fn escape_non_ascii(mut self, yes: bool) -> Self {
        self.escape_non_ascii = yes;
        self
    }
}

/// Serialize a value with default options.
pub fn to_string(value: &Value) -> String {
    to_string_with(value, &WriteOptions::default())
}

/// Serialize a value with explicit options.
pub fn to_string_with(value: &Value, options: &WriteOptions) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = to_fmt(value, &mut output, options);
    output
}

/// Serialize a value into a formatting sink.
pub fn to_fmt<W: fmt::Write>(value: &Value, out: &mut W, options: &WriteOptions) -> fmt::Result {
    Serializer { out, options }.write_value(value)
}

/// Serialize a value into a byte stream. No trailing newline is written.
pub fn to_writer<W: io::Write>(value: &Value, writer: W, options: &WriteOptions) -> Result<()> {
    let mut adapter = IoAdapter {
        inner: writer,
        error: None,
    };
    match to_fmt(value, &mut adapter, options) {
        Ok(()) => adapter.inner.flush().map_err(Error::from),
        Err(fmt::Error) => Err(adapter.error.take().map_or_else(
            || io::Error::new(io::ErrorKind::Other, "formatter error").into(),
            Error::from,
        )),
    }
}

/// Check whether `input` is exactly the serialized form of `value`.
pub fn is_canonical(input: &str, value: &Value) -> bool {
    to_string(value) == input
}

/// Recursive writer state.
struct Serializer<'o, W> {
    out: &'o mut W,
    options: &'o WriteOptions,
}

impl<W: fmt::Write> Serializer<'_, W> {
    fn write_value(&mut self, value: &Value) -> fmt::Result {
        match value {
            Value::Null => self.out.write_str("null"),
            Value::Bool(true) => self.out.write_str("true"),
            Value::Bool(false) => self.out.write_str("false"),
            Value::Double(d) => Number::Double(*d).write(self.out),
            Value::Int(i) => Number::Int(*i).write(self.out),
            Value::UInt(u) => Number::UInt(*u).write(self.out),
            Value::String(s) => self.write_string(s),
            Value::Array(arr) => self.write_array(arr),
            Value::Object(obj) => self.write_object(obj),
        }
    }

    /// Write a quoted, escaped string.
    fn write_string(&mut self, s: &str) -> fmt::Result {
        self.out.write_char('"')?;
        write_escaped(self.out, s, self.options.escape_non_ascii)?;
        self.out.write_char('"')
    }

    fn write_array(&mut self, arr: &Array) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, value) in arr.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.write_value(value)?;
        }
        self.out.write_char(']')
    }

    /// Members come out in the object's sorted key order.
    fn write_object(&mut self, obj: &Object) -> fmt::Result {
        self.out.write_char('{')?;
        for (i, (name, value)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.write_string(name)?;
            self.out.write_char(':')?;
            self.write_value(value)?;
        }
        self.out.write_char('}')
    }
}

/// Bridges `fmt::Write` onto an `io::Write`, keeping the first I/O error.
struct IoAdapter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_primitives() {
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::Bool(true)), "true");
        assert_eq!(to_string(&Value::Bool(false)), "false");
        assert_eq!(to_string(&Value::Int(-42)), "-42");
        assert_eq!(to_string(&Value::UInt(u64::MAX)), "18446744073709551615");
        assert_eq!(to_string(&Value::Double(2.5)), "2.5");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(to_string(&Value::from("a\nb")), "\"a\\nb\"");
        assert_eq!(to_string(&Value::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(to_string(&Value::from("a\\b")), "\"a\\\\b\"");
        assert_eq!(to_string(&Value::from("\u{1}")), "\"\\u0001\"");
    }

    #[test]
    fn test_serialize_non_ascii_option() {
        let v = Value::from("café");
        assert_eq!(to_string(&v), "\"café\"");
        let options = WriteOptions::new().escape_non_ascii(true);
        assert_eq!(to_string_with(&v, &options), "\"caf\\u00e9\"");
    }

    #[test]
    fn test_serialize_array() {
        let arr: Value = vec![1i64, 2, 3].into();
        assert_eq!(to_string(&arr), "[1,2,3]");
        assert_eq!(to_string(&Value::array()), "[]");
    }

    #[test]
    fn test_serialize_object_sorted() {
        let obj: Object = [("b", 2i64), ("a", 1)].into_iter().collect();
        assert_eq!(to_string(&Value::Object(obj)), r#"{"a":1,"b":2}"#);
        assert_eq!(to_string(&Value::object()), "{}");
    }

    #[test]
    fn test_serialize_nested() {
        let mut inner = Object::new();
        inner.insert_or_assign("x", 1i64);
        let mut outer = Object::new();
        outer.insert_or_assign("arr", Value::from(vec![1i64]));
        outer.insert_or_assign("obj", inner);
        assert_eq!(
            to_string(&Value::Object(outer)),
            r#"{"arr":[1],"obj":{"x":1}}"#
        );
    }

    #[test]
    fn test_non_finite_double_written_as_null() {
        let v: Value = vec![Value::Double(f64::NAN), Value::Double(f64::INFINITY)].into();
        assert_eq!(to_string(&v), "[null,null]");
    }

    #[test]
    fn test_to_writer() {
        let v: Value = vec![Value::from("é"), Value::Null].into();
        let mut buf = Vec::new();
        to_writer(&v, &mut buf, &WriteOptions::default()).unwrap();
        assert_eq!(buf, "[\"é\",null]".as_bytes());
    }

    #[test]
    fn test_to_writer_reports_io_error() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = to_writer(&Value::Null, Broken, &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io { kind: io::ErrorKind::BrokenPipe, .. }));
    }

    #[test]
    fn test_is_canonical() {
        let obj: Object = [("a", 1i64)].into_iter().collect();
        let value = Value::Object(obj);
        assert!(is_canonical("{\"a\":1}", &value));
        assert!(!is_canonical("{\"a\": 1}", &value));
        assert!(!is_canonical("{ \"a\":1}", &value));
    }
}
