//! A dynamically typed JSON value with strict parsing and deterministic
//! serialization.
//!
//! [`Value`] holds exactly one of null, boolean, double, signed integer,
//! unsigned integer, string, array or object. Values own their contents:
//! cloning is deep, moving leaves nothing shared behind.
//!
//! # Architecture
//!
//! - [`value`] - The value type, its accessors and conversions
//! - [`array`] / [`object`] - Container types
//! - [`number`] - Numeric representation and number grammar
//! - [`proxy`] - Lvalue-like handles that read without creating and write with
//!   auto-vivification
//! - [`lexer`] / [`parser`] - RFC 8259 parsing with structural limits
//! - [`limits`] - Parser limits against hostile input
//! - [`writer`] - Compact serialization with sorted object keys
//! - [`escape`] - String escaping and unescaping
//! - [`error`] - Error type with stable numeric codes
//!
//! # Example
//!
//! ```
//! let mut v = json_variant::parse(r#"{"b": 2, "a": [1, 2.5]}"#).unwrap();
//! assert_eq!(v["a"][1], 2.5);
//!
//! v.at("c").at("d").set(true).unwrap();
//! assert_eq!(v.to_string(), r#"{"a":[1,2.5],"b":2,"c":{"d":true}}"#);
//!
//! // Reading a missing path yields null and leaves the value unchanged.
//! assert!(v.at("missing").at(0).is_null());
//! assert_eq!(v.size(), 3);
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod array;
pub mod error;
pub mod escape;
pub mod lexer;
pub mod limits;
pub mod number;
pub mod object;
pub mod parser;
pub mod proxy;
pub mod value;
pub mod writer;

mod serde_impl;

// Re-export commonly used types
pub use array::Array;
pub use error::{Error, Position, Result};
pub use limits::Limits;
pub use number::Number;
pub use object::Object;
pub use parser::{from_reader, from_reader_with_limits, parse, parse_bytes, parse_with_limits};
pub use proxy::{Key, Proxy};
pub use value::{Kind, Value};
pub use writer::{to_string, to_writer, WriteOptions};
