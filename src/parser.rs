//! Recursive descent JSON parser.
//!
//! Accepts strict RFC 8259 JSON: exactly one value with optional surrounding
//! whitespace, no comments, no trailing commas, no single quotes. Structural
//! limits from [`Limits`] are enforced while parsing, so hostile input fails
//! early instead of exhausting memory or stack.
//!
//! When an object repeats a member name, the last occurrence wins.

use std::io::Read;
use std::mem;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;
use crate::object::Object;
use crate::value::Value;

/// JSON parser over a byte buffer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> Result<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
        })
    }

    /// Parse the complete input as a single value.
    pub fn parse(&mut self) -> Result<Value> {
        let value = self.parse_value()?;

        if self.current != Token::Eof {
            return Err(self.error("unexpected trailing content"));
        }

        Ok(value)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Syntax error at the start of the current token.
    fn error(&self, message: &str) -> Error {
        let message = if self.current == Token::Eof {
            "unexpected end of input"
        } else {
            message
        };
        Error::syntax(message, self.lexer.locate(self.lexer.token_start()))
    }

    fn parse_value(&mut self) -> Result<Value> {
        let value = match &mut self.current {
            Token::Null => Value::Null,
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::String(s) => Value::String(mem::take(s)),
            Token::Number(n) => Value::from(*n),
            Token::LeftBrace => return self.parse_object(),
            Token::LeftBracket => return self.parse_array(),
            _ => return Err(self.error("expected value")),
        };
        self.advance()?;
        Ok(value)
    }

    /// Enter an array or object, checking the nesting limit.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(Error::DepthExceeded {
                depth: self.depth,
                limit: self.limits.max_nesting_depth,
                position: self.lexer.locate(self.lexer.token_start()),
            });
        }
        // Consume the opening bracket.
        self.advance()
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;

        let mut obj = Object::new();
        let mut field_count: u64 = 0;

        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Object(obj));
        }

        loop {
            let key = match &mut self.current {
                Token::String(s) => mem::take(s),
                _ => return Err(self.error("expected string key")),
            };
            self.advance()?;

            if self.current != Token::Colon {
                return Err(self.error("expected ':'"));
            }
            self.advance()?;

            let value = self.parse_value()?;
            if obj.insert_or_assign(key, value).is_none() {
                field_count += 1;
                if field_count > self.limits.max_object_fields {
                    return Err(Error::TooManyFields(
                        field_count,
                        self.limits.max_object_fields,
                    ));
                }
            }

            match self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBrace {
                        return Err(self.error("trailing comma"));
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(obj))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;

        let mut arr = Array::new();

        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(Value::Array(arr));
        }

        loop {
            let value = self.parse_value()?;
            arr.push(value)?;

            if arr.len() as u64 > self.limits.max_array_length {
                return Err(Error::ArrayTooLong(
                    arr.len() as u64,
                    self.limits.max_array_length,
                ));
            }

            match self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBracket {
                        return Err(self.error("trailing comma"));
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(arr))
    }
}

/// Parse JSON text with the standard limits.
///
/// ```
/// let v = json_variant::parse(r#"{"a": [1, 2.5, "x"]}"#).unwrap();
/// assert_eq!(v["a"][1], 2.5);
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_bytes_with_limits(input.as_bytes(), Limits::standard())
}

/// Parse JSON text with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> Result<Value> {
    parse_bytes_with_limits(input.as_bytes(), limits)
}

/// Parse UTF-8 encoded JSON bytes with the standard limits.
pub fn parse_bytes(input: &[u8]) -> Result<Value> {
    parse_bytes_with_limits(input, Limits::standard())
}

/// Parse UTF-8 encoded JSON bytes with custom limits.
pub fn parse_bytes_with_limits(input: &[u8], limits: Limits) -> Result<Value> {
    Parser::new(input, limits)?.parse()
}

/// Read a stream to its end and parse it with the standard limits.
pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with_limits(reader, Limits::standard())
}

/// Read a stream to its end and parse it with custom limits.
///
/// At most `limits.max_input_size + 1` bytes are read, so an oversized stream
/// fails with `InputTooLarge` without being buffered in full.
pub fn from_reader_with_limits<R: Read>(reader: R, limits: Limits) -> Result<Value> {
    let mut buf = Vec::new();
    reader
        .take(limits.max_input_size.saturating_add(1))
        .read_to_end(&mut buf)?;
    parse_bytes_with_limits(&buf, limits)
}
