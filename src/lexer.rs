//! JSON lexer/tokenizer.
//!
//! Converts raw input bytes into a stream of tokens for the parser. Input is
//! validated as UTF-8 up front, so string contents can be copied out as
//! slices; escape sequences are decoded as they are met.

use crate::error::{Error, Position, Result};
use crate::escape::decode_escape;
use crate::limits::Limits;
use crate::number::{self, Number};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value, already classified
    Number(Number),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    token_start: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    ///
    /// Fails if the input is larger than `limits.max_input_size` or is not
    /// valid UTF-8.
    pub fn new(input: &'a [u8], limits: Limits) -> Result<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(Error::InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        let text = std::str::from_utf8(input).map_err(|e| {
            Error::syntax(
                "invalid UTF-8 in input",
                Position::locate(input, e.valid_up_to()),
            )
        })?;

        Ok(Self {
            text,
            pos: 0,
            token_start: 0,
            limits,
        })
    }

    /// Byte offset just past the last token read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the last token read begins.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Line/column location of a byte offset in this input.
    pub fn locate(&self, offset: usize) -> Position {
        Position::locate(self.text.as_bytes(), offset)
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::syntax(message, self.locate(offset))
    }

    /// Describe the character at `offset` for an error message.
    fn unexpected_at(&self, offset: usize) -> Error {
        match self.text.get(offset..).and_then(|rest| rest.chars().next()) {
            Some(c) => self.error_at(offset, format!("unexpected character '{}'", c.escape_debug())),
            None => self.error_at(offset, "unexpected end of input"),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        let punct = match self.peek() {
            None => return Ok(Token::Eof),
            Some(b'{') => Token::LeftBrace,
            Some(b'}') => Token::RightBrace,
            Some(b'[') => Token::LeftBracket,
            Some(b']') => Token::RightBracket,
            Some(b':') => Token::Colon,
            Some(b',') => Token::Comma,
            Some(b'"') => return self.read_string(),
            Some(b'-' | b'0'..=b'9') => return self.read_number(),
            Some(b't') => return self.read_literal(b"true", Token::True),
            Some(b'f') => return self.read_literal(b"false", Token::False),
            Some(b'n') => return self.read_literal(b"null", Token::Null),
            Some(_) => return Err(self.unexpected_at(self.pos)),
        };
        self.pos += 1;
        Ok(punct)
    }

    /// Read a string token, decoding escape sequences.
    fn read_string(&mut self) -> Result<Token> {
        let bytes = self.bytes();
        // Skip the opening quote.
        self.pos += 1;

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match bytes.get(self.pos) {
                None => return Err(self.error_at(self.token_start, "unterminated string")),
                Some(b'"') => {
                    result.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    result.push_str(&self.text[run_start..self.pos]);
                    let escape_start = self.pos;
                    self.pos += 1;
                    let ch = decode_escape(bytes, &mut self.pos)
                        .map_err(|msg| self.error_at(escape_start, msg))?;
                    result.push(ch);
                    run_start = self.pos;
                }
                Some(&b) if b < 0x20 => {
                    return Err(self.error_at(self.pos, "control character in string"));
                }
                Some(_) => self.pos += 1,
            }

            let decoded = (result.len() + (self.pos - run_start)) as u64;
            if decoded > self.limits.max_string_length {
                return Err(Error::StringTooLong(decoded, self.limits.max_string_length));
            }
        }

        Ok(Token::String(result))
    }

    /// Read a number token.
    fn read_number(&mut self) -> Result<Token> {
        let start = self.pos;
        let scanned = number::scan(&self.bytes()[start..]).map_err(|msg| self.error_at(start, msg))?;
        let literal = &self.text[start..start + scanned.len];
        let value = Number::classify(literal, scanned.integral)
            .ok_or_else(|| self.error_at(start, "number out of range"))?;
        self.pos += scanned.len;
        Ok(Token::Number(value))
    }

    /// Read `true`, `false` or `null`.
    fn read_literal(&mut self, expected: &[u8], token: Token) -> Result<Token> {
        for &b in expected {
            if self.peek() != Some(b) {
                return Err(self.unexpected_at(self.pos));
            }
            self.pos += 1;
        }
        Ok(token)
    }
}
