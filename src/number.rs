//! Numeric storage for JSON numbers.
//!
//! A JSON number is held in one of three representations: a signed 64-bit
//! integer, an unsigned 64-bit integer, or a double. Integer literals stay
//! integers whenever they fit, so that large counters survive a parse and
//! serialize cycle exactly instead of passing through floating point.
//!
//! # Classification
//!
//! | Literal                              | Representation |
//! |--------------------------------------|----------------|
//! | no fraction/exponent, fits `i64`     | `Int`          |
//! | no fraction/exponent, fits `u64`     | `UInt`         |
//! | fraction, exponent, or `u64` overflow | `Double`       |

use std::cmp::Ordering;
use std::fmt;

use crate::value::Kind;

/// A JSON number in one of its three storage forms.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer
    Int(i64),
    /// Unsigned 64-bit integer (used when the value exceeds `i64::MAX`)
    UInt(u64),
    /// IEEE-754 double
    Double(f64),
}

/// Result of scanning a number literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scanned {
    /// Length of the literal in bytes.
    pub len: usize,
    /// True if the literal has neither fraction nor exponent.
    pub integral: bool,
}

/// Scan the longest number literal at the start of `input`.
///
/// Follows the JSON grammar exactly: optional minus, no leading zeros, at
/// least one digit after `.` and in the exponent.
pub(crate) fn scan(input: &[u8]) -> Result<Scanned, &'static str> {
    let mut pos = 0;
    let digits_from = |mut pos: usize| {
        while let Some(b'0'..=b'9') = input.get(pos) {
            pos += 1;
        }
        pos
    };

    if input.first() == Some(&b'-') {
        pos += 1;
    }

    match input.get(pos) {
        Some(b'0') => {
            pos += 1;
            if let Some(b'0'..=b'9') = input.get(pos) {
                return Err("leading zeros are not allowed");
            }
        }
        Some(b'1'..=b'9') => pos = digits_from(pos + 1),
        _ => return Err("expected digit"),
    }

    let mut integral = true;

    if input.get(pos) == Some(&b'.') {
        integral = false;
        let end = digits_from(pos + 1);
        if end == pos + 1 {
            return Err("expected digit after decimal point");
        }
        pos = end;
    }

    if let Some(b'e') | Some(b'E') = input.get(pos) {
        integral = false;
        pos += 1;
        if let Some(b'+') | Some(b'-') = input.get(pos) {
            pos += 1;
        }
        let end = digits_from(pos);
        if end == pos {
            return Err("expected digit in exponent");
        }
        pos = end;
    }

    Ok(Scanned { len: pos, integral })
}

impl Number {
    /// Parse a complete JSON number literal.
    ///
    /// Returns `None` if `literal` is not exactly one valid JSON number, or
    /// if its magnitude overflows a double.
    ///
    /// ```
    /// use json_variant::Number;
    ///
    /// assert!(matches!(Number::parse("-7"), Some(Number::Int(-7))));
    /// assert!(matches!(Number::parse("18446744073709551615"), Some(Number::UInt(u64::MAX))));
    /// assert!(matches!(Number::parse("1e2"), Some(Number::Double(_))));
    /// assert!(Number::parse("01").is_none());
    /// ```
    pub fn parse(literal: &str) -> Option<Self> {
        let scanned = scan(literal.as_bytes()).ok()?;
        if scanned.len != literal.len() {
            return None;
        }
        Self::classify(literal, scanned.integral)
    }

    /// Classify an already-scanned literal.
    pub(crate) fn classify(literal: &str, integral: bool) -> Option<Self> {
        if integral {
            if let Ok(i) = literal.parse::<i64>() {
                return Some(Number::Int(i));
            }
            if let Ok(u) = literal.parse::<u64>() {
                return Some(Number::UInt(u));
            }
        }
        let d: f64 = literal.parse().ok()?;
        d.is_finite().then_some(Number::Double(d))
    }

    /// The value kind this number is stored as.
    pub const fn kind(self) -> Kind {
        match self {
            Number::Int(_) => Kind::SignedInt,
            Number::UInt(_) => Kind::UnsignedInt,
            Number::Double(_) => Kind::Double,
        }
    }

    /// Convert to a double. Integers beyond 2^53 round to nearest.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Double(d) => d,
        }
    }

    /// Convert to `i64`.
    ///
    /// Doubles truncate toward zero and saturate (NaN becomes 0); unsigned
    /// values reinterpret their two's complement bits.
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(i) => i,
            Number::UInt(u) => u as i64,
            Number::Double(d) => d as i64,
        }
    }

    /// Convert to `u64`, with the same casting rules as [`Number::as_i64`].
    pub fn as_u64(self) -> u64 {
        match self {
            Number::Int(i) => i as u64,
            Number::UInt(u) => u,
            Number::Double(d) => d as u64,
        }
    }

    /// Returns true if this number is a double that JSON cannot represent.
    pub fn is_non_finite(self) -> bool {
        matches!(self, Number::Double(d) if !d.is_finite())
    }

    /// Write the canonical text of this number.
    ///
    /// Integers are written exactly. Doubles use the shortest text that
    /// reparses to the same bits and always carry a `.` or exponent, so they
    /// reparse as doubles. NaN and infinities have no JSON form and are
    /// written as `null`.
    pub fn write<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        match self {
            Number::Int(i) => out.write_str(itoa::Buffer::new().format(i)),
            Number::UInt(u) => out.write_str(itoa::Buffer::new().format(u)),
            Number::Double(d) if d.is_finite() => write!(out, "{:?}", d),
            Number::Double(_) => out.write_str("null"),
        }
    }

    /// Compare two integers by mathematical value.
    fn cmp_integers(a: Number, b: Number) -> Option<Ordering> {
        match (a, b) {
            (Number::Int(x), Number::Int(y)) => Some(x.cmp(&y)),
            (Number::UInt(x), Number::UInt(y)) => Some(x.cmp(&y)),
            (Number::Int(x), Number::UInt(y)) => Some(match u64::try_from(x) {
                Ok(x) => x.cmp(&y),
                Err(_) => Ordering::Less,
            }),
            (Number::UInt(_), Number::Int(_)) => Self::cmp_integers(b, a).map(Ordering::reverse),
            _ => None,
        }
    }
}

/// Integers compare by value across `Int` and `UInt`; doubles only equal
/// doubles.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Double(a), Number::Double(b)) => a == b,
            (Number::Double(_), _) | (_, Number::Double(_)) => false,
            (a, b) => Self::cmp_integers(a, b) == Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::UInt(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::UInt(u64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Double(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(n: Number) -> String {
        n.to_string()
    }

    #[test]
    fn test_scan_valid_literals() {
        assert_eq!(scan(b"0"), Ok(Scanned { len: 1, integral: true }));
        assert_eq!(scan(b"-12,"), Ok(Scanned { len: 3, integral: true }));
        assert_eq!(scan(b"1.5]"), Ok(Scanned { len: 3, integral: false }));
        assert_eq!(scan(b"1e+10"), Ok(Scanned { len: 5, integral: false }));
        assert_eq!(scan(b"-0.0E-2 "), Ok(Scanned { len: 7, integral: false }));
    }

    #[test]
    fn test_scan_rejects_malformed() {
        assert!(scan(b"-").is_err());
        assert!(scan(b"01").is_err());
        assert!(scan(b"1.").is_err());
        assert!(scan(b"1.e5").is_err());
        assert!(scan(b"1e").is_err());
        assert!(scan(b"1e+").is_err());
        assert!(scan(b".5").is_err());
        assert!(scan(b"+1").is_err());
    }

    #[test]
    fn test_parse_integer_kinds() {
        assert_eq!(
            Number::parse("9223372036854775807").map(Number::kind),
            Some(Kind::SignedInt)
        );
        assert_eq!(
            Number::parse("-9223372036854775808").map(Number::kind),
            Some(Kind::SignedInt)
        );
        assert_eq!(
            Number::parse("9223372036854775808").map(Number::kind),
            Some(Kind::UnsignedInt)
        );
        assert_eq!(
            Number::parse("18446744073709551615").map(Number::kind),
            Some(Kind::UnsignedInt)
        );
        assert_eq!(
            Number::parse("18446744073709551616").map(Number::kind),
            Some(Kind::Double)
        );
        assert_eq!(
            Number::parse("-9223372036854775809").map(Number::kind),
            Some(Kind::Double)
        );
    }

    #[test]
    fn test_parse_double_kinds() {
        assert_eq!(Number::parse("1.0").map(Number::kind), Some(Kind::Double));
        assert_eq!(Number::parse("1e2").map(Number::kind), Some(Kind::Double));
        assert_eq!(Number::parse("1e2").map(Number::as_f64), Some(100.0));
    }

    #[test]
    fn test_parse_rejects_overflow_and_garbage() {
        assert!(Number::parse("1e400").is_none());
        assert!(Number::parse("-1e400").is_none());
        assert!(Number::parse("inf").is_none());
        assert!(Number::parse("NaN").is_none());
        assert!(Number::parse("1 ").is_none());
        assert!(Number::parse("").is_none());
    }

    #[test]
    fn test_cross_conversions() {
        assert_eq!(Number::Double(3.9).as_i64(), 3);
        assert_eq!(Number::Double(-3.9).as_i64(), -3);
        assert_eq!(Number::Double(1e300).as_i64(), i64::MAX);
        assert_eq!(Number::Double(-1.0).as_u64(), 0);
        assert_eq!(Number::Int(-1).as_u64(), u64::MAX);
        assert_eq!(Number::UInt(u64::MAX).as_i64(), -1);
        assert_eq!(Number::Int(7).as_f64(), 7.0);
    }

    #[test]
    fn test_integer_text() {
        assert_eq!(text(Number::Int(i64::MIN)), "-9223372036854775808");
        assert_eq!(text(Number::UInt(u64::MAX)), "18446744073709551615");
        assert_eq!(text(Number::Int(0)), "0");
    }

    #[test]
    fn test_double_text_keeps_double_form() {
        assert_eq!(text(Number::Double(1.0)), "1.0");
        assert_eq!(text(Number::Double(1.5)), "1.5");
        assert_eq!(text(Number::Double(-0.5)), "-0.5");
        assert_eq!(text(Number::Double(0.1)), "0.1");
    }

    #[test]
    fn test_double_text_round_trips() {
        for d in [1e300, 5e-324, f64::MAX, f64::MIN_POSITIVE, 123456.789, -2.5e-10] {
            let s = text(Number::Double(d));
            let back = Number::parse(&s);
            assert_eq!(back, Some(Number::Double(d)), "{s}");
        }
    }

    #[test]
    fn test_non_finite_written_as_null() {
        assert_eq!(text(Number::Double(f64::NAN)), "null");
        assert_eq!(text(Number::Double(f64::INFINITY)), "null");
        assert!(Number::Double(f64::NEG_INFINITY).is_non_finite());
        assert!(!Number::Double(1.0).is_non_finite());
    }

    #[test]
    fn test_integer_equality_across_kinds() {
        assert_eq!(Number::Int(5), Number::UInt(5));
        assert_eq!(Number::UInt(5), Number::Int(5));
        assert_ne!(Number::Int(-1), Number::UInt(u64::MAX));
        assert_ne!(Number::Int(1), Number::Double(1.0));
        assert_eq!(Number::Double(0.5), Number::Double(0.5));
    }
}
