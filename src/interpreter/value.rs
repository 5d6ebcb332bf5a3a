use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

use crate::util::num::{float_to_int_exact, format_float, int_to_float};

/// A numeric value held on the stack or in memory.
///
/// Fir only knows two types: 64-bit integers and double precision floats.
/// Arithmetic results are canonicalized, so a float with no fractional part
/// becomes an integer, while values pushed directly keep the type of their
/// literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl Value {
    /// Wraps a float without canonicalizing it.
    #[must_use]
    pub const fn from_float(value: f64) -> Self {
        Self::Float(value)
    }

    /// Wraps an integer.
    #[must_use]
    pub const fn from_integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Returns `true` if the value is mathematically an integer.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(3).is_exact_integer());
    /// assert!(Value::Float(3.0).is_exact_integer());
    /// assert!(!Value::Float(3.5).is_exact_integer());
    /// ```
    #[must_use]
    pub fn is_exact_integer(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(r) => r.is_finite() && r.fract() == 0.0,
        }
    }

    /// Converts a float with no fractional part into an integer.
    ///
    /// Floats outside the `i64` range, non-finite floats and floats with a
    /// fractional part are returned unchanged.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Float(8.0).canonicalize(), Value::Integer(8));
    /// assert_eq!(Value::Float(0.5).canonicalize(), Value::Float(0.5));
    /// ```
    #[must_use]
    pub fn canonicalize(self) -> Self {
        match self {
            Self::Float(r) => float_to_int_exact(r).map_or(self, Self::Integer),
            Self::Integer(_) => self,
        }
    }

    /// Returns the value as a float.
    #[must_use]
    pub const fn as_float(&self) -> f64 {
        match self {
            Self::Integer(n) => int_to_float(*n),
            Self::Float(r) => *r,
        }
    }

    /// Returns `true` unless the value is an infinite or NaN float.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(r) => r.is_finite(),
        }
    }

    /// Parses a numeric literal as written in a `push` command.
    ///
    /// Accepted forms are an optional leading `-` directly followed by an
    /// integer (`42`) or a real literal (`1.5`, `.5`, `5.`, `2e3`,
    /// `1.5e-3`). Integers keep their type; reals stay floats even when they
    /// have no fractional part. Integers too large for an `i64` become
    /// floats.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::value::Value;
    ///
    /// assert_eq!(Value::parse_literal("42"), Some(Value::Integer(42)));
    /// assert_eq!(Value::parse_literal("-3.0"), Some(Value::Float(-3.0)));
    /// assert_eq!(Value::parse_literal("1e3"), Some(Value::Float(1000.0)));
    /// assert_eq!(Value::parse_literal("9223372036854775808"),
    ///            Some(Value::Float(9_223_372_036_854_775_808.0)));
    /// assert_eq!(Value::parse_literal("abc"), None);
    /// assert_eq!(Value::parse_literal("1 + 2"), None);
    /// assert_eq!(Value::parse_literal("- 7"), None);
    /// ```
    #[must_use]
    pub fn parse_literal(text: &str) -> Option<Self> {
        use crate::expression::lexer::{Token, tokenize};

        let tokens = tokenize(text.trim()).ok()?;
        let (negative, token) = match tokens.as_slice() {
            [(token, _)] => (false, token),
            [(Token::Minus, sign), (token, start)] if *start == sign + 1 => (true, token),
            _ => return None,
        };

        let value = match token {
            Token::Integer(n) if negative => Self::Integer(-n),
            Token::Integer(n) => Self::Integer(*n),
            Token::Real(r) if negative => Self::Float(-r),
            Token::Real(r) => Self::Float(*r),
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Formats the value without the integer rule applied by `Display`.
    ///
    /// Floats always keep their decimal point.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Float(8.0).to_raw_string(), "8.0");
    /// assert_eq!(Value::Integer(8).to_raw_string(), "8");
    /// ```
    #[must_use]
    pub fn to_raw_string(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(r) if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e16 => format!("{r:.1}"),
            Self::Float(r) => format_float(*r),
        }
    }

    /// Applies an integer operation when both operands are integers and it
    /// does not overflow, the float operation otherwise. The result is
    /// canonicalized.
    fn combine(self,
               other: Self,
               int_op: fn(i64, i64) -> Option<i64>,
               float_op: fn(f64, f64) -> f64)
               -> Self {
        if let (Self::Integer(a), Self::Integer(b)) = (self, other)
           && let Some(result) = int_op(a, b)
        {
            return Self::Integer(result);
        }

        Self::Float(float_op(self.as_float(), other.as_float())).canonicalize()
    }
}

impl Add for Value {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Value {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Value {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.combine(rhs, i64::checked_mul, |a, b| a * b)
    }
}

/// Formats the value the way `print` and `dump` show it: anything that is
/// mathematically an integer is printed without a decimal point.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) => match float_to_int_exact(*r) {
                Some(n) => write!(f, "{n}"),
                None if self.is_exact_integer() => write!(f, "{r:.0}"),
                None => write!(f, "{}", format_float(*r)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert_eq!(Value::Integer(2) + Value::Integer(3), Value::Integer(5));
        assert_eq!(Value::Integer(10) - Value::Integer(3), Value::Integer(7));
        assert_eq!(Value::Integer(6) * Value::Integer(7), Value::Integer(42));
    }

    #[test]
    fn float_results_are_canonicalized() {
        assert_eq!(Value::Float(1.5) + Value::Float(1.5), Value::Integer(3));
        assert_eq!(Value::Float(2.5) - Value::Integer(1), Value::Float(1.5));
        assert_eq!(Value::Float(0.5) * Value::Integer(4), Value::Integer(2));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let sum = Value::Integer(i64::MAX) + Value::Integer(i64::MAX);
        assert!(matches!(sum, Value::Float(_)));
    }

    #[test]
    fn display_drops_decimal_point_for_integral_floats() {
        assert_eq!(Value::Float(8.0).to_string(), "8");
        assert_eq!(Value::Float(-0.0).to_string(), "0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn tiny_floats_use_exponent_notation() {
        assert_eq!(Value::Float(1e-7).to_string(), "1e-07");
        assert_eq!(Value::Float(-2.5e-5).to_string(), "-2.5e-05");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(1e-7).to_raw_string(), "1e-07");
        assert_eq!(Value::Float(1e16).to_raw_string(), "1e+16");
        assert_eq!(Value::Float(-0.0).to_raw_string(), "-0.0");
    }

    #[test]
    fn literals_reject_non_numbers() {
        assert_eq!(Value::parse_literal(""), None);
        assert_eq!(Value::parse_literal("--1"), None);
        assert_eq!(Value::parse_literal("x1"), None);
        assert_eq!(Value::parse_literal(".5"), Some(Value::Float(0.5)));
        assert_eq!(Value::parse_literal("- 7"), None);
        assert_eq!(Value::parse_literal("-7"), Some(Value::Integer(-7)));
        assert_eq!(Value::parse_literal("1e400"), None);
    }
}
