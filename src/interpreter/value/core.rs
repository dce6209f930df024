use std::fmt;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::handle::{Detections, Image},
    },
    util::num::i64_to_f64_checked,
};

/// Anything a statement can produce: literals, lists, and the handles that
/// vision operations pass between each other.
///
/// `None` is the result of operations that only have side effects, and is
/// the initial value of `last`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    /// A boolean value (`True` or `False`).
    /// Produced by `Not`, `Contains` and equality tests. Used as the condition
    /// of `If`.
    Bool(bool),
    Integer(i64),
    Real(f64),
    /// A string value.
    Str(String),
    /// A list of values.
    List(Vec<Self>),
    /// An image handle.
    Image(Image),
    /// A set of detections.
    Detections(Detections),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<Image> for Value {
    fn from(v: Image) -> Self {
        Self::Image(v)
    }
}

impl From<Detections> for Value {
    fn from(v: Detections) -> Self {
        Self::Detections(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Real(r) => (*r).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
        }
    }
}

impl Value {
    /// Reads a number as `f64`. Integers are widened as long as they stay
    /// exact.
    ///
    /// # Errors
    /// `ExpectedNumber` for anything that is not a number, `LiteralTooLarge`
    /// for integers beyond 2^53.
    ///
    /// # Example
    /// ```
    /// use visionscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(1).unwrap(), 10.0);
    /// assert!(Value::from("10").as_real(1).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line })?),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Reads a whole number. Reals are rejected rather than rounded.
    pub const fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Reads the condition of an `If`.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::ExpectedString { line }),
        }
    }

    /// Compares two values the way `==` does in scripts.
    ///
    /// Integers and reals compare by numeric value; every other pair compares
    /// structurally.
    ///
    /// # Example
    /// ```
    /// use visionscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(2).loosely_equals(&Value::Real(2.0)));
    /// assert!(!Value::from("2").loosely_equals(&Value::Integer(2)));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Real(b)) | (Self::Real(b), Self::Integer(a)) => *a as f64 == *b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            },
            _ => self == other,
        }
    }

    /// Returns `true` if the value is [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
    /// Short type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Image(_) => "image",
            Self::Detections(_) => "detections",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Image(image) => write!(f, "{image}"),
            Self::Detections(detections) => write!(f, "{}", detections.render()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_script_spelling() {
        let list = Value::from(vec![Value::Bool(true), Value::from("cat"), Value::Integer(3)]);

        assert_eq!(list.to_string(), "[True, cat, 3]");
        assert_eq!(Value::None.to_string(), "None");
    }

    #[test]
    fn literals_convert_one_to_one() {
        assert_eq!(Value::from(&LiteralValue::Real(0.5)), Value::Real(0.5));
        assert_eq!(Value::from(&LiteralValue::from("x")), Value::Str("x".to_string()));
    }

    #[test]
    fn type_errors_carry_the_line() {
        assert!(matches!(Value::from("a").as_bool(4), Err(RuntimeError::ExpectedBoolean { line: 4 })));
        assert!(matches!(Value::None.as_str(2), Err(RuntimeError::ExpectedString { line: 2 })));
    }
}
