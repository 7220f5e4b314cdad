use crate::{
    ast::ValueType,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Position},
};

/// Represents a runtime value in the interpreter.
///
/// Exactly one variant exists per [`ValueType`]; the variant of a value is
/// always the type the expression producing it resolved to at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 32-bit signed integer value.
    Int(i32),
    /// A 64-bit floating point value.
    Float(f64),
    /// A boolean value, `true` or `false`.
    Bool(bool),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl Value {
    /// The [`ValueType`] this value belongs to.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Bool(_) => ValueType::Bool,
        }
    }

    /// The zero value of a type: `0`, `0.0` or `false`.
    ///
    /// Declarations without an initializer start out with this value, and a
    /// function body that completes without returning one produces it.
    #[must_use]
    pub const fn zero(ty: ValueType) -> Self {
        match ty {
            ValueType::Int => Self::Int(0),
            ValueType::Float => Self::Float(0.0),
            ValueType::Bool => Self::Bool(false),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ExpectedBoolean`] for numeric values.
    pub const fn as_bool(&self, pos: Position) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { pos }),
        }
    }

    /// Converts the value to `f64`, widening integers exactly.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ExpectedNumber`] for booleans.
    pub fn as_f64(&self, pos: Position) -> EvalResult<f64> {
        match self {
            Self::Int(v) => Ok(f64::from(*v)),
            Self::Float(v) => Ok(*v),
            Self::Bool(_) => Err(RuntimeError::ExpectedNumber { pos }),
        }
    }

    /// Converts the value to the given type under the assignability rules:
    /// `Int` targets truncate floats toward zero, `Float` targets widen
    /// integers, and same-type conversions are the identity.
    ///
    /// # Errors
    /// Returns [`RuntimeError::TypeMismatch`] for a conversion the type
    /// rules forbid. Such a call cannot be reached through a well-typed
    /// tree, so hitting this is an internal invariant violation.
    ///
    /// # Example
    /// ```
    /// use vesper::{
    ///     ast::ValueType,
    ///     interpreter::{lexer::Position, value::Value},
    /// };
    ///
    /// let pos = Position { line: 1, column: 1 };
    /// assert_eq!(Value::Float(1.9).convert_to(ValueType::Int, pos).unwrap(),
    ///            Value::Int(1));
    /// assert_eq!(Value::Int(3).convert_to(ValueType::Float, pos).unwrap(),
    ///            Value::Float(3.0));
    /// assert!(Value::Int(1).convert_to(ValueType::Bool, pos).is_err());
    /// ```
    pub fn convert_to(self, ty: ValueType, pos: Position) -> EvalResult<Self> {
        match (self, ty) {
            (Self::Int(_), ValueType::Int)
            | (Self::Float(_), ValueType::Float)
            | (Self::Bool(_), ValueType::Bool) => Ok(self),
            (Self::Int(v), ValueType::Float) => Ok(Self::Float(f64::from(v))),
            // truncation toward zero, saturating at the i32 range edges
            (Self::Float(v), ValueType::Int) => Ok(Self::Int(v as i32)),
            (value, expected) => Err(RuntimeError::TypeMismatch { expected,
                                                                  found: value.value_type(),
                                                                  pos }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position { line: 1, column: 1 };

    #[test]
    fn truncation_goes_toward_zero() {
        assert_eq!(Value::Float(1.9).convert_to(ValueType::Int, POS).unwrap(),
                   Value::Int(1));
        assert_eq!(Value::Float(-1.9).convert_to(ValueType::Int, POS).unwrap(),
                   Value::Int(-1));
    }

    #[test]
    fn booleans_refuse_numeric_conversion() {
        assert!(Value::Bool(true).convert_to(ValueType::Int, POS).is_err());
        assert!(Value::Int(0).convert_to(ValueType::Bool, POS).is_err());
    }

    #[test]
    fn display_matches_source_syntax() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
