use crate::{
    ast::{BinaryOperator, Expr, ExprKind},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Position,
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates an expression to a fresh value.
    ///
    /// The value's type is always the type the expression resolved to at
    /// parse time. Subexpressions evaluate left to right; the logical
    /// operators skip their right operand when the left one decides the
    /// result.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for integer division or modulo by zero,
    /// failed `input` reads, or calls whose declaration has not executed
    /// yet.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::IntLit(value) => Ok(Value::Int(*value)),
            ExprKind::FloatLit(value) => Ok(Value::Float(*value)),
            ExprKind::BoolLit(value) => Ok(Value::Bool(*value)),
            ExprKind::Void => Ok(Value::Int(0)),

            ExprKind::Variable { name } => {
                let Some(value) = self.get_variable(name) else {
                    return Err(RuntimeError::UnknownVariable { name: name.clone(),
                                                               pos:  expr.pos, });
                };
                if value.value_type() != expr.ty {
                    return Err(RuntimeError::TypeMismatch { expected: expr.ty,
                                                            found:    value.value_type(),
                                                            pos:      expr.pos, });
                }
                Ok(value)
            },

            ExprKind::Negate { operand } => match self.evaluate(operand)? {
                Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
                Value::Float(v) => Ok(Value::Float(-v)),
                Value::Bool(_) => Err(RuntimeError::ExpectedNumber { pos: expr.pos }),
            },

            ExprKind::Binary { op, left, right } if op.is_logical() => {
                self.eval_logical(*op, left, right)
            },

            ExprKind::Binary { op, left, right } => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                eval_binary(*op, lhs, rhs, expr.pos)
            },

            ExprKind::Assign { name, value } => {
                let stored = self.evaluate(value)?.convert_to(expr.ty, expr.pos)?;
                self.assign_nearest(name, stored, expr.pos)?;
                Ok(stored)
            },

            ExprKind::Call { name, arguments } => {
                self.eval_call(name, arguments, expr.ty, expr.pos)
            },
        }
    }

    /// Short-circuit evaluation of `&&` and `||`: the right operand only
    /// runs when the left one leaves the result undecided.
    fn eval_logical(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Value> {
        let lhs = self.evaluate(left)?.as_bool(left.pos)?;
        match op {
            BinaryOperator::And if !lhs => Ok(Value::Bool(false)),
            BinaryOperator::Or if lhs => Ok(Value::Bool(true)),
            _ => Ok(Value::Bool(self.evaluate(right)?.as_bool(right.pos)?)),
        }
    }
}

/// Applies a binary operator to two already-evaluated values.
///
/// Integer arithmetic wraps at 32 bits; any `Int`/`Float` mix widens the
/// integer side to `Float` first. Integer division and modulo check for a
/// zero divisor; float division follows IEEE silently. Comparisons promote
/// mixed operands the same way, and boolean equality compares logically.
///
/// The logical operators are handled here non-lazily for completeness;
/// [`Interpreter::evaluate`] routes them through the short-circuit path
/// before their operands reach this function.
///
/// # Errors
/// Returns [`RuntimeError::DivisionByZero`] or
/// [`RuntimeError::ModuloByZero`] for a zero integer divisor. The
/// type-confusion errors are unreachable for well-typed trees.
///
/// # Example
/// ```
/// use vesper::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::expression::eval_binary, lexer::Position, value::Value},
/// };
///
/// let pos = Position { line: 1, column: 1 };
/// assert_eq!(eval_binary(BinaryOperator::Add, Value::Int(3), Value::Int(4), pos).unwrap(),
///            Value::Int(7));
/// assert_eq!(eval_binary(BinaryOperator::Div, Value::Float(1.0), Value::Int(4), pos).unwrap(),
///            Value::Float(0.25));
/// assert!(eval_binary(BinaryOperator::Div, Value::Int(1), Value::Int(0), pos).is_err());
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: Value,
                   right: Value,
                   pos: Position)
                   -> EvalResult<Value> {
    use BinaryOperator::{Add, And, Div, Equal, Greater, Less, Mod, Mul, NotEqual, Or, Sub};

    match op {
        Add => eval_numeric(left, right, pos, i32::wrapping_add, |a, b| a + b),
        Sub => eval_numeric(left, right, pos, i32::wrapping_sub, |a, b| a - b),
        Mul => eval_numeric(left, right, pos, i32::wrapping_mul, |a, b| a * b),

        Div => match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero { pos }),
            (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l.wrapping_div(r))),
            _ => Ok(Value::Float(left.as_f64(pos)? / right.as_f64(pos)?)),
        },

        Mod => match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(RuntimeError::ModuloByZero { pos }),
            (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l.wrapping_rem(r))),
            _ => Err(RuntimeError::ExpectedNumber { pos }),
        },

        Less => match (left, right) {
            (Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l < r)),
            _ => Ok(Value::Bool(left.as_f64(pos)? < right.as_f64(pos)?)),
        },

        Greater => match (left, right) {
            (Value::Int(l), Value::Int(r)) => Ok(Value::Bool(l > r)),
            _ => Ok(Value::Bool(left.as_f64(pos)? > right.as_f64(pos)?)),
        },

        Equal => Ok(Value::Bool(eval_equality(left, right, pos)?)),
        NotEqual => Ok(Value::Bool(!eval_equality(left, right, pos)?)),

        And => Ok(Value::Bool(left.as_bool(pos)? && right.as_bool(pos)?)),
        Or => Ok(Value::Bool(left.as_bool(pos)? || right.as_bool(pos)?)),
    }
}

/// Applies an arithmetic operator, keeping two integers integral and
/// promoting any mix to floats.
fn eval_numeric(left: Value,
                right: Value,
                pos: Position,
                int_op: fn(i32, i32) -> i32,
                float_op: fn(f64, f64) -> f64)
                -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => Ok(Value::Int(int_op(l, r))),
        _ => Ok(Value::Float(float_op(left.as_f64(pos)?, right.as_f64(pos)?))),
    }
}

/// Equality after numeric promotion; booleans compare logically.
fn eval_equality(left: Value, right: Value, pos: Position) -> EvalResult<bool> {
    match (left, right) {
        (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
        (Value::Int(l), Value::Int(r)) => Ok(l == r),
        _ => Ok(left.as_f64(pos)? == right.as_f64(pos)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position { line: 1, column: 1 };

    #[test]
    fn integer_arithmetic_wraps() {
        assert_eq!(eval_binary(BinaryOperator::Add, Value::Int(i32::MAX), Value::Int(1), POS)
                       .unwrap(),
                   Value::Int(i32::MIN));
        assert_eq!(eval_binary(BinaryOperator::Div, Value::Int(i32::MIN), Value::Int(-1), POS)
                       .unwrap(),
                   Value::Int(i32::MIN));
    }

    #[test]
    fn mixed_operands_widen_to_float() {
        assert_eq!(eval_binary(BinaryOperator::Mul, Value::Int(2), Value::Float(0.5), POS)
                       .unwrap(),
                   Value::Float(1.0));
        assert_eq!(eval_binary(BinaryOperator::Equal, Value::Int(2), Value::Float(2.0), POS)
                       .unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn zero_divisors_raise_for_integers_only() {
        assert!(eval_binary(BinaryOperator::Div, Value::Int(0), Value::Int(0), POS).is_err());
        assert!(eval_binary(BinaryOperator::Mod, Value::Int(5), Value::Int(0), POS).is_err());

        let quotient =
            eval_binary(BinaryOperator::Div, Value::Float(1.0), Value::Float(0.0), POS).unwrap();
        assert_eq!(quotient, Value::Float(f64::INFINITY));
    }

    #[test]
    fn comparisons_and_boolean_equality() {
        assert_eq!(eval_binary(BinaryOperator::Less, Value::Int(1), Value::Float(1.5), POS)
                       .unwrap(),
                   Value::Bool(true));
        assert_eq!(eval_binary(BinaryOperator::NotEqual, Value::Bool(true), Value::Bool(false), POS)
                       .unwrap(),
                   Value::Bool(true));
    }
}
