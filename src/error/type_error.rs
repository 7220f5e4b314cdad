use crate::{
    ast::{BinaryOperator, ValueType},
    interpreter::lexer::Position,
};

/// Represents all type errors raised while the parser constructs tree nodes.
#[derive(Debug)]
pub enum TypeError {
    /// The operand types are incompatible with a binary operator.
    InvalidBinaryOperands {
        /// The operator.
        op:  BinaryOperator,
        /// Type of the left operand.
        lhs: ValueType,
        /// Type of the right operand.
        rhs: ValueType,
        /// The source position where the error occurred.
        pos: Position,
    },
    /// Unary `-` was applied to a non-numeric operand.
    InvalidNegation {
        /// Type of the operand.
        operand: ValueType,
        /// The source position where the error occurred.
        pos:     Position,
    },
    /// A value cannot be stored into its target (assignment or initializer).
    NotAssignable {
        /// The target's declared type.
        target: ValueType,
        /// The type of the assigned value.
        source: ValueType,
        /// The source position where the error occurred.
        pos:    Position,
    },
    /// An `if`, `while` or `for` condition is not a boolean.
    ConditionNotBoolean {
        /// The type the condition actually has.
        found: ValueType,
        /// The source position where the error occurred.
        pos:   Position,
    },
    /// A call supplied the wrong number of arguments.
    ArgumentCountMismatch {
        /// Name of the called function.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// An argument cannot be converted to its parameter's type.
    ArgumentMismatch {
        /// Name of the called function.
        function: String,
        /// The parameter's declared type.
        expected: ValueType,
        /// The argument's type.
        found:    ValueType,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// A `return` expression cannot be converted to the function's declared
    /// return type.
    ReturnTypeMismatch {
        /// The declared return type.
        expected: ValueType,
        /// The returned expression's type.
        found:    ValueType,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// A function declaration carries no valid return type.
    InvalidReturnType {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// A parameter declaration carries no valid type.
    InvalidParameterType {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// The argument of `input(...)` is not a type keyword.
    InvalidInputType {
        /// The source position where the error occurred.
        pos: Position,
    },
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBinaryOperands { op, lhs, rhs, pos } => {
                write!(f, "[type error] {pos}: invalid operator '{op}' between {lhs} and {rhs}")
            },

            Self::InvalidNegation { operand, pos } => {
                write!(f, "[type error] {pos}: invalid operand type {operand} for '-'")
            },

            Self::NotAssignable { target, source, pos } => {
                write!(f, "[type error] {pos}: cannot assign {source} to {target}")
            },

            Self::ConditionNotBoolean { found, pos } => {
                write!(f, "[type error] {pos}: condition must have type boolean, found {found}")
            },

            Self::ArgumentCountMismatch { function,
                                          expected,
                                          found,
                                          pos, } => {
                write!(f,
                       "[type error] {pos}: function '{function}' expects {expected} argument(s), found {found}")
            },

            Self::ArgumentMismatch { function,
                                     expected,
                                     found,
                                     pos, } => {
                write!(f,
                       "[type error] {pos}: argument of type {found} cannot convert to {expected} in call to '{function}'")
            },

            Self::ReturnTypeMismatch { expected, found, pos } => {
                write!(f, "[type error] {pos}: cannot return {found} from a function returning {expected}")
            },

            Self::InvalidReturnType { pos } => {
                write!(f, "[type error] {pos}: a function must return int, float or boolean")
            },

            Self::InvalidParameterType { pos } => {
                write!(f, "[type error] {pos}: parameter type must be int, float or boolean")
            },

            Self::InvalidInputType { pos } => {
                write!(f, "[type error] {pos}: input expects a type of int, float or boolean")
            },
        }
    }
}

impl std::error::Error for TypeError {}
