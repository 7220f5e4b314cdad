use crate::{ast::ValueType, interpreter::lexer::Position};

/// Represents all errors that can occur while the evaluator runs a program.
#[derive(Debug)]
pub enum RuntimeError {
    /// Integer division by zero.
    DivisionByZero {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// Integer modulo by zero.
    ModuloByZero {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// A variable lookup found no live binding. Unreachable for well-typed
    /// trees; kept as an error rather than a panic.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// A function was called before its declaration statement executed.
    FunctionNotDeclared {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Position,
    },
    /// A boolean value was expected.
    ExpectedBoolean {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// A numeric value was expected.
    ExpectedNumber {
        /// The source position where the error occurred.
        pos: Position,
    },
    /// A runtime value did not match the type resolved at parse time. This
    /// is an internal invariant violation surfaced as an error.
    TypeMismatch {
        /// The statically resolved type.
        expected: ValueType,
        /// The type actually found.
        found:    ValueType,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// The token read by `input(...)` does not parse as the requested type.
    InvalidInput {
        /// The requested type.
        expected: ValueType,
        /// The token that was read.
        found:    String,
        /// The source position where the error occurred.
        pos:      Position,
    },
    /// Reading standard input failed.
    Io {
        /// The operating system error.
        details: String,
        /// The source position where the error occurred.
        pos:     Position,
    },
    /// A `break` verdict escaped every enclosing loop.
    BreakOutsideLoop,
    /// A `continue` verdict escaped every enclosing loop.
    ContinueOutsideLoop,
    /// A `return` verdict escaped to the top level of the program.
    ReturnOutsideFunction,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { pos } => {
                write!(f, "[runtime error] {pos}: division by zero")
            },

            Self::ModuloByZero { pos } => {
                write!(f, "[runtime error] {pos}: modulo by zero")
            },

            Self::UnknownVariable { name, pos } => {
                write!(f, "[runtime error] {pos}: unknown variable '{name}'")
            },

            Self::FunctionNotDeclared { name, pos } => {
                write!(f, "[runtime error] {pos}: function '{name}' has not been declared yet")
            },

            Self::ExpectedBoolean { pos } => {
                write!(f, "[runtime error] {pos}: expected a boolean value")
            },

            Self::ExpectedNumber { pos } => {
                write!(f, "[runtime error] {pos}: expected a numeric value")
            },

            Self::TypeMismatch { expected, found, pos } => {
                write!(f, "[runtime error] {pos}: value of type {found} where {expected} was expected")
            },

            Self::InvalidInput { expected, found, pos } => {
                write!(f, "[runtime error] {pos}: cannot read '{found}' as {expected}")
            },

            Self::Io { details, pos } => {
                write!(f, "[runtime error] {pos}: failed to read input: {details}")
            },

            Self::BreakOutsideLoop => write!(f, "[runtime error] 'break' outside of a loop"),

            Self::ContinueOutsideLoop => {
                write!(f, "[runtime error] 'continue' outside of a loop")
            },

            Self::ReturnOutsideFunction => {
                write!(f, "[runtime error] 'return' outside of a function")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
