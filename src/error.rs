/// Syntax errors.
///
/// Defines all error types that can occur while lexing and parsing source
/// code: unexpected characters, malformed literals, and grammar violations.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, invalid `input`, or control flow escaping its
/// construct.
pub mod runtime_error;
/// Symbol errors.
///
/// Name-resolution failures detected by the parser: undefined variables and
/// functions, redeclarations, and redefinition of built-ins.
pub mod symbol_error;
/// Type errors.
///
/// Incompatibilities detected while the parser constructs typed tree nodes:
/// bad operand types, unassignable values, and non-boolean conditions.
pub mod type_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use symbol_error::SymbolError;
pub use type_error::TypeError;

/// Any error the interpreter can surface, tagged with its category.
///
/// All four categories unwind to the driver unchanged; the first error ends
/// the run. The rendered message carries the category tag and, where known,
/// the source position.
#[derive(Debug)]
pub enum Error {
    /// A syntax error from the lexer or parser.
    Parse(ParseError),
    /// A name-resolution error from the parser.
    Symbol(SymbolError),
    /// A type error from node construction.
    Type(TypeError),
    /// An error raised while the program ran.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Symbol(e) => write!(f, "{e}"),
            Self::Type(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SymbolError> for Error {
    fn from(e: SymbolError) -> Self {
        Self::Symbol(e)
    }
}

impl From<TypeError> for Error {
    fn from(e: TypeError) -> Self {
        Self::Type(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
