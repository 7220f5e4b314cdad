//! # vesper
//!
//! vesper is an interpreter for a small, statically typed scripting
//! language written in Rust. Programs use the three primitive types `int`,
//! `float` and `boolean`, lexically scoped variables, `if`/`for`/`while`
//! control flow with `break`/`continue`/`return`, user-defined functions,
//! and the built-ins `input` and `println`.
//!
//! Types are checked while the parser builds the tree, so every expression
//! node carries its resolved type and the evaluator never meets an
//! ill-typed operation it did not cause itself.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{evaluator::core::Interpreter, parser::core::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the typed expression and statement trees together
/// with the type-compatibility rules the parser applies while it constructs
/// nodes, and a canonical pretty-printer over the finished tree.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Fixes each expression's resolved type at construction time.
/// - Renders a parsed program back to canonical source text.
pub mod ast;
/// Provides the error types for every interpreter phase.
///
/// Errors fall into four categories (syntax, symbol, type, runtime), each
/// with its own enum carrying a message and, where known, the source
/// position. All four unwind to the driver unchanged.
///
/// # Responsibilities
/// - Defines the error enums for all failure modes.
/// - Renders messages as `[<category> error] line L, column C: ...`.
/// - Wraps the categories into one top-level `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// Ties together the lexer, the parser with its static tables, the runtime
/// value types, and the evaluator with its scope chain.
///
/// # Responsibilities
/// - Coordinates the pipeline from source text to side effects.
/// - Exposes the parser and evaluator for direct use.
pub mod interpreter;

/// Parses source text into a program without running it.
///
/// # Errors
/// Returns the first syntax, symbol or type error in the source.
///
/// # Examples
/// ```
/// use vesper::parse_source;
///
/// let program = parse_source("int a = 3; println(a + 1);").unwrap();
/// assert_eq!(program.items.len(), 2);
///
/// // `%` is defined on integers only.
/// assert!(parse_source("float f = 1.0 % 2.0;").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, Error> {
    Parser::new(source)?.parse_program()
}

/// Parses and runs a program, returning once it completes.
///
/// Output produced by `println` goes to standard output; `input` reads
/// from standard input.
///
/// # Errors
/// Returns an error if parsing fails or if the program raises a runtime
/// error.
///
/// # Examples
/// ```
/// use vesper::run_source;
///
/// assert!(run_source("int x = 2 + 2;").is_ok());
///
/// // 'y' is never declared
/// assert!(run_source("int x = y + 1;").is_err());
///
/// // integer division by zero raises at run time
/// assert!(run_source("int x = 1 / 0;").is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), Error> {
    let program = parse_source(source)?;
    let mut interpreter = Interpreter::new();
    interpreter.run(&program)
}
