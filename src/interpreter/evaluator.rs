/// The `input` and `println` built-ins, and user-defined function calls.
pub mod builtin;
/// Interpreter state: the runtime scope chain and function table.
pub mod core;
/// Expression evaluation.
pub mod expression;
/// Control-flow verdicts produced by statement execution.
pub mod flow;
/// Statement execution.
pub mod statement;
