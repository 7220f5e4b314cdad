/// Parser state and the program/item entry points.
pub mod core;
/// Variable and function declarations.
pub mod declaration;
/// Expression parsing: the precedence hierarchy from assignment down to
/// primaries, with type checking at every node construction.
pub mod expression;
/// Blocks, selection, iteration and jump statements.
pub mod statement;
/// The lazy token source and its fixed-capacity look-ahead ring.
pub mod stream;
/// The static symbol table and the static function table.
pub mod symbols;
