/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the typed tree, executes statements, evaluates
/// expressions, maintains the runtime scope chain and function table, and
/// propagates `break`/`continue`/`return` as explicit verdicts rather than
/// unwinding.
///
/// # Responsibilities
/// - Executes statements and forwards control-flow verdicts.
/// - Evaluates expressions left to right with short-circuit logic.
/// - Reports runtime errors such as division by zero or invalid `input`.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens for keywords,
/// literals, identifiers and operators, each tagged with its line and
/// column.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Recognizes numeric, boolean and identifier forms.
/// - Flags malformed literals such as `1.5a`.
pub mod lexer;
/// The parser module builds the typed abstract syntax tree from tokens.
///
/// The parser walks the token stream through a fixed two-slot look-ahead
/// ring, applies the grammar by recursive descent, and constructs tree
/// nodes that validate their operand types on the spot. It owns the static
/// symbol table and the static function table for the duration of the
/// parse.
///
/// # Responsibilities
/// - Converts tokens into well-typed expression and statement nodes.
/// - Resolves identifiers against lexical scopes as it parses.
/// - Reports syntax, symbol and type errors with source positions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum with its three variants (integer, float,
/// boolean) and the conversions between them that the assignability rules
/// allow.
///
/// # Responsibilities
/// - Defines the `Value` enum and the zero value of each type.
/// - Implements checked accessors and assignability conversions.
/// - Formats values the way `println` prints them.
pub mod value;
