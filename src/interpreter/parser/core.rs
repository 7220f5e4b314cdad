use crate::{
    ast::{Program, ValueType},
    error::{Error, ParseError},
    interpreter::{
        lexer::{Position, Token},
        parser::{
            stream::{SpannedToken, TokenStream},
            symbols::{FunctionTable, SymbolTable},
        },
    },
};

/// Result type used by the parser.
///
/// Parsing can fail with any of the three static error categories (syntax,
/// symbol, type), so parser functions return the umbrella [`Error`].
pub type ParseResult<T> = Result<T, Error>;

/// The recursive-descent parser.
///
/// Owns the token stream and the two parse-time tables: the static symbol
/// table (names in scope and their types) and the static function table
/// (declared signatures). Both tables live exactly as long as the parse.
///
/// Tree nodes are constructed as soon as their operands are available, and
/// the node constructors type-check on the spot, so a successful parse
/// always yields a well-typed tree.
pub struct Parser<'src> {
    pub(super) stream:      TokenStream<'src>,
    pub(super) symbols:     SymbolTable,
    pub(super) functions:   FunctionTable,
    /// Return type of the function currently being parsed, used to check
    /// `return` expressions. `None` at the top level.
    pub(super) return_type: Option<ValueType>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `source`.
    ///
    /// # Errors
    /// Returns a syntax error if one of the first two tokens is malformed.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self { stream:      TokenStream::new(source)?,
                  symbols:     SymbolTable::new(),
                  functions:   FunctionTable::new(),
                  return_type: None, })
    }

    /// Parses the whole program: a sequence of items up to end of input.
    ///
    /// Grammar: `program := item*`
    ///
    /// # Errors
    /// Returns the first syntax, symbol or type error in the source.
    ///
    /// # Example
    /// ```
    /// use vesper::interpreter::parser::core::Parser;
    ///
    /// let program = Parser::new("int x = 1 + 2;").unwrap()
    ///                                            .parse_program()
    ///                                            .unwrap();
    /// assert_eq!(program.items.len(), 1);
    ///
    /// assert!(Parser::new("int x = true;").unwrap().parse_program().is_err());
    /// ```
    pub fn parse_program(mut self) -> ParseResult<Program> {
        let mut items = Vec::new();
        while self.stream.current().is_some() {
            items.push(self.parse_item()?);
        }
        Ok(Program { items })
    }

    /// Parses one top-level or block item.
    ///
    /// Grammar: `item := declaration | statement`
    pub(super) fn parse_item(&mut self) -> ParseResult<crate::ast::Stmt> {
        if self.starts_declaration() {
            self.parse_declaration()
        } else {
            self.parse_statement()
        }
    }

    fn starts_declaration(&self) -> bool {
        matches!(self.current(),
                 Some(t) if Self::is_basic_type(&t.token) || t.token == Token::Function)
    }

    /// The token under the cursor.
    pub(super) fn current(&self) -> Option<&SpannedToken> {
        self.stream.current()
    }

    /// A clone of the token under the cursor, convenient for dispatching
    /// without holding a borrow on the stream.
    pub(super) fn current_token(&self) -> Option<Token> {
        self.stream.current().map(|t| t.token.clone())
    }

    /// Whether the cursor sits on exactly `token`.
    pub(super) fn current_is(&self, token: &Token) -> bool {
        matches!(self.current(), Some(t) if t.token == *token)
    }

    /// Whether the cursor sits on an identifier.
    pub(super) fn current_is_identifier(&self) -> bool {
        matches!(self.current(), Some(t) if matches!(t.token, Token::Identifier(_)))
    }

    /// Whether the token after the cursor is exactly `token`.
    pub(super) fn lookahead_is(&self, token: &Token) -> bool {
        matches!(self.stream.lookahead(1), Some(t) if t.token == *token)
    }

    /// Position of the cursor, or of the end of input.
    pub(super) fn position(&self) -> Position {
        self.stream.position()
    }

    /// Consumes the current token.
    pub(super) fn advance(&mut self) -> ParseResult<()> {
        self.stream.advance()?;
        Ok(())
    }

    /// Consumes the current token if it equals `expected`, and reports a
    /// syntax error otherwise.
    pub(super) fn expect(&mut self, expected: &Token) -> ParseResult<Position> {
        if self.current_is(expected) {
            let pos = self.position();
            self.advance()?;
            return Ok(pos);
        }
        Err(self.unexpected(&format!("'{expected}'")))
    }

    /// Consumes an identifier and returns its name and position.
    pub(super) fn expect_identifier(&mut self) -> ParseResult<(String, Position)> {
        let found = match self.current() {
            Some(SpannedToken { token: Token::Identifier(name),
                                pos, }) => Some((name.clone(), *pos)),
            _ => None,
        };
        match found {
            Some((name, pos)) => {
                self.advance()?;
                Ok((name, pos))
            },
            None => Err(self.error_expected_identifier()),
        }
    }

    /// Consumes a type keyword if the cursor sits on one.
    ///
    /// Grammar: `type := 'int' | 'float' | 'boolean'`
    pub(super) fn try_parse_type(&mut self) -> ParseResult<Option<ValueType>> {
        let ty = match self.current_token() {
            Some(Token::Int) => ValueType::Int,
            Some(Token::Float) => ValueType::Float,
            Some(Token::Boolean) => ValueType::Bool,
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(ty))
    }

    /// Whether `token` is one of the three type keywords.
    pub(super) fn is_basic_type(token: &Token) -> bool {
        matches!(token, Token::Int | Token::Float | Token::Boolean)
    }

    /// Builds the syntax error for the cursor not matching `expected`.
    pub(super) fn unexpected(&self, expected: &str) -> Error {
        match self.current() {
            Some(t) => ParseError::ExpectedToken { expected: expected.to_string(),
                                                   found:    t.token.to_string(),
                                                   pos:      t.pos, }.into(),
            None => ParseError::UnexpectedEndOfInput { pos: self.position() }.into(),
        }
    }

    fn error_expected_identifier(&self) -> Error {
        match self.current() {
            Some(t) => ParseError::ExpectedIdentifier { found: t.token.to_string(),
                                                        pos:   t.pos, }.into(),
            None => ParseError::UnexpectedEndOfInput { pos: self.position() }.into(),
        }
    }
}
