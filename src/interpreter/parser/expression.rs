use crate::{
    ast::{BinaryOperator, Expr, ValueType, can_assign},
    error::{ParseError, SymbolError, TypeError},
    interpreter::{
        lexer::{Position, Token},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and descends through the
    /// precedence hierarchy from there.
    ///
    /// Grammar: `expression := assignment`
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Parses a right-associative assignment, or falls through to the
    /// logical-or level.
    ///
    /// Grammar: `assignment := IDENT '=' assignment | logicalOr`
    ///
    /// Assignment is recognized with one token of look-ahead: only a bare
    /// identifier directly followed by `=` is an assignment target.
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        if self.current_is_identifier() && self.lookahead_is(&Token::Assign) {
            let (name, pos) = self.expect_identifier()?;
            let Some(ty) = self.symbols.find(&name) else {
                return Err(SymbolError::UndefinedVariable { name, pos }.into());
            };
            self.expect(&Token::Assign)?;
            let value = self.parse_assignment()?;
            let assignment = Expr::assign(name, ty, value, pos)?;
            return Ok(assignment);
        }
        self.parse_logical_or()
    }

    /// Grammar: `logicalOr := logicalAnd ('||' logicalAnd)*`
    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.current_is(&Token::OrOr) {
            let pos = self.position();
            self.advance()?;
            let right = self.parse_logical_and()?;
            left = Expr::binary(left, BinaryOperator::Or, right, pos)?;
        }
        Ok(left)
    }

    /// Grammar: `logicalAnd := equality ('&&' equality)*`
    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.current_is(&Token::AndAnd) {
            let pos = self.position();
            self.advance()?;
            let right = self.parse_equality()?;
            left = Expr::binary(left, BinaryOperator::And, right, pos)?;
        }
        Ok(left)
    }

    /// Grammar: `equality := relational (('==' | '!=') relational)*`
    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.current_token() {
                Some(Token::EqualEqual) => BinaryOperator::Equal,
                Some(Token::BangEqual) => BinaryOperator::NotEqual,
                _ => break,
            };
            let pos = self.position();
            self.advance()?;
            let right = self.parse_relational()?;
            left = Expr::binary(left, op, right, pos)?;
        }
        Ok(left)
    }

    /// Grammar: `relational := additive (('<' | '>') additive)*`
    fn parse_relational(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current_token() {
                Some(Token::Less) => BinaryOperator::Less,
                Some(Token::Greater) => BinaryOperator::Greater,
                _ => break,
            };
            let pos = self.position();
            self.advance()?;
            let right = self.parse_additive()?;
            left = Expr::binary(left, op, right, pos)?;
        }
        Ok(left)
    }

    /// Grammar: `additive := multiplicative (('+' | '-') multiplicative)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current_token() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Sub,
                _ => break,
            };
            let pos = self.position();
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right, pos)?;
        }
        Ok(left)
    }

    /// Grammar: `multiplicative := unary (('*' | '/' | '%') unary)*`
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current_token() {
                Some(Token::Star) => BinaryOperator::Mul,
                Some(Token::Slash) => BinaryOperator::Div,
                Some(Token::Percent) => BinaryOperator::Mod,
                _ => break,
            };
            let pos = self.position();
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::binary(left, op, right, pos)?;
        }
        Ok(left)
    }

    /// Parses unary plus and minus.
    ///
    /// Grammar: `unary := ('+' | '-') unary | primary`
    ///
    /// Unary plus is elided: it contributes no tree node and returns its
    /// operand unchanged.
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        match self.current_token() {
            Some(Token::Plus) => {
                self.advance()?;
                self.parse_unary()
            },
            Some(Token::Minus) => {
                let pos = self.position();
                self.advance()?;
                let operand = self.parse_unary()?;
                let negated = Expr::negate(operand, pos)?;
                Ok(negated)
            },
            _ => self.parse_primary(),
        }
    }

    /// Parses a primary expression.
    ///
    /// Grammar:
    /// ```text
    /// primary := LitInt | LitFloat | 'true' | 'false'
    ///          | IDENT | IDENT '(' argList ')' | '(' expression ')'
    /// ```
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let pos = self.position();
        match self.current_token() {
            Some(Token::LitInt(value)) => {
                self.advance()?;
                Ok(Expr::int_literal(value, pos))
            },
            Some(Token::LitFloat(value)) => {
                self.advance()?;
                Ok(Expr::float_literal(value, pos))
            },
            Some(Token::LitBool(value)) => {
                self.advance()?;
                Ok(Expr::bool_literal(value, pos))
            },
            Some(Token::LParen) => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            },
            Some(Token::Identifier(name)) => {
                self.advance()?;
                if self.current_is(&Token::LParen) {
                    return self.parse_call(name, pos);
                }
                let Some(ty) = self.symbols.find(&name) else {
                    return Err(SymbolError::UndefinedVariable { name, pos }.into());
                };
                Ok(Expr::variable(name, ty, pos))
            },
            Some(token) => Err(ParseError::ExpectedExpression { found: token.to_string(),
                                                                pos }.into()),
            None => Err(ParseError::UnexpectedEndOfInput { pos }.into()),
        }
    }

    /// Parses the argument list of a call whose name has been consumed.
    ///
    /// `input` and `println` resolve before the function table: `input`
    /// takes a type keyword and produces that type; `println` takes one
    /// argument of any type and produces `int`. All other names must carry
    /// a registered signature, and every argument must convert to its
    /// parameter's declared type.
    fn parse_call(&mut self, name: String, pos: Position) -> ParseResult<Expr> {
        self.expect(&Token::LParen)?;

        if name == "input" {
            let Some(ty) = self.try_parse_type()? else {
                return Err(TypeError::InvalidInputType { pos: self.position() }.into());
            };
            self.expect(&Token::RParen)?;
            // the zero literal carries the requested type to the evaluator
            return Ok(Expr::call(name, ty, vec![Expr::zero(ty, pos)], pos));
        }

        let arguments = self.parse_argument_list()?;
        self.expect(&Token::RParen)?;

        if name == "println" {
            if arguments.len() != 1 {
                return Err(TypeError::ArgumentCountMismatch { function: name,
                                                              expected: 1,
                                                              found: arguments.len(),
                                                              pos }.into());
            }
            return Ok(Expr::call(name, ValueType::Int, arguments, pos));
        }

        let Some(signature) = self.functions.find(&name) else {
            return Err(SymbolError::UndefinedFunction { name, pos }.into());
        };
        if signature.params.len() != arguments.len() {
            return Err(TypeError::ArgumentCountMismatch { function: name.clone(),
                                                          expected: signature.params.len(),
                                                          found: arguments.len(),
                                                          pos }.into());
        }
        for (argument, &param) in arguments.iter().zip(&signature.params) {
            if !can_assign(param, argument.ty) {
                return Err(TypeError::ArgumentMismatch { function: name.clone(),
                                                         expected: param,
                                                         found: argument.ty,
                                                         pos: argument.pos, }.into());
            }
        }
        let return_type = signature.return_type;

        Ok(Expr::call(name, return_type, arguments, pos))
    }

    /// Grammar: `argList := (expression (',' expression)*)?`
    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();
        while !self.current_is(&Token::RParen) && self.current().is_some() {
            if !arguments.is_empty() {
                self.expect(&Token::Comma)?;
            }
            arguments.push(self.parse_expression()?);
        }
        Ok(arguments)
    }
}
