use crate::{
    ast::{Expr, Stmt, ValueType, can_assign},
    error::TypeError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses one statement.
    ///
    /// Grammar:
    /// ```text
    /// statement := block | iter | jump | select | exprStmt
    /// ```
    ///
    /// Declarations are items, not statements, so a loop or `if` body must
    /// use a block to declare variables.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current_token() {
            Some(Token::LBrace) => self.parse_block(),
            Some(Token::For | Token::While) => self.parse_iteration(),
            Some(Token::Break | Token::Continue | Token::Return) => self.parse_jump(),
            Some(Token::If) => self.parse_selection(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses a braced block, opening a static scope for its items.
    ///
    /// Grammar: `block := '{' item* '}'`
    pub(super) fn parse_block(&mut self) -> ParseResult<Stmt> {
        self.expect(&Token::LBrace)?;
        self.symbols.push_scope();
        let items = self.parse_block_items();
        self.symbols.pop_scope();
        let items = items?;
        self.expect(&Token::RBrace)?;
        Ok(Stmt::Block(items))
    }

    fn parse_block_items(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut items = Vec::new();
        while !self.current_is(&Token::RBrace) && self.current().is_some() {
            items.push(self.parse_item()?);
        }
        Ok(items)
    }

    /// Parses an `if` statement with an optional `else` branch.
    ///
    /// Grammar: `select := 'if' '(' expression ')' statement ('else' statement)?`
    fn parse_selection(&mut self) -> ParseResult<Stmt> {
        self.expect(&Token::If)?;
        self.expect(&Token::LParen)?;
        let condition = self.parse_boolean_condition()?;
        self.expect(&Token::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.current_is(&Token::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch })
    }

    /// Parses a `for` or `while` loop.
    ///
    /// Grammar:
    /// ```text
    /// iter := 'for' '(' exprStmt exprStmt expression ')' statement
    ///       | 'while' '(' expression ')' statement
    /// ```
    fn parse_iteration(&mut self) -> ParseResult<Stmt> {
        if self.current_is(&Token::For) {
            self.advance()?;
            self.expect(&Token::LParen)?;
            let init = self.parse_expression_statement_expr()?;
            let condition = self.parse_expression_statement_expr()?;
            if condition.ty != ValueType::Bool {
                return Err(TypeError::ConditionNotBoolean { found: condition.ty,
                                                            pos:   condition.pos, }.into());
            }
            let update = self.parse_expression()?;
            self.expect(&Token::RParen)?;
            let body = Box::new(self.parse_statement()?);
            return Ok(Stmt::For { init,
                                  condition,
                                  update,
                                  body });
        }

        self.expect(&Token::While)?;
        self.expect(&Token::LParen)?;
        let condition = self.parse_boolean_condition()?;
        self.expect(&Token::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While { condition, body })
    }

    /// Parses a jump statement.
    ///
    /// Grammar: `jump := 'continue' ';' | 'break' ';' | 'return' expression? ';'`
    ///
    /// A `return` expression is checked against the return type of the
    /// function being parsed.
    fn parse_jump(&mut self) -> ParseResult<Stmt> {
        match self.current_token() {
            Some(Token::Continue) => {
                self.advance()?;
                self.expect(&Token::Semicolon)?;
                Ok(Stmt::Continue)
            },
            Some(Token::Break) => {
                self.advance()?;
                self.expect(&Token::Semicolon)?;
                Ok(Stmt::Break)
            },
            _ => {
                self.expect(&Token::Return)?;
                if self.current_is(&Token::Semicolon) {
                    self.advance()?;
                    return Ok(Stmt::Return(None));
                }
                let value = self.parse_expression()?;
                if let Some(expected) = self.return_type {
                    if !can_assign(expected, value.ty) {
                        return Err(TypeError::ReturnTypeMismatch { expected,
                                                                   found: value.ty,
                                                                   pos:   value.pos, }.into());
                    }
                }
                self.expect(&Token::Semicolon)?;
                Ok(Stmt::Return(Some(value)))
            },
        }
    }

    /// Parses an expression statement.
    ///
    /// Grammar: `exprStmt := ';' | expression ';'`
    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        Ok(Stmt::Expr(self.parse_expression_statement_expr()?))
    }

    /// Parses the expression of an expression statement; a bare `;` yields
    /// the empty expression.
    fn parse_expression_statement_expr(&mut self) -> ParseResult<Expr> {
        if self.current_is(&Token::Semicolon) {
            let pos = self.position();
            self.advance()?;
            return Ok(Expr::void(pos));
        }
        let expr = self.parse_expression()?;
        self.expect(&Token::Semicolon)?;
        Ok(expr)
    }

    /// Parses an expression and requires it to have type `boolean`.
    fn parse_boolean_condition(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_expression()?;
        if condition.ty != ValueType::Bool {
            return Err(TypeError::ConditionNotBoolean { found: condition.ty,
                                                        pos:   condition.pos, }.into());
        }
        Ok(condition)
    }
}
