use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDecl, Param, Stmt, can_assign},
    error::TypeError,
    interpreter::{
        lexer::Token,
        parser::{core::{ParseResult, Parser}, symbols::FunctionSignature},
    },
};

impl Parser<'_> {
    /// Parses a variable or function declaration.
    ///
    /// Grammar:
    /// ```text
    /// declaration := type IDENT ('=' expression)? ';'
    ///              | funcDecl
    /// ```
    ///
    /// A variable declaration without an initializer receives the
    /// type-appropriate zero literal. The name enters the static symbol
    /// table only after the initializer has been parsed, so
    /// `int x = x;` resolves `x` against the outer scope (or fails).
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        if self.current_is(&Token::Function) {
            return self.parse_function_declaration();
        }

        let Some(ty) = self.try_parse_type()? else {
            return Err(self.unexpected("a type name"));
        };
        let (name, pos) = self.expect_identifier()?;

        let init = if self.current_is(&Token::Assign) {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&Token::Semicolon)?;

        self.symbols.insert(&name, ty, pos)?;

        let init = match init {
            Some(value) => {
                if !can_assign(ty, value.ty) {
                    return Err(TypeError::NotAssignable { target: ty,
                                                          source: value.ty,
                                                          pos:    value.pos, }.into());
                }
                value
            },
            None => Expr::zero(ty, pos),
        };

        Ok(Stmt::Decl { ty, name, init })
    }

    /// Parses a function declaration.
    ///
    /// Grammar: `funcDecl := 'function' IDENT '(' paramList ')' ':' type block`
    ///
    /// A static scope is opened around the parameters and the body, and the
    /// signature is registered before the body parses so the body can call
    /// the function recursively.
    fn parse_function_declaration(&mut self) -> ParseResult<Stmt> {
        let saved = self.return_type.take();
        self.symbols.push_scope();
        let result = self.parse_function_inner();
        self.symbols.pop_scope();
        self.return_type = saved;
        result
    }

    fn parse_function_inner(&mut self) -> ParseResult<Stmt> {
        self.expect(&Token::Function)?;
        let (name, pos) = self.expect_identifier()?;
        self.expect(&Token::LParen)?;
        let params = self.parse_param_list()?;
        self.expect(&Token::RParen)?;
        self.expect(&Token::Colon)?;

        let Some(return_type) = self.try_parse_type()? else {
            return Err(TypeError::InvalidReturnType { pos: self.position() }.into());
        };

        let signature = FunctionSignature { return_type,
                                            params: params.iter().map(|param| param.ty).collect(), };
        self.functions.add(&name, signature, pos)?;

        self.return_type = Some(return_type);
        let body = self.parse_block()?;

        Ok(Stmt::FuncDecl(Rc::new(FunctionDecl { name,
                                                 return_type,
                                                 params,
                                                 body })))
    }

    /// Parses the parameter list of a function declaration, entering each
    /// parameter into the function's static scope as it goes.
    ///
    /// Grammar: `paramList := (type IDENT (',' type IDENT)*)?`
    fn parse_param_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        while !self.current_is(&Token::RParen) && self.current().is_some() {
            if !params.is_empty() {
                self.expect(&Token::Comma)?;
            }
            let Some(ty) = self.try_parse_type()? else {
                return Err(TypeError::InvalidParameterType { pos: self.position() }.into());
            };
            let (name, pos) = self.expect_identifier()?;
            self.symbols.insert(&name, ty, pos)?;
            params.push(Param { name, ty });
        }
        Ok(params)
    }
}
