use std::io::{self, BufRead};

use crate::{
    ast::{Expr, ValueType},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            flow::Flow,
        },
        lexer::Position,
        value::Value,
    },
};

/// Function names resolved before the user-defined function table.
///
/// The parser also refuses `function` declarations with these names.
pub const BUILTIN_FUNCTIONS: &[&str] = &["input", "println"];

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// The built-ins `input` and `println` are resolved by name first; any
    /// other name is looked up in the runtime function table.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            result_type: ValueType,
                            pos: Position)
                            -> EvalResult<Value> {
        match name {
            "input" => self.call_input(result_type, pos),
            "println" => self.call_println(arguments),
            _ => self.call_function(name, arguments, pos),
        }
    }

    /// Prints the single argument's value followed by a newline.
    ///
    /// Always produces `Int` 0, which is also the call expression's
    /// resolved type.
    fn call_println(&mut self, arguments: &[Expr]) -> EvalResult<Value> {
        // arity was checked at parse time
        if let Some(argument) = arguments.first() {
            let value = self.evaluate(argument)?;
            println!("{value}");
        }
        Ok(Value::Int(0))
    }

    /// Reads one whitespace-delimited token from standard input and parses
    /// it as the requested type.
    fn call_input(&mut self, ty: ValueType, pos: Position) -> EvalResult<Value> {
        let token = read_input_token(&mut io::stdin().lock())
            .map_err(|e| RuntimeError::Io { details: e.to_string(),
                                            pos })?;
        let Some(token) = token else {
            return Err(RuntimeError::InvalidInput { expected: ty,
                                                    found: "end of input".to_string(),
                                                    pos });
        };
        parse_input_value(ty, &token, pos)
    }

    /// Calls a user-defined function.
    ///
    /// Arguments evaluate left to right in the caller's scope and convert
    /// to their parameter types; then a fresh scope is pushed, the
    /// parameters bound, and the body executed. The scope is popped on
    /// every exit path, errors included.
    fn call_function(&mut self,
                     name: &str,
                     arguments: &[Expr],
                     pos: Position)
                     -> EvalResult<Value> {
        let Some(function) = self.functions.get(name).cloned() else {
            return Err(RuntimeError::FunctionNotDeclared { name: name.to_string(),
                                                           pos });
        };

        let mut bound = Vec::with_capacity(arguments.len());
        for (argument, param) in arguments.iter().zip(&function.params) {
            let value = self.evaluate(argument)?.convert_to(param.ty, argument.pos)?;
            bound.push(value);
        }

        self.push_scope();
        for (param, value) in function.params.iter().zip(bound) {
            self.define_local(&param.name, value);
        }
        let result = self.execute(&function.body);
        self.pop_scope();

        match result? {
            Flow::Returned(Some(value)) => value.convert_to(function.return_type, pos),
            // a body that falls off the end, or a bare `return;`, yields
            // the zero value of the declared return type
            Flow::Returned(None) | Flow::Normal => Ok(Value::zero(function.return_type)),
            Flow::Broken => Err(RuntimeError::BreakOutsideLoop),
            Flow::Continued => Err(RuntimeError::ContinueOutsideLoop),
        }
    }
}

/// Parses one `input` token as the requested type.
///
/// `input(boolean)` accepts exactly the literals `true` and `false`.
///
/// # Errors
/// Returns [`RuntimeError::InvalidInput`] when the token does not parse.
///
/// # Example
/// ```
/// use vesper::{
///     ast::ValueType,
///     interpreter::{evaluator::builtin::parse_input_value, lexer::Position, value::Value},
/// };
///
/// let pos = Position { line: 1, column: 1 };
/// assert_eq!(parse_input_value(ValueType::Int, "42", pos).unwrap(),
///            Value::Int(42));
/// assert_eq!(parse_input_value(ValueType::Bool, "true", pos).unwrap(),
///            Value::Bool(true));
/// assert!(parse_input_value(ValueType::Bool, "yes", pos).is_err());
/// ```
pub fn parse_input_value(ty: ValueType, token: &str, pos: Position) -> EvalResult<Value> {
    let invalid = || RuntimeError::InvalidInput { expected: ty,
                                                  found: token.to_string(),
                                                  pos };
    match ty {
        ValueType::Int => token.parse::<i32>().map(Value::Int).map_err(|_| invalid()),
        ValueType::Float => token.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        ValueType::Bool => match token {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

/// Reads the next whitespace-delimited token, or `None` at end of input.
fn read_input_token(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut token = String::new();
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        let mut used = 0;
        let mut done = false;
        for &byte in buffer {
            if byte.is_ascii_whitespace() {
                used += 1;
                if !token.is_empty() {
                    done = true;
                    break;
                }
            } else {
                token.push(char::from(byte));
                used += 1;
            }
        }
        reader.consume(used);
        if done {
            break;
        }
    }
    if token.is_empty() { Ok(None) } else { Ok(Some(token)) }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const POS: Position = Position { line: 1, column: 1 };

    #[test]
    fn tokens_split_on_any_whitespace() {
        let mut reader = Cursor::new("  3\t4\nfive");
        assert_eq!(read_input_token(&mut reader).unwrap(), Some("3".to_string()));
        assert_eq!(read_input_token(&mut reader).unwrap(), Some("4".to_string()));
        assert_eq!(read_input_token(&mut reader).unwrap(), Some("five".to_string()));
        assert_eq!(read_input_token(&mut reader).unwrap(), None);
    }

    #[test]
    fn boolean_input_accepts_only_the_literals() {
        assert_eq!(parse_input_value(ValueType::Bool, "false", POS).unwrap(),
                   Value::Bool(false));
        assert!(parse_input_value(ValueType::Bool, "TRUE", POS).is_err());
        assert!(parse_input_value(ValueType::Bool, "1", POS).is_err());
    }

    #[test]
    fn numeric_input_parses_per_type() {
        assert_eq!(parse_input_value(ValueType::Float, "2.5", POS).unwrap(),
                   Value::Float(2.5));
        assert!(parse_input_value(ValueType::Int, "2.5", POS).is_err());
        assert!(parse_input_value(ValueType::Int, "12a", POS).is_err());
    }
}
