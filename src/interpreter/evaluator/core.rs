use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{FunctionDecl, Program},
    error::{Error, RuntimeError},
    interpreter::{evaluator::flow::Flow, lexer::Position, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The runtime state of one interpreter.
///
/// Owns the runtime scope chain and the runtime function table. Nothing is
/// process-global: two `Interpreter` values never share state, and the
/// parse-time tables live inside the parser instead.
///
/// The scope chain mirrors the nesting the parser established statically.
/// Each `{...}` block pushes a scope while it runs, and every function call
/// pushes one for its parameters; every push is paired with a pop on all
/// exit paths, errors included, so an aborted run still unwinds to the
/// global scope.
pub struct Interpreter {
    /// The runtime scope chain, innermost scope last. The first entry is
    /// the global scope and is never popped.
    pub scope_stack: Vec<HashMap<String, Value>>,
    /// The runtime function table, filled in by executing function
    /// declaration statements.
    pub functions:   HashMap<String, Rc<FunctionDecl>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty global scope and no functions.
    #[must_use]
    pub fn new() -> Self {
        Self { scope_stack: vec![HashMap::new()],
               functions:   HashMap::new(), }
    }

    /// Runs a parsed program to completion.
    ///
    /// The top-level items execute in order. A `break`, `continue` or
    /// `return` verdict that reaches the top level has escaped every
    /// construct that could absorb it and is reported as a runtime error.
    ///
    /// # Errors
    /// Returns the first runtime error the program raises.
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for item in &program.items {
            match self.execute(item)? {
                Flow::Normal => {},
                Flow::Broken => return Err(RuntimeError::BreakOutsideLoop.into()),
                Flow::Continued => return Err(RuntimeError::ContinueOutsideLoop.into()),
                Flow::Returned(_) => return Err(RuntimeError::ReturnOutsideFunction.into()),
            }
        }
        Ok(())
    }

    /// Pushes a new runtime scope.
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Removes the innermost runtime scope.
    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Inserts a variable into the innermost scope.
    ///
    /// Used by declarations and parameter binding. Any same-named variable
    /// in an outer scope is shadowed, not overwritten.
    pub fn define_local(&mut self, name: &str, value: Value) {
        self.scope_stack
            .last_mut()
            .expect("at least the global scope")
            .insert(name.to_string(), value);
    }

    /// Reads a variable, searching from the innermost scope outward, and
    /// returns a copy of its value.
    ///
    /// # Example
    /// ```
    /// use vesper::interpreter::{evaluator::core::Interpreter, value::Value};
    ///
    /// let mut interpreter = Interpreter::new();
    /// interpreter.define_local("x", Value::Int(5));
    ///
    /// assert_eq!(interpreter.get_variable("x"), Some(Value::Int(5)));
    /// assert_eq!(interpreter.get_variable("y"), None);
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        for scope in self.scope_stack.iter().rev() {
            if let Some(value) = scope.get(name) {
                return Some(*value);
            }
        }
        None
    }

    /// Stores `value` into the innermost scope that declares `name`.
    ///
    /// The stored value must already have the variable's type; assignment
    /// sites convert before calling this.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownVariable`] if no scope declares the
    /// name, and [`RuntimeError::TypeMismatch`] if the live binding has a
    /// different type than the stored value. Neither is reachable through
    /// a well-typed tree.
    pub fn assign_nearest(&mut self,
                          name: &str,
                          value: Value,
                          pos: Position)
                          -> EvalResult<()> {
        for scope in self.scope_stack.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(name) {
                if slot.value_type() != value.value_type() {
                    return Err(RuntimeError::TypeMismatch { expected: slot.value_type(),
                                                            found:    value.value_type(),
                                                            pos });
                }
                *slot = value;
                return Ok(());
            }
        }
        Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                            pos })
    }
}
