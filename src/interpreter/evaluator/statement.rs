use std::rc::Rc;

use crate::{
    ast::Stmt,
    interpreter::evaluator::{
        core::{EvalResult, Interpreter},
        flow::Flow,
    },
};

impl Interpreter {
    /// Executes a statement and returns its control-flow verdict.
    ///
    /// Statements either fall through (`Flow::Normal`) or produce a jump
    /// verdict that the enclosing construct must handle: loops absorb
    /// `Broken` and `Continued`, function calls absorb `Returned`, and
    /// anything that reaches the program's top level is a runtime error.
    ///
    /// # Errors
    /// Propagates the first runtime error raised by a subexpression or a
    /// nested statement.
    pub fn execute(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Block(items) => {
                self.push_scope();
                let result = self.execute_sequence(items);
                self.pop_scope();
                result
            },

            Stmt::Decl { ty, name, init } => {
                let value = self.evaluate(init)?.convert_to(*ty, init.pos)?;
                self.define_local(name, value);
                Ok(Flow::Normal)
            },

            Stmt::Expr(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            },

            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.evaluate(condition)?.as_bool(condition.pos)? {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.as_bool(condition.pos)? {
                    match self.execute(body)? {
                        Flow::Normal | Flow::Continued => {},
                        Flow::Broken => break,
                        returned @ Flow::Returned(_) => return Ok(returned),
                    }
                }
                Ok(Flow::Normal)
            },

            Stmt::For { init,
                        condition,
                        update,
                        body, } => {
                self.evaluate(init)?;
                while self.evaluate(condition)?.as_bool(condition.pos)? {
                    match self.execute(body)? {
                        // a continued iteration still runs the update
                        Flow::Normal | Flow::Continued => {
                            self.evaluate(update)?;
                        },
                        Flow::Broken => break,
                        returned @ Flow::Returned(_) => return Ok(returned),
                    }
                }
                Ok(Flow::Normal)
            },

            Stmt::Break => Ok(Flow::Broken),

            Stmt::Continue => Ok(Flow::Continued),

            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                Ok(Flow::Returned(value))
            },

            Stmt::FuncDecl(func) => {
                self.functions.insert(func.name.clone(), Rc::clone(func));
                Ok(Flow::Normal)
            },
        }
    }

    /// Executes statements in order, stopping at the first non-normal
    /// verdict and forwarding it to the caller.
    pub(crate) fn execute_sequence(&mut self, items: &[Stmt]) -> EvalResult<Flow> {
        for item in items {
            match self.execute(item)? {
                Flow::Normal => {},
                verdict => return Ok(verdict),
            }
        }
        Ok(Flow::Normal)
    }
}
