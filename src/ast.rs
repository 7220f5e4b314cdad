use std::rc::Rc;

use crate::{error::TypeError, interpreter::lexer::Position};

/// The type of a value in the language.
///
/// Every expression node resolves to exactly one of these three types when it
/// is constructed; there is no dynamic typing and no error sentinel. Helpers
/// that would produce an invalid type return `Option`/`Result` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// 32-bit two's-complement integer (`int`).
    Int,
    /// 64-bit IEEE floating point number (`float`).
    Float,
    /// Boolean truth value (`boolean`).
    Bool,
}

impl ValueType {
    /// Returns `true` for the two numeric types, `Int` and `Float`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "boolean",
        };
        write!(f, "{name}")
    }
}

/// Computes the result type of an arithmetic operation (`+`, `-`, `*`, `/`).
///
/// Two integers produce an integer; any mix of `Int` and `Float` widens to
/// `Float`. Boolean operands have no arithmetic meaning and yield `None`.
///
/// # Example
/// ```
/// use vesper::ast::{ValueType, arithmetic_cast};
///
/// assert_eq!(arithmetic_cast(ValueType::Int, ValueType::Int),
///            Some(ValueType::Int));
/// assert_eq!(arithmetic_cast(ValueType::Int, ValueType::Float),
///            Some(ValueType::Float));
/// assert_eq!(arithmetic_cast(ValueType::Bool, ValueType::Int), None);
/// ```
#[must_use]
pub const fn arithmetic_cast(lhs: ValueType, rhs: ValueType) -> Option<ValueType> {
    use ValueType::{Float, Int};

    match (lhs, rhs) {
        (Int, Int) => Some(Int),
        (Int, Float) | (Float, Int) | (Float, Float) => Some(Float),
        _ => None,
    }
}

/// Returns `true` when two types may be ordered with `<` or `>`.
///
/// Only numeric types compare; booleans are rejected.
#[must_use]
pub const fn can_compare(lhs: ValueType, rhs: ValueType) -> bool {
    lhs.is_numeric() && rhs.is_numeric()
}

/// Returns `true` when two types may be tested with `==` or `!=`.
///
/// Numbers compare with numbers (in any `Int`/`Float` mix) and booleans
/// compare with booleans; a number never equals a boolean.
#[must_use]
pub const fn can_equal(lhs: ValueType, rhs: ValueType) -> bool {
    (lhs.is_numeric() && rhs.is_numeric())
    || matches!((lhs, rhs), (ValueType::Bool, ValueType::Bool))
}

/// Returns `true` when a value of type `source` may be stored into a target
/// of type `target`.
///
/// Numbers convert freely in both directions (`Int` targets truncate toward
/// zero); booleans only accept booleans.
///
/// # Example
/// ```
/// use vesper::ast::{ValueType, can_assign};
///
/// assert!(can_assign(ValueType::Int, ValueType::Float));
/// assert!(can_assign(ValueType::Float, ValueType::Int));
/// assert!(!can_assign(ValueType::Bool, ValueType::Int));
/// ```
#[must_use]
pub const fn can_assign(target: ValueType, source: ValueType) -> bool {
    use ValueType::Bool;

    (target.is_numeric() && source.is_numeric()) || matches!((target, source), (Bool, Bool))
}

/// A binary operator of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Returns `true` for `+`, `-`, `*` and `/`.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// Returns `true` for the ordering operators `<` and `>`.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Less | Self::Greater)
    }

    /// Returns `true` for `==` and `!=`.
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Returns `true` for the short-circuiting operators `&&` and `||`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{operator}")
    }
}

/// Computes the result type of a binary expression, or `None` when the
/// operand types are incompatible with the operator.
///
/// The rules, in operator order:
/// - arithmetic operators follow [`arithmetic_cast`],
/// - `%` requires two integers and produces an integer,
/// - `<` and `>` require numeric operands and produce a boolean,
/// - `==` and `!=` follow [`can_equal`] and produce a boolean,
/// - `&&` and `||` require two booleans.
#[must_use]
pub const fn binary_expression_type(lhs: ValueType,
                                    op: BinaryOperator,
                                    rhs: ValueType)
                                    -> Option<ValueType> {
    use ValueType::{Bool, Int};

    if op.is_arithmetic() {
        return arithmetic_cast(lhs, rhs);
    }
    if matches!(op, BinaryOperator::Mod) {
        return match (lhs, rhs) {
            (Int, Int) => Some(Int),
            _ => None,
        };
    }
    if op.is_relational() {
        return if can_compare(lhs, rhs) { Some(Bool) } else { None };
    }
    if op.is_equality() {
        return if can_equal(lhs, rhs) { Some(Bool) } else { None };
    }
    // logical operators
    match (lhs, rhs) {
        (Bool, Bool) => Some(Bool),
        _ => None,
    }
}

/// An expression node.
///
/// The resolved type is fixed when the node is constructed: the constructors
/// on this type validate their operands against the language's type rules, so
/// a finished tree is well-typed by construction and the evaluator never has
/// to re-check operator/operand compatibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The expression variant and its operands.
    pub kind: ExprKind,
    /// The type this expression evaluates to.
    pub ty:   ValueType,
    /// Source position of the expression, for error reporting.
    pub pos:  Position,
}

/// The variants of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An integer literal such as `42`.
    IntLit(i32),
    /// A floating point literal such as `2.5` or `1e-3`.
    FloatLit(f64),
    /// A boolean literal, `true` or `false`.
    BoolLit(bool),
    /// The empty expression, produced by a bare `;`. Evaluates to `Int` 0.
    Void,
    /// A reference to a variable.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// Arithmetic negation (`-x`).
    Negate {
        /// The negated subexpression.
        operand: Box<Expr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// An assignment to a named variable. The value is converted to the
    /// target's declared type before it is stored.
    Assign {
        /// Name of the target variable.
        name:  String,
        /// The assigned subexpression.
        value: Box<Expr>,
    },
    /// A call to a built-in or user-defined function.
    Call {
        /// Name of the callee.
        name:      String,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Expr>,
    },
}

impl Expr {
    /// Creates an integer literal node.
    #[must_use]
    pub const fn int_literal(value: i32, pos: Position) -> Self {
        Self { kind: ExprKind::IntLit(value),
               ty: ValueType::Int,
               pos }
    }

    /// Creates a floating point literal node.
    #[must_use]
    pub const fn float_literal(value: f64, pos: Position) -> Self {
        Self { kind: ExprKind::FloatLit(value),
               ty: ValueType::Float,
               pos }
    }

    /// Creates a boolean literal node.
    #[must_use]
    pub const fn bool_literal(value: bool, pos: Position) -> Self {
        Self { kind: ExprKind::BoolLit(value),
               ty: ValueType::Bool,
               pos }
    }

    /// Creates the empty expression produced by a bare `;`.
    ///
    /// The empty expression has type `Int` and evaluates to 0, which also
    /// means it never satisfies a `boolean` condition check: `for (;;)` is a
    /// type error rather than an endless loop.
    #[must_use]
    pub const fn void(pos: Position) -> Self {
        Self { kind: ExprKind::Void,
               ty: ValueType::Int,
               pos }
    }

    /// Creates the zero literal of the given type.
    ///
    /// Used as the default initializer of declarations without one, and as
    /// the type-carrying argument of the `input(...)` built-in.
    #[must_use]
    pub const fn zero(ty: ValueType, pos: Position) -> Self {
        match ty {
            ValueType::Int => Self::int_literal(0, pos),
            ValueType::Float => Self::float_literal(0.0, pos),
            ValueType::Bool => Self::bool_literal(false, pos),
        }
    }

    /// Creates a variable reference with the type recorded for the name in
    /// the static symbol table.
    #[must_use]
    pub const fn variable(name: String, ty: ValueType, pos: Position) -> Self {
        Self { kind: ExprKind::Variable { name },
               ty,
               pos }
    }

    /// Creates an arithmetic negation node.
    ///
    /// # Errors
    /// Returns a [`TypeError`] if the operand is not numeric.
    pub fn negate(operand: Self, pos: Position) -> Result<Self, TypeError> {
        let ty = operand.ty;
        if !ty.is_numeric() {
            return Err(TypeError::InvalidNegation { operand: ty, pos });
        }
        Ok(Self { kind: ExprKind::Negate { operand: Box::new(operand), },
                  ty,
                  pos })
    }

    /// Creates a binary operation node, resolving its type with
    /// [`binary_expression_type`].
    ///
    /// # Errors
    /// Returns a [`TypeError`] if the operand types are incompatible with
    /// the operator.
    ///
    /// # Example
    /// ```
    /// use vesper::{
    ///     ast::{BinaryOperator, Expr, ValueType},
    ///     interpreter::lexer::Position,
    /// };
    ///
    /// let pos = Position { line: 1, column: 1 };
    /// let sum = Expr::binary(Expr::int_literal(1, pos),
    ///                        BinaryOperator::Add,
    ///                        Expr::float_literal(2.5, pos),
    ///                        pos).unwrap();
    /// assert_eq!(sum.ty, ValueType::Float);
    ///
    /// let bad = Expr::binary(Expr::bool_literal(true, pos),
    ///                        BinaryOperator::Add,
    ///                        Expr::int_literal(1, pos),
    ///                        pos);
    /// assert!(bad.is_err());
    /// ```
    pub fn binary(left: Self,
                  op: BinaryOperator,
                  right: Self,
                  pos: Position)
                  -> Result<Self, TypeError> {
        let Some(ty) = binary_expression_type(left.ty, op, right.ty) else {
            return Err(TypeError::InvalidBinaryOperands { op,
                                                          lhs: left.ty,
                                                          rhs: right.ty,
                                                          pos });
        };
        Ok(Self { kind: ExprKind::Binary { op,
                                           left: Box::new(left),
                                           right: Box::new(right), },
                  ty,
                  pos })
    }

    /// Creates an assignment node. The expression's type is the target's
    /// declared type.
    ///
    /// # Errors
    /// Returns a [`TypeError`] if the value is not assignable to the target
    /// per [`can_assign`].
    pub fn assign(name: String,
                  target: ValueType,
                  value: Self,
                  pos: Position)
                  -> Result<Self, TypeError> {
        if !can_assign(target, value.ty) {
            return Err(TypeError::NotAssignable { target,
                                                  source: value.ty,
                                                  pos });
        }
        Ok(Self { kind: ExprKind::Assign { name,
                                           value: Box::new(value), },
                  ty: target,
                  pos })
    }

    /// Creates a call node with the callee's declared return type.
    ///
    /// Argument count and assignability are validated by the parser against
    /// the static function table (or the built-in's signature) before this
    /// constructor runs.
    #[must_use]
    pub const fn call(name: String,
                      return_type: ValueType,
                      arguments: Vec<Self>,
                      pos: Position)
                      -> Self {
        Self { kind: ExprKind::Call { name, arguments },
               ty: return_type,
               pos }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared parameter type.
    pub ty:   ValueType,
}

/// A user-defined function declaration.
///
/// The static function table records only the signature; the full
/// declaration is owned by its `Stmt::FuncDecl` statement and registered in
/// the runtime function table when that statement executes, which keeps
/// declaration order observable at run time.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name.
    pub name:        String,
    /// The declared return type.
    pub return_type: ValueType,
    /// The declared parameters, in order.
    pub params:      Vec<Param>,
    /// The body block.
    pub body:        Stmt,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A braced block. Opens a fresh scope for the statements inside.
    Block(Vec<Stmt>),
    /// A variable declaration. The parser materializes the type-appropriate
    /// zero literal when the source carries no initializer.
    Decl {
        /// The declared type.
        ty:   ValueType,
        /// The variable name.
        name: String,
        /// The initializer expression.
        init: Expr,
    },
    /// An expression evaluated for its side effects.
    Expr(Expr),
    /// An `if` statement with an optional `else` branch.
    If {
        /// The boolean condition.
        condition:   Expr,
        /// Statement executed when the condition holds.
        then_branch: Box<Stmt>,
        /// Statement executed otherwise, if present.
        else_branch: Option<Box<Stmt>>,
    },
    /// A `while` loop.
    While {
        /// The boolean condition, tested before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Stmt>,
    },
    /// A `for` loop.
    For {
        /// Expression run once before the first test.
        init:      Expr,
        /// The boolean condition, tested before every iteration.
        condition: Expr,
        /// Expression run after every completed or continued iteration.
        update:    Expr,
        /// The loop body.
        body:      Box<Stmt>,
    },
    /// A `break` statement.
    Break,
    /// A `continue` statement.
    Continue,
    /// A `return` statement with an optional result expression.
    Return(Option<Expr>),
    /// A function declaration.
    FuncDecl(Rc<FunctionDecl>),
}

/// A parsed program: the top-level sequence of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The top-level declarations and statements, in source order.
    pub items: Vec<Stmt>,
}

// Canonical pretty-printing. Compound expressions print fully parenthesized
// and statements print one per line, so printing a parsed program and
// reparsing the output reaches a fixpoint.

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for item in &self.items {
            write_stmt(f, item, 0)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_stmt(f, self, 0)
    }
}

fn write_stmt(f: &mut std::fmt::Formatter<'_>, stmt: &Stmt, indent: usize) -> std::fmt::Result {
    let pad = "    ".repeat(indent);
    match stmt {
        Stmt::Block(items) => {
            writeln!(f, "{pad}{{")?;
            for item in items {
                write_stmt(f, item, indent + 1)?;
            }
            writeln!(f, "{pad}}}")
        },
        Stmt::Decl { ty, name, init } => writeln!(f, "{pad}{ty} {name} = {init};"),
        Stmt::Expr(expr) if matches!(expr.kind, ExprKind::Void) => writeln!(f, "{pad};"),
        Stmt::Expr(expr) => writeln!(f, "{pad}{expr};"),
        Stmt::If { condition,
                   then_branch,
                   else_branch, } => {
            writeln!(f, "{pad}if ({condition})")?;
            write_stmt(f, then_branch, indent + 1)?;
            if let Some(else_branch) = else_branch {
                writeln!(f, "{pad}else")?;
                write_stmt(f, else_branch, indent + 1)?;
            }
            Ok(())
        },
        Stmt::While { condition, body } => {
            writeln!(f, "{pad}while ({condition})")?;
            write_stmt(f, body, indent + 1)
        },
        Stmt::For { init,
                    condition,
                    update,
                    body, } => {
            writeln!(f, "{pad}for ({init}; {condition}; {update})")?;
            write_stmt(f, body, indent + 1)
        },
        Stmt::Break => writeln!(f, "{pad}break;"),
        Stmt::Continue => writeln!(f, "{pad}continue;"),
        Stmt::Return(None) => writeln!(f, "{pad}return;"),
        Stmt::Return(Some(value)) => writeln!(f, "{pad}return {value};"),
        Stmt::FuncDecl(func) => {
            write!(f, "{pad}function {}(", func.name)?;
            for (index, param) in func.params.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} {}", param.ty, param.name)?;
            }
            writeln!(f, "): {}", func.return_type)?;
            write_stmt(f, &func.body, indent)
        },
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::IntLit(value) => write!(f, "{value}"),
            ExprKind::FloatLit(value) => {
                // keep the decimal point so the literal re-lexes as a float
                if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            ExprKind::BoolLit(value) => write!(f, "{value}"),
            ExprKind::Void => Ok(()),
            ExprKind::Variable { name } => write!(f, "{name}"),
            ExprKind::Negate { operand } => write!(f, "(-{operand})"),
            ExprKind::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            ExprKind::Assign { name, value } => write!(f, "({name} = {value})"),
            ExprKind::Call { name, arguments } => {
                if name == "input" {
                    return match arguments.first() {
                        Some(argument) => write!(f, "input({})", argument.ty),
                        None => write!(f, "input()"),
                    };
                }
                write!(f, "{name}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position { line: 1, column: 1 };

    #[test]
    fn modulo_requires_integers() {
        assert_eq!(binary_expression_type(ValueType::Int, BinaryOperator::Mod, ValueType::Int),
                   Some(ValueType::Int));
        assert_eq!(binary_expression_type(ValueType::Float, BinaryOperator::Mod, ValueType::Int),
                   None);
    }

    #[test]
    fn relational_rejects_booleans() {
        assert_eq!(binary_expression_type(ValueType::Bool, BinaryOperator::Less, ValueType::Bool),
                   None);
        assert_eq!(binary_expression_type(ValueType::Int, BinaryOperator::Less, ValueType::Float),
                   Some(ValueType::Bool));
    }

    #[test]
    fn equality_matches_families() {
        assert_eq!(binary_expression_type(ValueType::Bool, BinaryOperator::Equal, ValueType::Bool),
                   Some(ValueType::Bool));
        assert_eq!(binary_expression_type(ValueType::Bool, BinaryOperator::Equal, ValueType::Int),
                   None);
    }

    #[test]
    fn negation_rejects_booleans() {
        assert!(Expr::negate(Expr::bool_literal(true, POS), POS).is_err());
        let negated = Expr::negate(Expr::float_literal(1.5, POS), POS).unwrap();
        assert_eq!(negated.ty, ValueType::Float);
    }

    #[test]
    fn assignment_takes_target_type() {
        let assigned =
            Expr::assign("x".to_string(), ValueType::Int, Expr::float_literal(1.9, POS), POS)
                .unwrap();
        assert_eq!(assigned.ty, ValueType::Int);

        assert!(Expr::assign("b".to_string(),
                             ValueType::Bool,
                             Expr::int_literal(1, POS),
                             POS).is_err());
    }
}
