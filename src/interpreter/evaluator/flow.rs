use crate::interpreter::value::Value;

/// The verdict a statement execution produces.
///
/// `break`, `continue` and `return` are ordinary return values of
/// `execute`, not unwinding mechanisms: every enclosing construct inspects
/// the verdict and either absorbs it (loops absorb `Broken` and
/// `Continued`, calls absorb `Returned`) or forwards it outward.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution fell through normally.
    Normal,
    /// A `break` is looking for its enclosing loop.
    Broken,
    /// A `continue` is looking for its enclosing loop.
    Continued,
    /// A `return` is looking for its enclosing call, carrying the returned
    /// value if the statement had one.
    Returned(Option<Value>),
}
