use std::collections::HashMap;

use crate::{
    ast::ValueType,
    error::SymbolError,
    interpreter::{evaluator::builtin::BUILTIN_FUNCTIONS, lexer::Position},
};

/// The static symbol table: a stack of scopes mapping names to their
/// declared types.
///
/// The parser pushes a scope at every `{...}` block and at each function
/// declaration, and pops it when the construct closes, so the table always
/// describes exactly the names visible at the current parse position.
pub struct SymbolTable {
    scopes: Vec<HashMap<String, ValueType>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()], }
    }

    /// Opens a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Number of currently open scopes, the global one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `name` with type `ty` in the innermost scope.
    ///
    /// Shadowing a name from an outer scope is allowed; declaring a name
    /// twice in the same scope is not.
    ///
    /// # Errors
    /// Returns [`SymbolError::Redeclaration`] if the innermost scope
    /// already declares `name`.
    pub fn insert(&mut self, name: &str, ty: ValueType, pos: Position) -> Result<(), SymbolError> {
        let scope = self.scopes.last_mut().expect("at least the global scope");
        if scope.contains_key(name) {
            return Err(SymbolError::Redeclaration { name: name.to_string(),
                                                    pos });
        }
        scope.insert(name.to_string(), ty);
        Ok(())
    }

    /// Looks up `name`, searching from the innermost scope outward, and
    /// returns its declared type.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ValueType> {
        for scope in self.scopes.iter().rev() {
            if let Some(ty) = scope.get(name) {
                return Some(*ty);
            }
        }
        None
    }
}

/// The parse-time signature of a declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    /// The declared return type.
    pub return_type: ValueType,
    /// The declared parameter types, in order.
    pub params:      Vec<ValueType>,
}

/// The static function table, mapping function names to their signatures.
///
/// A signature is registered as soon as the function's header is parsed,
/// before its body, so a body may call the function being declared.
#[derive(Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionSignature>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function signature.
    ///
    /// # Errors
    /// Returns a [`SymbolError`] if `name` is a built-in or has already
    /// been declared.
    pub fn add(&mut self,
               name: &str,
               signature: FunctionSignature,
               pos: Position)
               -> Result<(), SymbolError> {
        if BUILTIN_FUNCTIONS.contains(&name) {
            return Err(SymbolError::BuiltinRedefinition { name: name.to_string(),
                                                          pos });
        }
        if self.functions.contains_key(name) {
            return Err(SymbolError::FunctionRedeclaration { name: name.to_string(),
                                                            pos });
        }
        self.functions.insert(name.to_string(), signature);
        Ok(())
    }

    /// Looks up the signature registered for `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position { line: 1, column: 1 };

    #[test]
    fn lookup_walks_outward_and_shadowing_wins() {
        let mut symbols = SymbolTable::new();
        symbols.insert("x", ValueType::Int, POS).unwrap();

        symbols.push_scope();
        assert_eq!(symbols.find("x"), Some(ValueType::Int));

        symbols.insert("x", ValueType::Float, POS).unwrap();
        assert_eq!(symbols.find("x"), Some(ValueType::Float));

        symbols.pop_scope();
        assert_eq!(symbols.find("x"), Some(ValueType::Int));
    }

    #[test]
    fn redeclaration_in_the_same_scope_is_rejected() {
        let mut symbols = SymbolTable::new();
        symbols.insert("x", ValueType::Int, POS).unwrap();
        assert!(symbols.insert("x", ValueType::Int, POS).is_err());
    }

    #[test]
    fn names_vanish_when_their_scope_closes() {
        let mut symbols = SymbolTable::new();
        symbols.push_scope();
        symbols.insert("local", ValueType::Bool, POS).unwrap();
        symbols.pop_scope();
        assert_eq!(symbols.find("local"), None);
    }

    #[test]
    fn builtins_cannot_be_redeclared() {
        let mut functions = FunctionTable::new();
        let signature = FunctionSignature { return_type: ValueType::Int,
                                            params:      Vec::new(), };
        assert!(functions.add("println", signature, POS).is_err());
    }

    #[test]
    fn duplicate_functions_are_rejected() {
        let mut functions = FunctionTable::new();
        let signature = FunctionSignature { return_type: ValueType::Int,
                                            params:      vec![ValueType::Int], };
        functions.add("twice", signature.clone(), POS).unwrap();
        assert!(functions.add("twice", signature, POS).is_err());
    }
}
