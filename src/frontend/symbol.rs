//! Symbol table built during semantic analysis.
//!
//! The table keeps declaration order so that positional call arguments can
//! be bound to parameters deterministically, and it doubles as the value
//! store inside an evaluation context.

use crate::utils::location::SourceSpan;
use std::collections::HashMap;

/// What kind of name a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Declared in the `PARAM` section, bound at call time
    Parameter,
    /// Declared in the `VAR` section, must be assigned before use
    Variable,
    /// Declared in the `CONST` section with a fixed value
    Constant,
}

/// One declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Parameter, variable, or constant
    pub kind: SymbolKind,
    /// Whether the name holds a value at the current analysis point.
    /// Parameters and constants start initialized; variables do not.
    pub initialized: bool,
    /// Current value (constants: the declared value)
    pub value: i64,
    /// Where the name was declared
    pub declaration: SourceSpan,
}

impl Symbol {
    /// Create a symbol for a fresh declaration.
    pub fn new(kind: SymbolKind, declaration: SourceSpan) -> Self {
        Self {
            kind,
            initialized: kind != SymbolKind::Variable,
            value: 0,
            declaration,
        }
    }

    /// Create a constant with its declared value.
    pub fn constant(value: i64, declaration: SourceSpan) -> Self {
        Self {
            kind: SymbolKind::Constant,
            initialized: true,
            value,
            declaration,
        }
    }
}

/// Name-to-symbol map preserving declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    order: Vec<String>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new symbol. Returns `false` without touching the table when
    /// the name is already declared.
    pub fn insert(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(name.to_string(), symbol);
        self.order.push(name.to_string());
        true
    }

    /// Look up a symbol by name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Look up a symbol for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    /// Iterate symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.order.iter().map(|name| {
            let symbol = &self.symbols[name];
            (name.as_str(), symbol)
        })
    }

    /// Parameter names in declaration order; this is the positional
    /// argument binding order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, symbol)| symbol.kind == SymbolKind::Parameter)
            .map(|(name, _)| name)
    }

    /// Mark every variable uninitialized again, keeping parameters and
    /// constants as they are.
    pub fn reset_variables(&mut self) {
        for symbol in self.symbols.values_mut() {
            if symbol.kind == SymbolKind::Variable {
                symbol.initialized = false;
            }
        }
    }

    /// Number of declared symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 0, 1)
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = SymbolTable::new();
        assert!(table.insert("a", Symbol::new(SymbolKind::Parameter, span())));
        assert!(!table.insert("a", Symbol::new(SymbolKind::Variable, span())));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().kind, SymbolKind::Parameter);
    }

    #[test]
    fn test_initialization_defaults() {
        assert!(Symbol::new(SymbolKind::Parameter, span()).initialized);
        assert!(!Symbol::new(SymbolKind::Variable, span()).initialized);
        let constant = Symbol::constant(7, span());
        assert!(constant.initialized);
        assert_eq!(constant.value, 7);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let mut table = SymbolTable::new();
        table.insert("b", Symbol::new(SymbolKind::Parameter, span()));
        table.insert("c", Symbol::new(SymbolKind::Variable, span()));
        table.insert("a", Symbol::new(SymbolKind::Parameter, span()));
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        let params: Vec<&str> = table.parameters().collect();
        assert_eq!(params, vec!["b", "a"]);
    }

    #[test]
    fn test_reset_variables() {
        let mut table = SymbolTable::new();
        table.insert("p", Symbol::new(SymbolKind::Parameter, span()));
        let mut var = Symbol::new(SymbolKind::Variable, span());
        var.initialized = true;
        var.value = 3;
        table.insert("v", var);
        table.reset_variables();
        assert!(table.get("p").unwrap().initialized);
        assert!(!table.get("v").unwrap().initialized);
    }
}
