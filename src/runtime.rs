//! Per-call evaluation state.
//!
//! Compilation produces one template context holding the constants' values;
//! every call clones the template, binds its arguments, and evaluates on
//! the clone. Contexts are therefore never shared between threads.

use crate::frontend::symbol::SymbolTable;

/// Mutable state of one function evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    values: SymbolTable,
    return_value: Option<i64>,
    division_by_zero: bool,
}

impl EvaluationContext {
    /// Create a context whose value table starts as a copy of the analyzed
    /// symbol table (constants carry their declared values).
    pub fn new(symbol_table: &SymbolTable) -> Self {
        Self {
            values: symbol_table.clone(),
            return_value: None,
            division_by_zero: false,
        }
    }

    /// Current value of a name. Analysis guarantees every evaluated name
    /// exists and is initialized.
    pub fn value(&self, name: &str) -> i64 {
        self.values
            .get(name)
            .expect("evaluated name was resolved during analysis")
            .value
    }

    /// Store a value for a name.
    pub fn set_value(&mut self, name: &str, value: i64) {
        if let Some(symbol) = self.values.get_mut(name) {
            symbol.initialized = true;
            symbol.value = value;
        }
    }

    /// The value set by an executed return statement, if any yet.
    pub fn return_value(&self) -> Option<i64> {
        self.return_value
    }

    /// Record the function result. Only the first executed return statement
    /// ever calls this; evaluation stops once the value is set.
    pub fn set_return_value(&mut self, value: i64) {
        debug_assert!(self.return_value.is_none());
        self.return_value = Some(value);
    }

    /// Whether a division by zero happened during this call.
    pub fn division_by_zero(&self) -> bool {
        self.division_by_zero
    }

    /// Mark the call as having divided by zero. Idempotent; the flag stays
    /// set for the rest of the call.
    pub fn flag_division_by_zero(&mut self) {
        self.division_by_zero = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::symbol::{Symbol, SymbolKind};
    use crate::utils::location::SourceSpan;

    fn table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.insert("a", Symbol::new(SymbolKind::Parameter, SourceSpan::default()));
        table.insert("e", Symbol::constant(5, SourceSpan::default()));
        table
    }

    #[test]
    fn test_template_carries_constants() {
        let context = EvaluationContext::new(&table());
        assert_eq!(context.value("e"), 5);
        assert_eq!(context.return_value(), None);
        assert!(!context.division_by_zero());
    }

    #[test]
    fn test_clone_isolates_calls() {
        let template = EvaluationContext::new(&table());
        let mut call = template.clone();
        call.set_value("a", 9);
        call.set_return_value(9);
        call.flag_division_by_zero();
        assert_eq!(template.value("a"), 0);
        assert_eq!(template.return_value(), None);
        assert!(!template.division_by_zero());
        assert_eq!(call.value("a"), 9);
    }

    #[test]
    fn test_flag_is_idempotent() {
        let mut context = EvaluationContext::new(&table());
        context.flag_division_by_zero();
        context.flag_division_by_zero();
        assert!(context.division_by_zero());
    }
}
