//! Constant propagation.
//!
//! The pass re-simulates the straight-line statement list on its own copy
//! of the symbol table: variables start uninitialized again, and each
//! assignment whose right-hand side folds to a constant records that value
//! for later statements. A statement whose top-level expression folds
//! completely is rewritten to a plain literal; partial subexpressions are
//! left alone. Folding mirrors evaluation semantics, so division by a
//! constant zero blocks folding instead of producing a value.

use crate::frontend::ast::{BinaryOp, Expr, Function, Stmt, UnaryOp};
use crate::frontend::symbol::{SymbolKind, SymbolTable};
use crate::transform::OptimizationPass;

/// Folds constant expressions and propagates known variable values.
pub struct ConstantPropagation {
    symbols: SymbolTable,
}

impl ConstantPropagation {
    /// Create the pass with a working copy of the analyzed symbol table.
    pub fn new(symbols: &SymbolTable) -> Self {
        let mut symbols = symbols.clone();
        symbols.reset_variables();
        Self { symbols }
    }

    /// Constant value of an expression at the current simulation point,
    /// if it has one.
    fn fold(&self, expr: &Expr) -> Option<i64> {
        match expr {
            Expr::Literal(value) => Some(*value),
            Expr::Identifier(name) => {
                let symbol = self.symbols.get(name)?;
                match symbol.kind {
                    SymbolKind::Constant => Some(symbol.value),
                    // parameters never have compile-time values; variables
                    // only once the simulation has assigned them one
                    SymbolKind::Variable if symbol.initialized => Some(symbol.value),
                    _ => None,
                }
            }
            Expr::Unary { op, child } => {
                let value = self.fold(child)?;
                match op {
                    UnaryOp::Plus => Some(value),
                    UnaryOp::Minus => Some(value.wrapping_neg()),
                }
            }
            Expr::Binary { op, left, right } => {
                let left = self.fold(left)?;
                let right = self.fold(right)?;
                match op {
                    BinaryOp::Add => Some(left.wrapping_add(right)),
                    BinaryOp::Subtract => Some(left.wrapping_sub(right)),
                    BinaryOp::Multiply => Some(left.wrapping_mul(right)),
                    BinaryOp::Divide => (right != 0).then(|| left.wrapping_div(right)),
                }
            }
        }
    }
}

impl OptimizationPass for ConstantPropagation {
    fn name(&self) -> &'static str {
        "constant-propagation"
    }

    fn optimize(&mut self, function: &mut Function) {
        for statement in &mut function.statements {
            match statement {
                Stmt::Assignment { name, expr } => {
                    let Some(value) = self.fold(expr) else {
                        // unknown right-hand side invalidates the target
                        if let Some(symbol) = self.symbols.get_mut(name.as_str()) {
                            symbol.initialized = false;
                        }
                        continue;
                    };
                    if let Some(symbol) = self.symbols.get_mut(name.as_str()) {
                        symbol.initialized = true;
                        symbol.value = value;
                    }
                    if !expr.is_literal() {
                        *expr = Expr::Literal(value);
                    }
                }
                Stmt::Return { expr } => {
                    if let Some(value) = self.fold(expr) {
                        if !expr.is_literal() {
                            *expr = Expr::Literal(value);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use crate::frontend::semantic::analyze;
    use crate::utils::location::SourceCode;

    fn optimized(text: &str) -> Function {
        let source = SourceCode::new(text);
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let (mut function, symbols) = analyze(&tree, &source).unwrap();
        ConstantPropagation::new(&symbols).optimize(&mut function);
        function
    }

    #[test]
    fn test_folds_constant_return() {
        let function = optimized("BEGIN RETURN +42 + -42 END.");
        assert_eq!(
            function.statements,
            vec![Stmt::Return {
                expr: Expr::Literal(0)
            }]
        );
    }

    #[test]
    fn test_propagates_through_assignments() {
        let function = optimized("VAR a, b;\nBEGIN a := 2 * 3;\nb := a + 1;\nRETURN b END.");
        assert_eq!(function.statements[0].expr(), &Expr::Literal(6));
        assert_eq!(function.statements[1].expr(), &Expr::Literal(7));
        assert_eq!(function.statements[2].expr(), &Expr::Literal(7));
    }

    #[test]
    fn test_constants_fold_parameters_do_not() {
        let function = optimized("PARAM a;\nCONST e = 4;\nBEGIN RETURN a + e * 2 END.");
        // e * 2 is not a top-level expression, so the statement stays as is
        assert!(matches!(
            function.statements[0].expr(),
            Expr::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn test_parameter_poisons_later_uses() {
        let function =
            optimized("PARAM p;\nVAR a;\nBEGIN a := p;\na := a;\nRETURN a + 0 END.");
        for statement in &function.statements {
            assert!(!statement.expr().is_literal());
        }
    }

    #[test]
    fn test_division_by_constant_zero_is_not_folded() {
        let function = optimized("BEGIN RETURN 1 / 0 END.");
        assert!(matches!(
            function.statements[0].expr(),
            Expr::Binary {
                op: BinaryOp::Divide,
                ..
            }
        ));
    }

    #[test]
    fn test_idempotent() {
        let source = SourceCode::new("VAR a;\nBEGIN a := 1 + 2;\nRETURN a END.");
        let tree = Parser::new(&source).parse_function_definition().unwrap();
        let (mut function, symbols) = analyze(&tree, &source).unwrap();
        ConstantPropagation::new(&symbols).optimize(&mut function);
        let once = function.clone();
        ConstantPropagation::new(&symbols).optimize(&mut function);
        assert_eq!(function, once);
    }
}
