//! Dead-code elimination.
//!
//! Evaluation stops at the first executed return statement, and the
//! statement list is straight-line, so everything after the last reachable
//! return is dead. The pass drops trailing statements until the list ends
//! with a return; it is not needed for correctness, only to shrink the
//! tree.

use crate::frontend::ast::{Function, Stmt};
use crate::transform::OptimizationPass;

/// Removes statements after the function's final return.
pub struct DeadCodeElimination;

impl OptimizationPass for DeadCodeElimination {
    fn name(&self) -> &'static str {
        "dead-code-elimination"
    }

    fn optimize(&mut self, function: &mut Function) {
        while matches!(
            function.statements.last(),
            Some(statement) if !matches!(statement, Stmt::Return { .. })
        ) {
            function.statements.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::Expr;

    fn assign(name: &str, value: i64) -> Stmt {
        Stmt::Assignment {
            name: name.to_string(),
            expr: Expr::Literal(value),
        }
    }

    fn ret(value: i64) -> Stmt {
        Stmt::Return {
            expr: Expr::Literal(value),
        }
    }

    #[test]
    fn test_drops_statements_after_return() {
        let mut function = Function {
            statements: vec![assign("a", 1), ret(2), assign("b", 3), assign("c", 4)],
        };
        DeadCodeElimination.optimize(&mut function);
        assert_eq!(function.statements, vec![assign("a", 1), ret(2)]);
    }

    #[test]
    fn test_keeps_intermediate_returns() {
        let mut function = Function {
            statements: vec![ret(1), assign("a", 2), ret(3)],
        };
        DeadCodeElimination.optimize(&mut function);
        assert_eq!(function.statements.len(), 3);
    }

    #[test]
    fn test_noop_when_return_is_last() {
        let mut function = Function {
            statements: vec![assign("a", 1), ret(2)],
        };
        let before = function.clone();
        DeadCodeElimination.optimize(&mut function);
        assert_eq!(function, before);
    }
}
