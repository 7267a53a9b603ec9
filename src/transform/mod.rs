//! Optimization passes over the AST.

pub mod const_prop;
pub mod dead_code;

pub use const_prop::ConstantPropagation;
pub use dead_code::DeadCodeElimination;

use crate::frontend::ast::Function;
use crate::frontend::symbol::SymbolTable;
use log::debug;

/// An AST-to-AST rewrite.
pub trait OptimizationPass {
    /// Pass name for logging.
    fn name(&self) -> &'static str;

    /// Rewrite the function in place.
    fn optimize(&mut self, function: &mut Function);
}

/// Run the standard pass pipeline: dead-code elimination first, so constant
/// propagation never folds statements that cannot execute.
pub fn optimize(function: &mut Function, symbols: &SymbolTable) {
    let mut passes: Vec<Box<dyn OptimizationPass>> = vec![
        Box::new(DeadCodeElimination),
        Box::new(ConstantPropagation::new(symbols)),
    ];
    for pass in &mut passes {
        pass.optimize(function);
        debug!("{} done, {} statements remain", pass.name(), function.statements.len());
    }
}
