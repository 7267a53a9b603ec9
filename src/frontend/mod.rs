//! Frontend: lexer, parser, and semantic analysis.
//!
//! The input language is a small PL/0-style language. A program declares
//! parameters, variables, and constants, then computes a single value:
//!
//! ```text
//! PARAM width, height, depth;
//! VAR volume;
//! CONST density = 2400;
//! BEGIN
//!     volume := width * height * depth;
//!     RETURN density * volume
//! END.
//! ```

pub mod ast;
pub mod lexer;
pub mod parse_tree;
pub mod parser;
pub mod semantic;
pub mod symbol;
pub mod token;

pub use ast::{Expr, Function, Stmt};
pub use lexer::Lexer;
pub use parse_tree::{ParseNode, Rule};
pub use parser::Parser;
pub use symbol::{Symbol, SymbolKind, SymbolTable};
pub use token::{Token, TokenKind};

use crate::utils::errors::{CompileError, SyntaxError};
use crate::utils::location::SourceCode;

/// Parse source code into a parse tree.
pub fn parse(source: &SourceCode) -> Result<ParseNode, SyntaxError> {
    Parser::new(source).parse_function_definition()
}

/// Parse and analyze source code into an AST plus symbol table.
pub fn parse_and_analyze(source: &SourceCode) -> Result<(Function, SymbolTable), CompileError> {
    let tree = parse(source)?;
    let analyzed = semantic::analyze(&tree, source)?;
    Ok(analyzed)
}
