//! Semantic analysis: parse tree to typed AST plus symbol table.
//!
//! A single pass registers declarations in order, then walks the statement
//! list. Name resolution, initialization tracking, and the
//! one-return-statement requirement are all checked here; the evaluator
//! relies on these checks and re-validates nothing.

use crate::frontend::ast::{BinaryOp, Expr, Function, Stmt, UnaryOp};
use crate::frontend::parse_tree::{ParseNode, Rule};
use crate::frontend::symbol::{Symbol, SymbolKind, SymbolTable};
use crate::frontend::token::TokenKind;
use crate::utils::errors::{SemanticError, SemanticErrorKind};
use crate::utils::location::{SourceCode, SourceSpan};

/// Analyze a parsed function definition.
///
/// On success returns the AST together with the symbol table describing
/// every declared name.
pub fn analyze(
    tree: &ParseNode,
    source: &SourceCode,
) -> Result<(Function, SymbolTable), SemanticError> {
    SemanticAnalyzer {
        source,
        symbols: SymbolTable::new(),
    }
    .run(tree)
}

struct SemanticAnalyzer<'a> {
    source: &'a SourceCode,
    symbols: SymbolTable,
}

impl SemanticAnalyzer<'_> {
    fn run(mut self, tree: &ParseNode) -> Result<(Function, SymbolTable), SemanticError> {
        let mut statements = Vec::new();
        let mut has_return = false;
        for child in tree.children() {
            match child.rule() {
                Some(Rule::ParameterDeclarations) => {
                    self.declare_section(child, SymbolKind::Parameter)?
                }
                Some(Rule::VariableDeclarations) => {
                    self.declare_section(child, SymbolKind::Variable)?
                }
                Some(Rule::ConstantDeclarations) => self.declare_constants(child)?,
                Some(Rule::CompoundStatement) => {
                    // statement-list interleaves statements and semicolons
                    let list = &child.children()[1];
                    for node in list.children().iter().step_by(2) {
                        let statement = self.analyze_statement(node)?;
                        has_return |= matches!(statement, Stmt::Return { .. });
                        statements.push(statement);
                    }
                }
                _ => {}
            }
        }
        if !has_return {
            return Err(self.error(
                "Missing return statement.",
                None,
                SemanticErrorKind::MissingReturn,
            ));
        }
        Ok((Function { statements }, self.symbols))
    }

    fn declare_section(
        &mut self,
        section: &ParseNode,
        kind: SymbolKind,
    ) -> Result<(), SemanticError> {
        let list = &section.children()[1];
        for node in list.children().iter().step_by(2) {
            if let ParseNode::Identifier { name, span } = node {
                self.declare(name, Symbol::new(kind, *span), *span)?;
            }
        }
        Ok(())
    }

    fn declare_constants(&mut self, section: &ParseNode) -> Result<(), SemanticError> {
        let list = &section.children()[1];
        for declarator in list.children().iter().step_by(2) {
            let parts = declarator.children();
            if let (
                ParseNode::Identifier { name, span },
                ParseNode::Literal { value, .. },
            ) = (&parts[0], &parts[2])
            {
                self.declare(name, Symbol::constant(*value, *span), *span)?;
            }
        }
        Ok(())
    }

    fn declare(&mut self, name: &str, symbol: Symbol, span: SourceSpan) -> Result<(), SemanticError> {
        if !self.symbols.insert(name, symbol) {
            return Err(self.error(
                "The same identifier being declared twice.",
                Some(span),
                SemanticErrorKind::DuplicateDeclaration,
            ));
        }
        Ok(())
    }

    fn analyze_statement(&mut self, statement: &ParseNode) -> Result<Stmt, SemanticError> {
        let children = statement.children();
        if let ParseNode::Token {
            kind: TokenKind::Return,
            ..
        } = &children[0]
        {
            let expr = self.analyze_additive(&children[1])?;
            return Ok(Stmt::Return { expr });
        }

        // assignment-expression: identifier := additive-expression
        let parts = children[0].children();
        let (name, span) = match &parts[0] {
            ParseNode::Identifier { name, span } => (name.clone(), *span),
            _ => unreachable!("assignment target is an identifier"),
        };
        let kind = match self.symbols.get(&name) {
            Some(symbol) => symbol.kind,
            None => {
                return Err(self.error(
                    "Using an undeclared identifier.",
                    Some(span),
                    SemanticErrorKind::UndeclaredIdentifier,
                ))
            }
        };
        if kind == SymbolKind::Constant {
            return Err(self.error(
                "Assigning a value to a constant.",
                Some(span),
                SemanticErrorKind::ConstantAssignment,
            ));
        }
        // the target counts as initialized from here on, the right-hand
        // side included
        if let Some(symbol) = self.symbols.get_mut(&name) {
            symbol.initialized = true;
        }
        let expr = self.analyze_additive(&parts[2])?;
        Ok(Stmt::Assignment { name, expr })
    }

    fn analyze_additive(&mut self, node: &ParseNode) -> Result<Expr, SemanticError> {
        let children = node.children();
        let left = self.analyze_multiplicative(&children[0])?;
        if children.len() < 3 {
            return Ok(left);
        }
        let op = match token_kind(&children[1]) {
            TokenKind::Plus => BinaryOp::Add,
            _ => BinaryOp::Subtract,
        };
        let right = self.analyze_additive(&children[2])?;
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn analyze_multiplicative(&mut self, node: &ParseNode) -> Result<Expr, SemanticError> {
        let children = node.children();
        let left = self.analyze_unary(&children[0])?;
        if children.len() < 3 {
            return Ok(left);
        }
        let op = match token_kind(&children[1]) {
            TokenKind::Star => BinaryOp::Multiply,
            _ => BinaryOp::Divide,
        };
        let right = self.analyze_multiplicative(&children[2])?;
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn analyze_unary(&mut self, node: &ParseNode) -> Result<Expr, SemanticError> {
        let children = node.children();
        if children.len() < 2 {
            return self.analyze_primary(&children[0]);
        }
        let op = match token_kind(&children[0]) {
            TokenKind::Plus => UnaryOp::Plus,
            _ => UnaryOp::Minus,
        };
        let child = self.analyze_primary(&children[1])?;
        Ok(Expr::Unary {
            op,
            child: Box::new(child),
        })
    }

    fn analyze_primary(&mut self, node: &ParseNode) -> Result<Expr, SemanticError> {
        let children = node.children();
        match &children[0] {
            ParseNode::Identifier { name, span } => match self.symbols.get(name) {
                None => Err(self.error(
                    "Using an undeclared identifier.",
                    Some(*span),
                    SemanticErrorKind::UndeclaredIdentifier,
                )),
                Some(symbol) if !symbol.initialized => Err(self.error(
                    "Using an uninitialized variable.",
                    Some(*span),
                    SemanticErrorKind::UninitializedVariable,
                )),
                Some(_) => Ok(Expr::Identifier(name.clone())),
            },
            ParseNode::Literal { value, .. } => Ok(Expr::Literal(*value)),
            // parenthesized expression; the parentheses drop out of the AST
            _ => self.analyze_additive(&children[1]),
        }
    }

    /// Report the error in source context (whole-function errors carry no
    /// span and print as a bare line) and build the error value.
    fn error(
        &self,
        message: &str,
        span: Option<SourceSpan>,
        kind: SemanticErrorKind,
    ) -> SemanticError {
        match span {
            Some(span) => self.source.report(span, message),
            None => eprintln!("{message}"),
        }
        SemanticError {
            message: message.to_string(),
            span,
            kind,
        }
    }
}

fn token_kind(node: &ParseNode) -> TokenKind {
    match node {
        ParseNode::Token { kind, .. } => *kind,
        _ => unreachable!("operator position holds a token"),
    }
}
