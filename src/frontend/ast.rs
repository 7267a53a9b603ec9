//! Typed abstract syntax tree and its tree-walking evaluator.
//!
//! The AST drops all syntactic noise from the parse tree: no parentheses,
//! keywords, or separators, just expressions, statements, and the function
//! that owns them. Nodes own their children, so dropping the function frees
//! the whole tree.

use crate::runtime::EvaluationContext;
use std::fmt;

/// Sign applied by a unary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+`, the identity
    Plus,
    /// `-`, negation
    Minus,
}

/// Operator of a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Minus => write!(f, "-"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Subtract => write!(f, "-"),
            BinaryOp::Multiply => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer constant
    Literal(i64),
    /// A reference to a declared name
    Identifier(String),
    /// A signed subexpression
    Unary {
        /// The sign
        op: UnaryOp,
        /// The operand
        child: Box<Expr>,
    },
    /// An arithmetic combination of two subexpressions
    Binary {
        /// The operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `name := expr`
    Assignment {
        /// Target name
        name: String,
        /// Value expression
        expr: Expr,
    },
    /// `RETURN expr`
    Return {
        /// Result expression
        expr: Expr,
    },
}

/// A whole analyzed function: its statements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Statements in source order
    pub statements: Vec<Stmt>,
}

impl Expr {
    /// Evaluate the expression against the context's value table.
    ///
    /// Arithmetic wraps on overflow. Division by zero sets the context flag
    /// and yields a placeholder zero; evaluation keeps going so a single
    /// call either finishes or is rejected as a whole.
    pub fn evaluate(&self, context: &mut EvaluationContext) -> i64 {
        match self {
            Expr::Literal(value) => *value,
            Expr::Identifier(name) => context.value(name),
            Expr::Unary { op, child } => {
                let value = child.evaluate(context);
                match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => value.wrapping_neg(),
                }
            }
            Expr::Binary { op, left, right } => match op {
                BinaryOp::Add => left.evaluate(context).wrapping_add(right.evaluate(context)),
                BinaryOp::Subtract => left.evaluate(context).wrapping_sub(right.evaluate(context)),
                BinaryOp::Multiply => left.evaluate(context).wrapping_mul(right.evaluate(context)),
                BinaryOp::Divide => {
                    let divisor = right.evaluate(context);
                    if divisor == 0 {
                        context.flag_division_by_zero();
                        return 0;
                    }
                    left.evaluate(context).wrapping_div(divisor)
                }
            },
        }
    }

    /// Whether this expression is a plain literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

impl Stmt {
    /// Execute the statement. Assignments yield the stored value, returns
    /// yield the returned value.
    pub fn evaluate(&self, context: &mut EvaluationContext) -> i64 {
        match self {
            Stmt::Assignment { name, expr } => {
                let value = expr.evaluate(context);
                context.set_value(name, value);
                value
            }
            Stmt::Return { expr } => {
                let value = expr.evaluate(context);
                context.set_return_value(value);
                value
            }
        }
    }

    /// The statement's top-level expression.
    pub fn expr(&self) -> &Expr {
        match self {
            Stmt::Assignment { expr, .. } | Stmt::Return { expr } => expr,
        }
    }
}

impl Function {
    /// Execute statements in order until one sets the return value.
    ///
    /// Analysis guarantees at least one return statement, so falling off
    /// the end is unreachable.
    pub fn evaluate(&self, context: &mut EvaluationContext) -> i64 {
        for statement in &self.statements {
            statement.evaluate(context);
            if let Some(value) = context.return_value() {
                return value;
            }
        }
        unreachable!("function body without an executed return statement")
    }
}
