//! Error types for the compilation pipeline.
//!
//! Every phase reports failure through its own error type; all of them have
//! already been printed to stderr in source context by the time they are
//! returned, so callers only decide whether to keep going.

use crate::utils::location::SourceSpan;
use std::fmt;
use thiserror::Error;

/// Top-level error type covering every compilation phase.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Error during lexing
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexicalError),

    /// Error during parsing
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Error during semantic analysis
    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

/// Error during lexical analysis.
#[derive(Error, Debug, Clone)]
pub struct LexicalError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: SourceSpan,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Error during parsing.
#[derive(Error, Debug, Clone)]
pub struct SyntaxError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: SourceSpan,
    /// The kind of syntax error
    pub kind: SyntaxErrorKind,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Classification of syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Token other than the one the grammar requires
    UnexpectedToken,
    /// An opening parenthesis without a matching closing one
    UnmatchedParenthesis,
    /// Literal that does not fit a 64-bit signed integer
    InvalidLiteral,
}

/// Error during semantic analysis.
#[derive(Error, Debug, Clone)]
pub struct SemanticError {
    /// The error message
    pub message: String,
    /// Location in source (absent for whole-function errors)
    pub span: Option<SourceSpan>,
    /// The kind of semantic error
    pub kind: SemanticErrorKind,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "{} at {}", self.message, span)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Classification of semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// An identifier declared more than once
    DuplicateDeclaration,
    /// Use of an identifier that was never declared
    UndeclaredIdentifier,
    /// Read of a variable before any assignment to it
    UninitializedVariable,
    /// Assignment targeting a constant
    ConstantAssignment,
    /// Function body without a return statement
    MissingReturn,
}

/// Error raised by evaluation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// Division or remainder by zero during evaluation
    #[error("Division by zero error")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyntaxError {
            message: "Expected \".\" DOT".to_string(),
            span: SourceSpan::new(2, 4, 1),
            kind: SyntaxErrorKind::UnexpectedToken,
        };
        assert_eq!(format!("{err}"), "Expected \".\" DOT at 2:4");

        let err = SemanticError {
            message: "Missing return statement.".to_string(),
            span: None,
            kind: SemanticErrorKind::MissingReturn,
        };
        assert_eq!(format!("{err}"), "Missing return statement.");
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: CompileError = LexicalError {
            message: "Unexpected Character".to_string(),
            span: SourceSpan::new(0, 0, 1),
        }
        .into();
        assert!(matches!(err, CompileError::Lexical(_)));
    }
}
