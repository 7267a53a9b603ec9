//! Token definitions for the language.

use crate::utils::location::SourceSpan;
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    /// `PARAM`
    Param,
    /// `VAR`
    Var,
    /// `CONST`
    Const,
    /// `BEGIN`
    Begin,
    /// `END`
    End,
    /// `RETURN`
    Return,

    // Identifiers and literals
    /// A run of letters that is not a keyword
    Identifier,
    /// A run of decimal digits
    Literal,

    // Operators and separators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Equal,
    /// `:=`
    Assign,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,

    // Sentinels
    /// A character the lexer could not match
    Error,
    /// End of the source program
    EndOfInput,
}

impl TokenKind {
    /// Look up the keyword kind for a letter run, if it is one.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        match text {
            "PARAM" => Some(TokenKind::Param),
            "VAR" => Some(TokenKind::Var),
            "CONST" => Some(TokenKind::Const),
            "BEGIN" => Some(TokenKind::Begin),
            "END" => Some(TokenKind::End),
            "RETURN" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Param => "PARAM",
            TokenKind::Var => "VAR",
            TokenKind::Const => "CONST",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Return => "RETURN",
            TokenKind::Identifier => "identifier",
            TokenKind::Literal => "literal",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::Assign => ":=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Error => "error",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token: a kind plus the source region it was read from.
///
/// The token carries no text of its own; the characters are recovered from
/// the source store through the span when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What was recognized
    pub kind: TokenKind,
    /// Where it sits in the source
    pub span: SourceSpan,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Whether this token marks the end of the source program.
    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}
