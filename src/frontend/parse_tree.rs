//! Concrete parse tree produced by the parser.
//!
//! The tree keeps every terminal the parser consumed, keywords and
//! separators included, so debug output can reproduce the program exactly.
//! Grammar shape is fixed at construction; later phases walk the tree by
//! matching on [`Rule`] tags without re-validating it.

use crate::frontend::token::TokenKind;
use crate::utils::location::SourceSpan;

/// Grammar rule tags for non-terminal nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Whole program: optional declaration sections, body, final `.`
    FunctionDefinition,
    /// `PARAM declarator-list ;`
    ParameterDeclarations,
    /// `VAR declarator-list ;`
    VariableDeclarations,
    /// `CONST init-declarator-list ;`
    ConstantDeclarations,
    /// `identifier { , identifier }`
    DeclaratorList,
    /// `init-declarator { , init-declarator }`
    InitDeclaratorList,
    /// `identifier = literal`
    InitDeclarator,
    /// `BEGIN statement-list END`
    CompoundStatement,
    /// `statement { ; statement }`
    StatementList,
    /// Assignment or return statement
    Statement,
    /// `identifier := additive-expression`
    AssignmentExpression,
    /// Additive expression (right-recursive)
    AdditiveExpression,
    /// Multiplicative expression (right-recursive)
    MultiplicativeExpression,
    /// Optional sign plus primary expression
    UnaryExpression,
    /// Identifier, literal, or parenthesized expression
    PrimaryExpression,
}

impl Rule {
    /// Rule name as it appears in debug output.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::FunctionDefinition => "function-definition",
            Rule::ParameterDeclarations => "parameter-declarations",
            Rule::VariableDeclarations => "variable-declarations",
            Rule::ConstantDeclarations => "constant-declarations",
            Rule::DeclaratorList => "declarator-list",
            Rule::InitDeclaratorList => "init-declarator-list",
            Rule::InitDeclarator => "init-declarator",
            Rule::CompoundStatement => "compound-statement",
            Rule::StatementList => "statement-list",
            Rule::Statement => "statement",
            Rule::AssignmentExpression => "assignment-expression",
            Rule::AdditiveExpression => "additive-expression",
            Rule::MultiplicativeExpression => "multiplicative-expression",
            Rule::UnaryExpression => "unary-expression",
            Rule::PrimaryExpression => "primary-expression",
        }
    }
}

/// A node of the concrete parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// An identifier terminal with its resolved text
    Identifier {
        /// The identifier text
        name: String,
        /// Source region of the terminal
        span: SourceSpan,
    },
    /// An integer literal terminal with its parsed value
    Literal {
        /// The parsed value
        value: i64,
        /// Source region of the terminal
        span: SourceSpan,
    },
    /// Any other terminal (keyword, operator, separator), tagged by kind
    Token {
        /// The token kind this terminal was read as
        kind: TokenKind,
        /// Source region of the terminal
        span: SourceSpan,
    },
    /// A non-terminal with its rule tag and ordered children
    NonTerminal {
        /// The grammar rule this node derives
        rule: Rule,
        /// Source region covering all children
        span: SourceSpan,
        /// Child nodes in grammar order
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    /// Source region of this node.
    pub fn span(&self) -> SourceSpan {
        match self {
            ParseNode::Identifier { span, .. }
            | ParseNode::Literal { span, .. }
            | ParseNode::Token { span, .. }
            | ParseNode::NonTerminal { span, .. } => *span,
        }
    }

    /// Rule tag, if this is a non-terminal.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            ParseNode::NonTerminal { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    /// Children of a non-terminal; empty for terminals.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::NonTerminal { children, .. } => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let id = ParseNode::Identifier {
            name: "a".to_string(),
            span: SourceSpan::new(0, 0, 1),
        };
        assert_eq!(id.span(), SourceSpan::new(0, 0, 1));
        assert_eq!(id.rule(), None);
        assert!(id.children().is_empty());

        let list = ParseNode::NonTerminal {
            rule: Rule::DeclaratorList,
            span: SourceSpan::new(0, 0, 1),
            children: vec![id],
        };
        assert_eq!(list.rule(), Some(Rule::DeclaratorList));
        assert_eq!(list.children().len(), 1);
    }
}
