//! Recursive-descent parser building the concrete parse tree.
//!
//! One parse function per grammar rule. The parser owns the lexer, keeps a
//! single token of lookahead, and stops at the first error; by then the
//! diagnostic has already been printed in source context.

use crate::frontend::lexer::Lexer;
use crate::frontend::parse_tree::{ParseNode, Rule};
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{SyntaxError, SyntaxErrorKind};
use crate::utils::location::{SourceCode, SourceSpan};

/// Parser over a [`SourceCode`] store.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a parser with the first token already read.
    pub fn new(source: &'a SourceCode) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse a whole program:
    ///
    /// ```text
    /// function-definition = [ parameter-declarations ]
    ///                       [ variable-declarations ]
    ///                       [ constant-declarations ]
    ///                       compound-statement "."
    /// ```
    pub fn parse_function_definition(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = Vec::new();
        if self.current.kind == TokenKind::Param {
            children.push(self.parse_declarations(Rule::ParameterDeclarations)?);
        }
        if self.current.kind == TokenKind::Var {
            children.push(self.parse_declarations(Rule::VariableDeclarations)?);
        }
        if self.current.kind == TokenKind::Const {
            children.push(self.parse_declarations(Rule::ConstantDeclarations)?);
        }
        children.push(self.parse_compound_statement()?);
        children.push(self.expect(TokenKind::Dot, "Expected \".\" DOT")?);
        Ok(self.non_terminal(Rule::FunctionDefinition, children))
    }

    /// Parse one declaration section. The caller has checked the section
    /// keyword; the rule decides which declarator list follows.
    fn parse_declarations(&mut self, rule: Rule) -> Result<ParseNode, SyntaxError> {
        let keyword = self.token_node();
        if self.current.kind != TokenKind::Identifier {
            return Err(self.error("Expected the first identifier"));
        }
        let list = if rule == Rule::ConstantDeclarations {
            self.parse_init_declarator_list()?
        } else {
            self.parse_declarator_list()?
        };
        let semicolon = self.expect(TokenKind::Semicolon, "Expected a \";\" SEMICOLON")?;
        Ok(self.non_terminal(rule, vec![keyword, list, semicolon]))
    }

    fn parse_declarator_list(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.identifier_node()];
        while self.current.kind == TokenKind::Comma {
            children.push(self.token_node());
            if self.current.kind != TokenKind::Identifier {
                return Err(self.error("Expected identifier"));
            }
            children.push(self.identifier_node());
        }
        Ok(self.non_terminal(Rule::DeclaratorList, children))
    }

    fn parse_init_declarator_list(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.parse_init_declarator()?];
        while self.current.kind == TokenKind::Comma {
            children.push(self.token_node());
            children.push(self.parse_init_declarator()?);
        }
        Ok(self.non_terminal(Rule::InitDeclaratorList, children))
    }

    fn parse_init_declarator(&mut self) -> Result<ParseNode, SyntaxError> {
        if self.current.kind != TokenKind::Identifier {
            return Err(self.error("Expected identifier"));
        }
        let id = self.identifier_node();
        let equal = self.expect(TokenKind::Equal, "Expected \"=\" equal sign")?;
        if self.current.kind != TokenKind::Literal {
            return Err(self.error("Expected literal"));
        }
        let literal = self.literal_node()?;
        Ok(self.non_terminal(Rule::InitDeclarator, vec![id, equal, literal]))
    }

    fn parse_compound_statement(&mut self) -> Result<ParseNode, SyntaxError> {
        let begin = self.expect(TokenKind::Begin, "Expected \"BEGIN\"")?;
        let list = self.parse_statement_list()?;
        let end = self.expect(TokenKind::End, "Expected \"END\"")?;
        Ok(self.non_terminal(Rule::CompoundStatement, vec![begin, list, end]))
    }

    fn parse_statement_list(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.parse_statement()?];
        while self.current.kind == TokenKind::Semicolon {
            children.push(self.token_node());
            children.push(self.parse_statement()?);
        }
        Ok(self.non_terminal(Rule::StatementList, children))
    }

    fn parse_statement(&mut self) -> Result<ParseNode, SyntaxError> {
        if self.current.kind == TokenKind::Return {
            let ret = self.token_node();
            let expr = self.parse_additive_expression()?;
            return Ok(self.non_terminal(Rule::Statement, vec![ret, expr]));
        }
        let assignment = self.parse_assignment_expression()?;
        Ok(self.non_terminal(Rule::Statement, vec![assignment]))
    }

    fn parse_assignment_expression(&mut self) -> Result<ParseNode, SyntaxError> {
        if self.current.kind != TokenKind::Identifier {
            return Err(self.error("Expected identifier"));
        }
        let id = self.identifier_node();
        let assign = self.expect(TokenKind::Assign, "Expected assignment")?;
        let expr = self.parse_additive_expression()?;
        Ok(self.non_terminal(Rule::AssignmentExpression, vec![id, assign, expr]))
    }

    /// `additive-expression = multiplicative-expression
    ///                        [ ("+" | "-") additive-expression ]`
    ///
    /// The right recursion keeps the grammar LL(1); chains like `a - b - c`
    /// therefore nest to the right.
    fn parse_additive_expression(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.parse_multiplicative_expression()?];
        if matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            children.push(self.token_node());
            children.push(self.parse_additive_expression()?);
        }
        Ok(self.non_terminal(Rule::AdditiveExpression, children))
    }

    fn parse_multiplicative_expression(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.parse_unary_expression()?];
        if matches!(self.current.kind, TokenKind::Star | TokenKind::Slash) {
            children.push(self.token_node());
            children.push(self.parse_multiplicative_expression()?);
        }
        Ok(self.non_terminal(Rule::MultiplicativeExpression, children))
    }

    fn parse_unary_expression(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = Vec::new();
        if matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            children.push(self.token_node());
        }
        children.push(self.parse_primary_expression()?);
        Ok(self.non_terminal(Rule::UnaryExpression, children))
    }

    fn parse_primary_expression(&mut self) -> Result<ParseNode, SyntaxError> {
        match self.current.kind {
            TokenKind::Identifier => {
                let id = self.identifier_node();
                Ok(self.non_terminal(Rule::PrimaryExpression, vec![id]))
            }
            TokenKind::Literal => {
                let literal = self.literal_node()?;
                Ok(self.non_terminal(Rule::PrimaryExpression, vec![literal]))
            }
            TokenKind::LeftParen => {
                let open_span = self.current.span;
                let open = self.token_node();
                let expr = self.parse_additive_expression()?;
                if self.current.kind != TokenKind::RightParen {
                    let error = self.error_at(
                        self.current.span,
                        "Expected a ')'",
                        SyntaxErrorKind::UnmatchedParenthesis,
                    );
                    self.source().report(open_span, "To match this previous '('");
                    return Err(error);
                }
                let close = self.token_node();
                Ok(self.non_terminal(Rule::PrimaryExpression, vec![open, expr, close]))
            }
            _ => Err(self.error("Expected an identifier, literal or '('")),
        }
    }

    fn source(&self) -> &'a SourceCode {
        self.lexer.source()
    }

    fn advance(&mut self) -> Token {
        let token = self.current;
        self.current = self.lexer.next_token();
        token
    }

    /// Wrap the current terminal as a token node and advance.
    fn token_node(&mut self) -> ParseNode {
        let token = self.advance();
        ParseNode::Token {
            kind: token.kind,
            span: token.span,
        }
    }

    /// Wrap the current identifier terminal, resolving its text.
    fn identifier_node(&mut self) -> ParseNode {
        let token = self.advance();
        ParseNode::Identifier {
            name: self.source().span_text(token.span),
            span: token.span,
        }
    }

    /// Wrap the current literal terminal, parsing its value.
    fn literal_node(&mut self) -> Result<ParseNode, SyntaxError> {
        let span = self.current.span;
        let text = self.source().span_text(span);
        let value: i64 = text.parse().map_err(|_| {
            self.error_at(span, "Literal out of range", SyntaxErrorKind::InvalidLiteral)
        })?;
        self.advance();
        Ok(ParseNode::Literal { value, span })
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<ParseNode, SyntaxError> {
        if self.current.kind == kind {
            Ok(self.token_node())
        } else {
            Err(self.error(message))
        }
    }

    fn non_terminal(&self, rule: Rule, children: Vec<ParseNode>) -> ParseNode {
        let span = children
            .iter()
            .map(ParseNode::span)
            .reduce(SourceSpan::merge)
            .unwrap_or_default();
        ParseNode::NonTerminal {
            rule,
            span,
            children,
        }
    }

    fn error(&self, message: &str) -> SyntaxError {
        self.error_at(self.current.span, message, SyntaxErrorKind::UnexpectedToken)
    }

    fn error_at(&self, span: SourceSpan, message: &str, kind: SyntaxErrorKind) -> SyntaxError {
        self.source().report(span, message);
        SyntaxError {
            message: message.to_string(),
            span,
            kind,
        }
    }
}
