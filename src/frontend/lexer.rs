//! Lexer producing tokens on demand from the line-indexed source store.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::LexicalError;
use crate::utils::location::{SourceCode, SourceSpan};

/// Stateful lexer over a [`SourceCode`] store.
///
/// The lexer hands out one token per call and never rewinds. Unknown
/// characters are reported to stderr in source context and surface as an
/// [`TokenKind::Error`] token so the parser can stop cleanly.
pub struct Lexer<'a> {
    source: &'a SourceCode,
    line: usize,
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of the source.
    pub fn new(source: &'a SourceCode) -> Self {
        Self {
            source,
            line: 0,
            offset: 0,
        }
    }

    /// The source store this lexer reads from.
    pub fn source(&self) -> &'a SourceCode {
        self.source
    }

    /// Produce the next token, skipping whitespace.
    ///
    /// Once the source is exhausted every call returns an end-of-input token
    /// whose span points at the last character of the last line.
    pub fn next_token(&mut self) -> Token {
        while self.line < self.source.line_count() {
            let line_length = self.source.line_length(self.line);
            while self.offset < line_length {
                let c = match self.source.char_at(self.line, self.offset) {
                    Some(c) => c,
                    None => break,
                };
                if c.is_whitespace() {
                    self.offset += 1;
                    continue;
                }
                return self.read_token(c);
            }
            self.line += 1;
            self.offset = 0;
        }
        self.end_of_input()
    }

    /// Collect all tokens up to end of input, failing on the first
    /// unrecognized character. Convenient for tests and tooling; the parser
    /// pulls tokens one at a time instead.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Error {
                return Err(LexicalError {
                    message: "Unexpected Character".to_string(),
                    span: token.span,
                });
            }
            let done = token.is_end_of_input();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn read_token(&mut self, c: char) -> Token {
        match c {
            '+' => self.token(TokenKind::Plus, 1),
            '-' => self.token(TokenKind::Minus, 1),
            '*' => self.token(TokenKind::Star, 1),
            '/' => self.token(TokenKind::Slash, 1),
            '=' => self.token(TokenKind::Equal, 1),
            '(' => self.token(TokenKind::LeftParen, 1),
            ')' => self.token(TokenKind::RightParen, 1),
            ',' => self.token(TokenKind::Comma, 1),
            ';' => self.token(TokenKind::Semicolon, 1),
            '.' => self.token(TokenKind::Dot, 1),
            ':' => {
                if self.source.char_at(self.line, self.offset + 1) == Some('=') {
                    self.token(TokenKind::Assign, 2)
                } else {
                    self.error_token()
                }
            }
            '0'..='9' => {
                let length = self.run_length(|c| c.is_ascii_digit());
                self.token(TokenKind::Literal, length)
            }
            c if c.is_ascii_alphabetic() => {
                let length = self.run_length(|c| c.is_ascii_alphabetic());
                let text: String = self
                    .source
                    .line(self.line)
                    .chars()
                    .skip(self.offset)
                    .take(length)
                    .collect();
                let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
                self.token(kind, length)
            }
            _ => self.error_token(),
        }
    }

    /// Length of the maximal character run satisfying `pred` from the
    /// current position. Keywords are only recognized when the full letter
    /// run matches, so `PARAMX` lexes as one identifier.
    fn run_length(&self, pred: fn(char) -> bool) -> usize {
        self.source
            .line(self.line)
            .chars()
            .skip(self.offset)
            .take_while(|&c| pred(c))
            .count()
    }

    fn token(&mut self, kind: TokenKind, length: usize) -> Token {
        let token = Token::new(kind, SourceSpan::new(self.line, self.offset, length));
        self.offset += length;
        token
    }

    fn error_token(&mut self) -> Token {
        let span = SourceSpan::new(self.line, self.offset, 1);
        self.source.report(span, "Unexpected Character");
        self.offset += 1;
        Token::new(TokenKind::Error, span)
    }

    fn end_of_input(&self) -> Token {
        let span = match self.source.line_count() {
            0 => SourceSpan::new(0, 0, 1),
            count => {
                let last = count - 1;
                SourceSpan::new(last, self.source.line_length(last).saturating_sub(1), 1)
            }
        };
        Token::new(TokenKind::EndOfInput, span)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_end_of_input() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<Token> {
        let source = SourceCode::new(text);
        Lexer::new(&source).tokenize().unwrap()
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].span, SourceSpan::new(0, 0, 1));
    }

    #[test]
    fn test_operators_and_separators() {
        assert_eq!(
            kinds("+ - * / = := ( ) , ; ."),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Equal,
                TokenKind::Assign,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_keywords_need_full_match() {
        assert_eq!(
            kinds("PARAM PARAMX RET RETURN"),
            vec![
                TokenKind::Param,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Return,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_greedy_runs_and_spans() {
        let tokens = lex("width12 34");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].span, SourceSpan::new(0, 0, 5));
        assert_eq!(tokens[1].kind, TokenKind::Literal);
        assert_eq!(tokens[1].span, SourceSpan::new(0, 5, 2));
        assert_eq!(tokens[2].kind, TokenKind::Literal);
        assert_eq!(tokens[2].span, SourceSpan::new(0, 8, 2));
    }

    #[test]
    fn test_colon_without_equal_is_error() {
        let source = SourceCode::new("a : 1");
        let mut lexer = Lexer::new(&source);
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        let error = lexer.next_token();
        assert_eq!(error.kind, TokenKind::Error);
        assert_eq!(error.span, SourceSpan::new(0, 2, 1));
        // the lexer moves on past the bad character
        assert_eq!(lexer.next_token().kind, TokenKind::Literal);
    }

    #[test]
    fn test_tracks_lines() {
        let tokens = lex("BEGIN\nRETURN 1\nEND.");
        assert_eq!(tokens[0].span.line, 0);
        assert_eq!(tokens[1].span, SourceSpan::new(1, 0, 6));
        assert_eq!(tokens[2].span, SourceSpan::new(1, 7, 1));
        assert_eq!(tokens[3].span, SourceSpan::new(2, 0, 3));
        assert_eq!(tokens[4].span, SourceSpan::new(2, 3, 1));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let source = SourceCode::new("END.");
        let mut lexer = Lexer::new(&source);
        lexer.next_token();
        lexer.next_token();
        let first = lexer.next_token();
        let second = lexer.next_token();
        assert!(first.is_end_of_input());
        assert_eq!(first, second);
        // points at the trailing newline of the last line
        assert_eq!(first.span, SourceSpan::new(0, 4, 1));
    }

    #[test]
    fn test_iterator_stops_before_end_of_input() {
        let source = SourceCode::new("RETURN 1");
        let collected: Vec<Token> = Lexer::new(&source).collect();
        assert_eq!(collected.len(), 2);
    }
}
