//! The Kaynat lexer: a single left-to-right scan over source bytes that
//! produces a flat token stream. Newlines carry no structural meaning here
//! (unlike an indentation-sensitive lexer); statements are delimited by `.`
//! so the lexer only tracks line/column for diagnostics.

use crate::error::KaynatError;
use crate::lexicon::lookup_keyword;
use crate::token::{Span, Token, TokenType};

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, KaynatError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let span = self.span();
            let Some(c) = self.peek() else {
                tokens.push(Token::new(TokenType::Eof, span));
                break;
            };

            if c == '.' {
                self.advance();
                tokens.push(Token::new(TokenType::Period, span));
            } else if c == ',' {
                self.advance();
                tokens.push(Token::new(TokenType::Comma, span));
            } else if c.is_ascii_digit() {
                tokens.push(self.read_number(span));
            } else if c.is_alphabetic() {
                tokens.push(self.read_word(span));
            } else {
                return Err(KaynatError::lexer(format!("unexpected character '{c}'"), span));
            }
        }
        log::trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_at(&self, byte_offset: usize) -> Option<char> {
        self.source.get(self.position + byte_offset..)?.chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, span: Span) -> Token {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text = &self.source[start..self.position];
        let value: f64 = text.parse().expect("scanned number text must parse");
        Token::new(TokenType::Number(value), span)
    }

    fn read_word(&mut self, span: Span) -> Token {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            self.advance();
        }
        let word = self.source[start..self.position].to_lowercase();
        match lookup_keyword(&word) {
            Some(kind) => Token::new(kind, span),
            None => Token::new(TokenType::Identifier(self.source[start..self.position].to_string()), span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenType> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_period_and_comma() {
        assert_eq!(kinds("."), vec![TokenType::Period, TokenType::Eof]);
        assert_eq!(kinds(","), vec![TokenType::Comma, TokenType::Eof]);
    }

    #[test]
    fn lexes_integer_and_float_numbers() {
        assert_eq!(kinds("42"), vec![TokenType::Number(42.0), TokenType::Eof]);
        assert_eq!(kinds("3.5"), vec![TokenType::Number(3.5), TokenType::Eof]);
    }

    #[test]
    fn a_trailing_dot_not_followed_by_a_digit_is_not_consumed_by_the_number() {
        let toks = kinds("5.");
        assert_eq!(toks, vec![TokenType::Number(5.0), TokenType::Period, TokenType::Eof]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(kinds("SET"), vec![TokenType::Set, TokenType::Eof]);
        assert_eq!(kinds("Set"), vec![TokenType::Set, TokenType::Eof]);
    }

    #[test]
    fn unknown_words_become_identifiers() {
        assert_eq!(
            kinds("frobnicate"),
            vec![TokenType::Identifier("frobnicate".to_string()), TokenType::Eof]
        );
    }

    #[test]
    fn true_and_yes_lex_to_boolean_true() {
        assert_eq!(kinds("true"), vec![TokenType::Boolean(true), TokenType::Eof]);
        assert_eq!(kinds("yes"), vec![TokenType::Boolean(true), TokenType::Eof]);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = Lexer::new("set x\nto 5 .").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(1, 1));
        let to_token = tokens.iter().find(|t| t.kind == TokenType::To).unwrap();
        assert_eq!(to_token.span, Span::new(2, 1));
    }

    #[test]
    fn unrecognized_byte_is_a_lexer_error() {
        let err = Lexer::new("set x to 5 @").tokenize();
        assert!(err.is_err());
    }

    #[test]
    fn whole_program_lexes_to_expected_stream() {
        let toks = kinds("set x to 5 . say x .");
        assert_eq!(
            toks,
            vec![
                TokenType::Set,
                TokenType::Identifier("x".to_string()),
                TokenType::To,
                TokenType::Number(5.0),
                TokenType::Period,
                TokenType::Say,
                TokenType::Identifier("x".to_string()),
                TokenType::Period,
                TokenType::Eof,
            ]
        );
    }
}
