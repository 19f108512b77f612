use log::trace;

use crate::error::ParseError;
use crate::token::{Position, Token, TokenKind};

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    line: usize,
    column: usize,
}

pub struct Lexer {
    text: Vec<char>,
    cursor: Cursor,
    finished: bool,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Lexer {
            text: text.chars().collect(),
            cursor: Cursor {
                pos: 0,
                line: 1,
                column: 1,
            },
            finished: false,
        }
    }

    pub fn cursor_position(&self) -> Position {
        Position::new(self.cursor.line, self.cursor.column)
    }

    fn current_char(&self) -> Option<char> {
        self.text.get(self.cursor.pos).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.cursor.pos += 1;
            if ch == '\n' {
                self.cursor.line += 1;
                self.cursor.column = 1;
            } else {
                self.cursor.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consumes characters while `pred` holds and returns them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if pred(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn integer(&mut self, start: Position) -> Result<Token, ParseError> {
        let digits = self.take_while(|ch| ch.is_ascii_digit());
        match digits.parse::<i32>() {
            Ok(value) => Ok(Token::new(TokenKind::Number(value), digits, start)),
            Err(_) => Err(ParseError::IntegerOverflow {
                text: digits,
                position: start,
            }),
        }
    }

    fn id(&mut self, start: Position) -> Token {
        let word = self.take_while(|ch| ch.is_alphanumeric() || ch == '_');
        let kind = TokenKind::keyword(&word).unwrap_or_else(|| TokenKind::Identifier(word.clone()));
        Token::new(kind, word, start)
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an `End` token.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.cursor_position();

        let Some(ch) = self.current_char() else {
            return Ok(Token::new(TokenKind::End, "", start));
        };

        if ch.is_ascii_digit() {
            let token = self.integer(start)?;
            trace!("lexed {} at {}", token, start);
            return Ok(token);
        }

        if ch.is_alphabetic() || ch == '_' {
            let token = self.id(start);
            trace!("lexed {} at {}", token, start);
            return Ok(token);
        }

        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Assign,
            _ => {
                return Err(ParseError::InvalidCharacter {
                    ch,
                    position: start,
                });
            }
        };

        self.advance();
        let token = Token::new(kind, ch.to_string(), start);
        trace!("lexed {} at {}", token, start);
        Ok(token)
    }

    /// Lexes the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, ParseError> {
        let saved = self.cursor;
        let token = self.next_token();
        self.cursor = saved;
        token
    }
}

/// Yields every token up to and including `End`, then stops. A fault is
/// yielded once and ends the sequence.
impl Iterator for Lexer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(tok) if !tok.is_end() => {}
            _ => self.finished = true,
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    #[test]
    fn test_integer_token() {
        let mut lexer = Lexer::new("123");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(123));
        assert_eq!(token.text, "123");
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+ - * / ="),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Assign,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{ ( ) ; }"),
            vec![
                TokenKind::LBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if then else endif"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::EndIf,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("IF Then endif_ iffy"),
            vec![
                TokenKind::Identifier("IF".to_string()),
                TokenKind::Identifier("Then".to_string()),
                TokenKind::Identifier("endif_".to_string()),
                TokenKind::Identifier("iffy".to_string()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_identifier() {
        assert_eq!(
            kinds("variable_name x123 _tmp"),
            vec![
                TokenKind::Identifier("variable_name".to_string()),
                TokenKind::Identifier("x123".to_string()),
                TokenKind::Identifier("_tmp".to_string()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        assert_eq!(
            kinds("12ab"),
            vec![
                TokenKind::Number(12),
                TokenKind::Identifier("ab".to_string()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_integer_overflow() {
        let mut lexer = Lexer::new("x = 2147483648");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            ParseError::IntegerOverflow {
                text: "2147483648".to_string(),
                position: Position::new(1, 5),
            }
        );
    }

    #[test]
    fn test_largest_literal() {
        let mut lexer = Lexer::new("2147483647");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number(i32::MAX));
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("x\n  @");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCharacter {
                ch: '@',
                position: Position::new(2, 3),
            }
        );
    }

    #[test]
    fn test_whitespace_handling() {
        let mut lexer = Lexer::new("  \t\n  123  \n ");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(123));
        assert_eq!(token.position, Position::new(2, 3));
    }

    #[test]
    fn test_token_positions() {
        let mut lexer = Lexer::new("{ ab = 12;\n  if }");
        let expected = [(1, 1), (1, 3), (1, 6), (1, 8), (1, 10), (2, 3), (2, 6), (2, 7)];
        for (line, column) in expected {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.position, Position::new(line, column), "{}", token);
        }
        assert_eq!(lexer.cursor_position(), Position::new(2, 7));
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut lexer = Lexer::new("x");
        lexer.next_token().unwrap();
        for _ in 0..5 {
            assert!(lexer.next_token().unwrap().is_end());
        }
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().unwrap().is_end());
        assert!(lexer.next_token().unwrap().is_end());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("foo\n= 1");
        assert_eq!(
            lexer.peek_token().unwrap().kind,
            TokenKind::Identifier("foo".to_string())
        );
        assert_eq!(lexer.cursor_position(), Position::new(1, 1));
        assert_eq!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier("foo".to_string())
        );
        let peeked = lexer.peek_token().unwrap();
        assert_eq!(peeked.kind, TokenKind::Assign);
        assert_eq!(peeked.position, Position::new(2, 1));
        assert_eq!(lexer.next_token().unwrap(), peeked);
    }

    #[test]
    fn test_peek_restores_after_error() {
        let mut lexer = Lexer::new("$");
        assert!(lexer.peek_token().is_err());
        assert_eq!(lexer.cursor_position(), Position::new(1, 1));
    }

    #[test]
    fn test_iterator_stops_after_end() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().unwrap().is_end());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("x # y");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }
}
