use std::mem;

use log::debug;

use crate::ast::{BinOp, Expr, Stmt};
use crate::config::Config;
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Recursive-descent parser with a single token of lookahead.
///
/// ```text
/// Program    := '{' Statement* '}' END
/// Statement  := Assignment | If | Block
/// Assignment := IDENT '=' Expr [';']
/// If         := 'if' '(' Expr ')' Statement
///             | 'if' Expr 'then' Statement ['else' Statement] 'endif'
/// Expr       := Term (('+' | '-') Term)*
/// Term       := Factor (('*' | '/') Factor)*
/// Factor     := NUMBER | IDENT | '(' Expr ')'
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    config: Config,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Self::with_config(lexer, Config::default())
    }

    pub fn with_config(mut lexer: Lexer, config: Config) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            config,
            depth: 0,
        })
    }

    /// Consumes the current token if it has the same kind as `token_type`.
    /// Payloads (number values, identifier names) are not compared.
    fn eat(&mut self, token_type: TokenKind) -> Result<Token, ParseError> {
        if mem::discriminant(&self.current_token.kind) == mem::discriminant(&token_type) {
            let next = self.lexer.next_token()?;
            Ok(mem::replace(&mut self.current_token, next))
        } else {
            Err(self.unexpected(&token_type.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let position = self.current_token.position;
        if self.current_token.is_end() {
            ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                position,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token.to_string(),
                position,
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.config.max_depth {
            Some(limit) if self.depth > limit => Err(ParseError::NestingTooDeep {
                limit,
                position: self.current_token.position,
            }),
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn program(&mut self) -> Result<Stmt, ParseError> {
        let node = self.block()?;
        self.eat(TokenKind::End)?;
        if let Stmt::Block(statements) = &node {
            debug!("parsed program with {} top-level statements", statements.len());
        }
        Ok(node)
    }

    fn block(&mut self) -> Result<Stmt, ParseError> {
        self.eat(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !matches!(self.current_token.kind, TokenKind::RBrace | TokenKind::End) {
            statements.push(self.statement()?);
        }
        self.eat(TokenKind::RBrace)?;
        Ok(Stmt::Block(statements))
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        self.enter()?;
        let node = match &self.current_token.kind {
            TokenKind::LBrace => self.block(),
            TokenKind::Identifier(_) => self.assignment(),
            TokenKind::If => self.if_statement(),
            _ => Err(self.unexpected("statement")),
        };
        self.leave();
        node
    }

    fn assignment(&mut self) -> Result<Stmt, ParseError> {
        let name = self.variable()?;
        self.eat(TokenKind::Assign)?;
        let expr = self.expr()?;
        if self.current_token.kind == TokenKind::Semicolon {
            self.eat(TokenKind::Semicolon)?;
        }
        Ok(Stmt::Assign { name, expr })
    }

    fn variable(&mut self) -> Result<String, ParseError> {
        let token = self.eat(TokenKind::Identifier(String::new()))?;
        Ok(token.text)
    }

    // Both forms may open with '(' so the group is parsed first. A following
    // operator or `then` means it was only the start of a `then` condition;
    // anything else means it was the whole condition of the short form.
    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.eat(TokenKind::If)?;

        if self.current_token.kind != TokenKind::LParen {
            let condition = self.expr()?;
            return self.then_clause(condition);
        }

        let group = self.parenthesized()?;
        if self.current_token.kind == TokenKind::Then || self.at_operator() {
            let term = self.term_rest(group)?;
            let condition = self.expr_rest(term)?;
            return self.then_clause(condition);
        }

        let then_branch = self.statement()?;
        Ok(Stmt::If {
            condition: group,
            then_branch: Box::new(then_branch),
            else_branch: None,
        })
    }

    fn then_clause(&mut self, condition: Expr) -> Result<Stmt, ParseError> {
        self.eat(TokenKind::Then)?;
        let then_branch = self.statement()?;
        let else_branch = if self.current_token.kind == TokenKind::Else {
            self.eat(TokenKind::Else)?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        self.eat(TokenKind::EndIf)?;
        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    fn at_operator(&self) -> bool {
        matches!(
            self.current_token.kind,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let node = self.term().and_then(|node| self.expr_rest(node));
        self.leave();
        node
    }

    // Each operator in a chain nests the tree one level deeper on the left,
    // so it counts toward the depth limit until the chain ends.
    fn expr_rest(&mut self, mut node: Expr) -> Result<Expr, ParseError> {
        let base = self.depth;
        loop {
            let op = match self.current_token.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.enter()?;
            self.eat(self.current_token.kind.clone())?;
            let right = self.term()?;
            node = Expr::binary(op, node, right);
        }
        self.depth = base;
        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let node = self.factor()?;
        self.term_rest(node)
    }

    fn term_rest(&mut self, mut node: Expr) -> Result<Expr, ParseError> {
        let base = self.depth;
        loop {
            let op = match self.current_token.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.enter()?;
            self.eat(self.current_token.kind.clone())?;
            let right = self.factor()?;
            node = Expr::binary(op, node, right);
        }
        self.depth = base;
        Ok(node)
    }

    fn parenthesized(&mut self) -> Result<Expr, ParseError> {
        self.eat(TokenKind::LParen)?;
        let node = self.expr()?;
        self.eat(TokenKind::RParen)?;
        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.current_token.kind.clone() {
            TokenKind::Number(value) => {
                self.eat(TokenKind::Number(0))?;
                Ok(Expr::Number(value))
            }
            TokenKind::Identifier(_) => Ok(Expr::Variable(self.variable()?)),
            TokenKind::LParen => self.parenthesized(),
            _ => Err(self.unexpected("expression")),
        }
    }
}
