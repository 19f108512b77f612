use thiserror::Error;

use crate::ast::BinOp;
use crate::token::Position;

/// Every fault the lexer, parser, or evaluator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    IntegerOverflow,
    UnexpectedToken,
    UnexpectedEndOfInput,
    NestingTooDeep,
    UndefinedVariable,
    DivisionByZero,
    ArithmeticOverflow,
}

/// Faults raised while turning source text into an AST.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid character '{ch}' at {position}")]
    InvalidCharacter { ch: char, position: Position },

    #[error("integer literal {text} at {position} is out of range")]
    IntegerOverflow { text: String, position: Position },

    #[error("expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("expected {expected}, found end of input at {position}")]
    UnexpectedEndOfInput { expected: String, position: Position },

    #[error("nesting exceeds {limit} levels at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            ParseError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            ParseError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::InvalidCharacter { position, .. }
            | ParseError::IntegerOverflow { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

/// Faults raised while executing an AST.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {left} {op} {right}")]
    ArithmeticOverflow { op: BinOp, left: i32, right: i32 },
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            RuntimeError::DivisionByZero => ErrorKind::DivisionByZero,
            RuntimeError::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(err) => err.kind(),
            Error::Runtime(err) => err.kind(),
        }
    }
}
