mod ast;
mod config;
mod environment;
mod error;
mod interpreter;
mod lexer;
mod parser;
mod token;

pub use ast::{BinOp, Expr, Stmt};
pub use config::{Config, DEFAULT_MAX_DEPTH};
pub use environment::Environment;
pub use error::{Error, ErrorKind, ParseError, RuntimeError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Position, Token, TokenKind};

use log::info;

pub fn parse(program: &str) -> Result<Stmt, ParseError> {
    parse_with_config(program, Config::default())
}

pub fn parse_with_config(program: &str, config: Config) -> Result<Stmt, ParseError> {
    let lexer = Lexer::new(program);
    let mut parser = Parser::with_config(lexer, config)?;
    parser.program()
}

/// Parses and runs `program` in a fresh environment and returns the final
/// bindings.
pub fn execute(program: &str) -> Result<Environment, Error> {
    execute_with_config(program, Config::default())
}

pub fn execute_with_config(program: &str, config: Config) -> Result<Environment, Error> {
    let tree = parse_with_config(program, config)?;
    let mut env = Environment::new();
    tree.execute(&mut env)?;
    info!("program finished with {} variables", env.len());
    Ok(env)
}
