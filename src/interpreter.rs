use log::debug;

use crate::ast::{BinOp, Expr, Stmt};
use crate::environment::Environment;
use crate::error::RuntimeError;

impl BinOp {
    /// Applies the operator with overflow and zero-divisor checks. Division
    /// truncates toward zero.
    pub fn apply(self, left: i32, right: i32) -> Result<i32, RuntimeError> {
        let result = match self {
            BinOp::Add => left.checked_add(right),
            BinOp::Sub => left.checked_sub(right),
            BinOp::Mul => left.checked_mul(right),
            BinOp::Div => {
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                left.checked_div(right)
            }
        };
        result.ok_or(RuntimeError::ArithmeticOverflow {
            op: self,
            left,
            right,
        })
    }
}

impl Expr {
    /// Evaluates the expression, left operand before right.
    pub fn evaluate(&self, env: &Environment) -> Result<i32, RuntimeError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Variable(name) => env.lookup(name),
            Expr::BinaryOp { op, left, right } => {
                let left_val = left.evaluate(env)?;
                let right_val = right.evaluate(env)?;
                op.apply(left_val, right_val)
            }
        }
    }
}

impl Stmt {
    /// Runs the statement against `env`.
    ///
    /// The outcome is the value of the last assignment performed, or `None`
    /// when nothing was assigned (an empty block or an `if` whose branch was
    /// skipped). Statements after a fault are not run and assignments made
    /// before it are kept.
    pub fn execute(&self, env: &mut Environment) -> Result<Option<i32>, RuntimeError> {
        match self {
            Stmt::Assign { name, expr } => {
                let value = expr.evaluate(env)?;
                debug!("{} = {}", name, value);
                env.assign(name, value);
                Ok(Some(value))
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if condition.evaluate(env)? != 0 {
                    then_branch.execute(env)
                } else if let Some(else_branch) = else_branch {
                    else_branch.execute(env)
                } else {
                    Ok(None)
                }
            }
            Stmt::Block(statements) => {
                let mut result = None;
                for stmt in statements {
                    if let Some(value) = stmt.execute(env)? {
                        result = Some(value);
                    }
                }
                Ok(result)
            }
        }
    }
}
