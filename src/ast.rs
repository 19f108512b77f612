use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i32),
    Variable(String),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assign {
        name: String,
        expr: Expr,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
}

// The printers below emit a canonical form that parses back to the same tree
// for any tree the parser can build: every binary operation is parenthesized
// and every `if` uses the `then ... endif` form. The grammar has no negative
// literals, so a negative `Number` is printed as a subtraction from zero. That
// reparses to a `BinaryOp` with the same value rather than the same node.

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(i32::MIN) => write!(f, "((0 - {}) - 1)", i32::MAX),
            Expr::Number(value) if *value < 0 => write!(f, "(0 - {})", -value),
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assign { name, expr } => write!(f, "{} = {};", name, expr),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if {} then {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                write!(f, " endif")
            }
            Stmt::Block(statements) => {
                f.write_str("{")?;
                for stmt in statements {
                    write!(f, " {}", stmt)?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: i32) -> Expr {
        Expr::Number(value)
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    #[test]
    fn test_print_expression() {
        let expr = Expr::binary(
            BinOp::Sub,
            Expr::binary(BinOp::Sub, num(10), num(3)),
            Expr::binary(BinOp::Mul, var("x"), num(2)),
        );
        assert_eq!(expr.to_string(), "((10 - 3) - (x * 2))");
    }

    #[test]
    fn test_print_negative_numbers() {
        assert_eq!(num(-5).to_string(), "(0 - 5)");
        assert_eq!(num(i32::MIN).to_string(), "((0 - 2147483647) - 1)");
        assert_eq!(
            Expr::binary(BinOp::Mul, num(-2), var("x")).to_string(),
            "((0 - 2) * x)"
        );
    }

    #[test]
    fn test_print_statements() {
        let program = Stmt::Block(vec![
            Stmt::Assign {
                name: "x".to_string(),
                expr: num(1),
            },
            Stmt::If {
                condition: var("x"),
                then_branch: Box::new(Stmt::Assign {
                    name: "y".to_string(),
                    expr: num(2),
                }),
                else_branch: Some(Box::new(Stmt::Block(vec![]))),
            },
        ]);
        assert_eq!(
            program.to_string(),
            "{ x = 1; if x then y = 2; else { } endif }"
        );
    }
}
