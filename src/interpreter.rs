pub mod value;

use std::io::Write;

use crate::interpreter::value::Value;
use crate::parser::ast::{Expr, Stmt};
use crate::scanner::token::{Token, TokenType};

#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

pub struct Interpreter<W: Write> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Executes statements strictly in source order. The first runtime error
    /// aborts the rest of this call.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.out, "{}", value);
                Ok(())
            }
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, operand } => {
                let operand_value = self.evaluate(operand)?;
                match (&operator.token_type, operand_value) {
                    (TokenType::Minus, Value::Num(n)) => Ok(Value::Num(-n)),
                    (TokenType::Minus, _) => Err(RuntimeError {
                        token: operator.clone(),
                        message: "operand must be number".into(),
                    }),
                    (TokenType::Bang, v) => Ok(Value::Bool(!v.is_truthy())),
                    (_, _) => Err(RuntimeError {
                        token: operator.clone(),
                        message: "unexpected operator in unary expression".into(),
                    }),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;

                match (&operator.token_type, left_value, right_value) {
                    // arithmetic; division follows IEEE754, so /0 is inf/NaN
                    (TokenType::Minus, Value::Num(n1), Value::Num(n2)) => Ok(Value::Num(n1 - n2)),
                    (TokenType::Slash, Value::Num(n1), Value::Num(n2)) => Ok(Value::Num(n1 / n2)),
                    (TokenType::Star, Value::Num(n1), Value::Num(n2)) => Ok(Value::Num(n1 * n2)),

                    // '+' doubles as string concatenation
                    (TokenType::Plus, Value::Num(n1), Value::Num(n2)) => Ok(Value::Num(n1 + n2)),
                    (TokenType::Plus, Value::Str(s1), Value::Str(s2)) => Ok(Value::Str(s1 + &s2)),
                    (TokenType::Plus, _, _) => Err(RuntimeError {
                        token: operator.clone(),
                        message: "operands must be two numbers or two strings".into(),
                    }),

                    // comparison
                    (TokenType::Greater, Value::Num(n1), Value::Num(n2)) => {
                        Ok(Value::Bool(n1 > n2))
                    }
                    (TokenType::GreaterEqual, Value::Num(n1), Value::Num(n2)) => {
                        Ok(Value::Bool(n1 >= n2))
                    }
                    (TokenType::Less, Value::Num(n1), Value::Num(n2)) => Ok(Value::Bool(n1 < n2)),
                    (TokenType::LessEqual, Value::Num(n1), Value::Num(n2)) => {
                        Ok(Value::Bool(n1 <= n2))
                    }

                    // equality works across kinds, with no implicit coercion
                    (TokenType::Equal, v1, v2) => Ok(Value::Bool(v1 == v2)),
                    (TokenType::NotEqual, v1, v2) => Ok(Value::Bool(v1 != v2)),

                    (
                        TokenType::Minus
                        | TokenType::Slash
                        | TokenType::Star
                        | TokenType::Greater
                        | TokenType::GreaterEqual
                        | TokenType::Less
                        | TokenType::LessEqual,
                        _,
                        _,
                    ) => Err(RuntimeError {
                        token: operator.clone(),
                        message: "operands must be numbers".into(),
                    }),

                    (_, _, _) => Err(RuntimeError {
                        token: operator.clone(),
                        message: "unexpected operator in binary expression".into(),
                    }),
                }
            }
        }
    }
}
