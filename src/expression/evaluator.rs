use std::collections::HashMap;

use crate::{ast::Expr, error::EvalError, interpreter::value::Value};

/// Binary operator evaluation.
///
/// Implements `+ - * / %` and `**` over integers and floats.
pub mod binary;
/// Builtin function table and implementations.
pub mod function;
/// Unary operator evaluation: negation and (multi-)factorials.
pub mod unary;

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates expression trees.
///
/// The evaluator is stateless apart from its table of named constants
/// (`pi` and `E`); every other identifier is an unknown symbol.
pub struct Evaluator {
    constants: HashMap<&'static str, Value>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator that knows the constants `pi` and `E`.
    #[must_use]
    pub fn new() -> Self {
        let constants = HashMap::from([("pi", Value::Float(std::f64::consts::PI)),
                                       ("E", Value::Float(std::f64::consts::E))]);
        Self { constants }
    }

    /// Evaluates an expression and returns its value.
    ///
    /// Operands are evaluated left to right before the operator is applied.
    /// Intermediate values are not checked for finiteness; callers check the
    /// final result.
    ///
    /// # Example
    /// ```
    /// use fir::{
    ///     expression::{evaluator::Evaluator, lexer::tokenize, parser::parse},
    ///     interpreter::value::Value,
    /// };
    ///
    /// let expr = parse(&tokenize("3 * (2 + 5)").unwrap()).unwrap();
    /// assert_eq!(Evaluator::new().eval(&expr).unwrap(), Value::Integer(21));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(*value),
            Expr::Symbol { name, position } => {
                self.constants
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| EvalError::UnknownSymbol { name:     name.clone(),
                                                              position: *position, })
            },
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, value)
            },
            Expr::BinaryOp { left, op, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, left, right)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                let args = arguments.iter()
                                    .map(|argument| self.eval(argument))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Self::eval_function(name, &args, *position)
            },
        }
    }
}
