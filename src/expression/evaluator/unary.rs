use crate::{
    ast::UnaryOperator,
    error::EvalError,
    expression::evaluator::{EvalResult, Evaluator},
    interpreter::value::Value,
    util::num::{gamma, int_to_float, multi_factorial},
};

impl Evaluator {
    /// Evaluates a unary operation on a value.
    ///
    /// - `Negate`: numeric negation; `-i64::MIN` becomes a float.
    /// - `Factorial(n)`: factorial (`n = 1`) or multi-factorial (`n > 1`).
    ///   Non-negative integers are computed exactly while the result fits in
    ///   an `i64`. The plain factorial of a non-integer uses the gamma
    ///   function, `x! = Γ(x + 1)`.
    ///
    /// # Example
    /// ```
    /// use fir::{ast::UnaryOperator, expression::evaluator::Evaluator, interpreter::value::Value};
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, Value::Integer(5)).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Factorial(1), Value::Integer(4)).unwrap();
    /// assert_eq!(v, Value::Integer(24));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => {
                    Ok(n.checked_neg()
                        .map_or_else(|| Value::Float(-int_to_float(n)), Value::Integer))
                },
                Value::Float(r) => Ok(Value::Float(-r)),
            },
            UnaryOperator::Factorial(n) => Self::eval_factorial(value, n),
        }
    }

    pub(crate) fn eval_factorial(value: Value, n: u8) -> EvalResult<Value> {
        match value.canonicalize() {
            Value::Integer(k) if k < 0 => {
                Err(EvalError::InvalidArgument { details: format!("Factorial not defined for negative integer {k}") })
            },
            Value::Integer(k) => match multi_factorial(k, n) {
                Some(result) => Ok(Value::Integer(result)),
                None => float_multi_factorial(k, n).map(Value::Float),
            },
            Value::Float(x) if n == 1 => Ok(Value::Float(gamma(x + 1.0))),
            Value::Float(x) => {
                Err(EvalError::InvalidArgument { details: format!("Multi-factorial is only defined for non-negative integers, but found {x}{}",
                                                                  "!".repeat(usize::from(n))) })
            },
        }
    }
}

/// Multi-factorial in floating point, for results that overflow an `i64`.
fn float_multi_factorial(k: i64, n: u8) -> EvalResult<f64> {
    let step = f64::from(n.max(1));
    let mut result = 1.0;
    let mut current = int_to_float(k);

    while current > 1.0 {
        result *= current;
        if result.is_infinite() {
            return Err(EvalError::NonFinite);
        }
        current -= step;
    }
    Ok(result)
}
