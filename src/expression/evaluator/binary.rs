use crate::{
    ast::BinaryOperator,
    error::EvalError,
    expression::evaluator::{EvalResult, Evaluator},
    interpreter::value::Value,
};

impl Evaluator {
    /// Evaluates a binary operation between two values.
    ///
    /// Addition, subtraction and multiplication stay exact for integers and
    /// fall back to floats on overflow. Division is exact when the quotient is
    /// an integer. Modulo takes the sign of the divisor. Power is delegated to
    /// [`Evaluator::eval_pow`].
    ///
    /// # Example
    /// ```
    /// use fir::{ast::BinaryOperator, expression::evaluator::Evaluator, interpreter::value::Value};
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Div,
    ///                                     Value::Integer(12),
    ///                                     Value::Integer(4)).unwrap();
    /// assert_eq!(result, Value::Integer(3));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Sub => Ok(left - right),
            BinaryOperator::Mul => Ok(left * right),
            BinaryOperator::Div => Self::eval_div(left, right),
            BinaryOperator::Mod => Self::eval_mod(left, right),
            BinaryOperator::Pow => Self::eval_pow(left, right),
        }
    }

    fn eval_div(left: Value, right: Value) -> EvalResult<Value> {
        if right.as_float() == 0.0 {
            return Err(EvalError::DivisionByZero);
        }

        if let (Value::Integer(a), Value::Integer(b)) = (left, right)
           && a.checked_rem(b) == Some(0)
           && let Some(quotient) = a.checked_div(b)
        {
            return Ok(Value::Integer(quotient));
        }

        Ok(Value::Float(left.as_float() / right.as_float()).canonicalize())
    }

    fn eval_mod(left: Value, right: Value) -> EvalResult<Value> {
        if right.as_float() == 0.0 {
            return Err(EvalError::DivisionByZero);
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let remainder = a.checked_rem(b).unwrap_or(0);
                if remainder != 0 && (remainder < 0) != (b < 0) {
                    Ok(Value::Integer(remainder + b))
                } else {
                    Ok(Value::Integer(remainder))
                }
            },
            _ => {
                let divisor = right.as_float();
                let remainder = left.as_float() % divisor;
                let remainder = if remainder != 0.0 && (remainder < 0.0) != (divisor < 0.0) {
                    remainder + divisor
                } else {
                    remainder
                };
                Ok(Value::Float(remainder).canonicalize())
            },
        }
    }

    /// Evaluates an exponentiation.
    ///
    /// Integer bases with non-negative integer exponents use checked integer
    /// arithmetic and fall back to floats on overflow. Everything else is
    /// computed with `powf`. Zero to a negative power and negative bases with
    /// fractional exponents have no finite real result and are rejected.
    ///
    /// # Example
    /// ```
    /// use fir::{expression::evaluator::Evaluator, interpreter::value::Value};
    ///
    /// assert_eq!(Evaluator::eval_pow(Value::Integer(2), Value::Integer(10)).unwrap(),
    ///            Value::Integer(1024));
    /// assert_eq!(Evaluator::eval_pow(Value::Integer(2), Value::Integer(-2)).unwrap(),
    ///            Value::Float(0.25));
    /// assert!(Evaluator::eval_pow(Value::Integer(-8), Value::Float(0.5)).is_err());
    /// ```
    pub fn eval_pow(base: Value, exponent: Value) -> EvalResult<Value> {
        if let (Value::Integer(b), Value::Integer(e)) = (base, exponent)
           && let Ok(e) = u32::try_from(e)
           && let Some(result) = b.checked_pow(e)
        {
            return Ok(Value::Integer(result));
        }

        let b = base.as_float();
        let e = exponent.as_float();

        if b == 0.0 && e < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        if b < 0.0 && e.fract() != 0.0 {
            return Err(EvalError::InvalidArgument { details: format!("{base} ** {exponent} has no real value") });
        }

        Ok(Value::Float(b.powf(e)).canonicalize())
    }
}
