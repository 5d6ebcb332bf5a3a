use crate::{
    error::{EvalError, ExpressionError},
    expression::{evaluator::Evaluator, lexer::tokenize, parser::parse},
    interpreter::value::Value,
};

/// Evaluation of parsed expressions.
///
/// Walks the syntax tree and computes its value with exact integer arithmetic
/// where possible and double precision floats otherwise.
pub mod evaluator;
/// Tokenization of expression text.
///
/// Produces the stream of numbers, identifiers, operators and delimiters that
/// the parser consumes. The same lexer decides what counts as a numeric
/// literal for the `push` command.
pub mod lexer;
/// Recursive descent parser building [`crate::ast::Expr`] trees.
pub mod parser;

/// The evaluator's native power operator. Fir scripts write `^`, which is
/// rewritten to this operator before the text is evaluated.
pub const POWER_OPERATOR: &str = "**";

/// Evaluates arithmetic text to a canonical numeric value.
///
/// `^` is rewritten to [`POWER_OPERATOR`] first. The result is canonicalized,
/// so anything that is mathematically an integer comes back as
/// [`Value::Integer`].
///
/// # Errors
/// Returns an [`ExpressionError`] when the text cannot be parsed, refers to
/// unknown symbols or functions, divides by zero, or does not produce a
/// finite real number.
///
/// # Example
/// ```
/// use fir::{expression::evaluate, interpreter::value::Value};
///
/// assert_eq!(evaluate("2^3").unwrap(), Value::Integer(8));
/// assert_eq!(evaluate("7 / 2").unwrap(), Value::Float(3.5));
/// assert_eq!(evaluate("sqrt(16) + 1").unwrap(), Value::Integer(5));
/// assert!(evaluate("1 / 0").is_err());
/// assert!(evaluate("x + 1").is_err());
/// ```
pub fn evaluate(text: &str) -> Result<Value, ExpressionError> {
    let rewritten = text.replace('^', POWER_OPERATOR);
    let tokens = tokenize(&rewritten)?;
    let expr = parse(&tokens)?;
    let value = Evaluator::new().eval(&expr)?;

    if !value.is_finite() {
        return Err(EvalError::NonFinite.into());
    }

    Ok(value.canonicalize())
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::{
        error::{EvalError, ExpressionError, ParseError},
        interpreter::value::Value,
    };

    #[test]
    fn caret_is_exponentiation() {
        assert_eq!(evaluate("2^10").unwrap(), Value::Integer(1024));
        assert_eq!(evaluate("2^3^2").unwrap(), Value::Integer(512));
        assert_eq!(evaluate("-2^2").unwrap(), Value::Integer(-4));
        assert_eq!(evaluate("2^-1").unwrap(), Value::Float(0.5));
        assert_eq!(evaluate("4^0.5").unwrap(), Value::Integer(2));
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap(), Value::Integer(7));
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), Value::Integer(9));
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), Value::Integer(3));
        assert_eq!(evaluate("-7 % 3").unwrap(), Value::Integer(2));
    }

    #[test]
    fn division_is_exact_when_possible() {
        assert_eq!(evaluate("6 / 3").unwrap(), Value::Integer(2));
        assert_eq!(evaluate("1 / 4").unwrap(), Value::Float(0.25));
        assert_eq!(evaluate("1.5 * 2").unwrap(), Value::Integer(3));
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(evaluate("max(3, 9, 4)").unwrap(), Value::Integer(9));
        assert_eq!(evaluate("floor(2.7)").unwrap(), Value::Integer(2));
        assert_eq!(evaluate("5!").unwrap(), Value::Integer(120));
        assert_eq!(evaluate("factorial(4)").unwrap(), Value::Integer(24));
        assert_eq!(evaluate("log(8, 2)").unwrap(), Value::Integer(3));
        assert_eq!(evaluate("cos(pi)").unwrap(), Value::Integer(-1));
        assert_eq!(evaluate("ln(E)").unwrap(), Value::Integer(1));
    }

    #[test]
    fn failures_are_typed() {
        assert!(matches!(evaluate("1 / 0"),
                         Err(ExpressionError::Eval(EvalError::DivisionByZero))));
        assert!(matches!(evaluate("y"),
                         Err(ExpressionError::Eval(EvalError::UnknownSymbol { .. }))));
        assert!(matches!(evaluate("frob(1)"),
                         Err(ExpressionError::Eval(EvalError::UnknownFunction { .. }))));
        assert!(matches!(evaluate("sqrt(-1)"),
                         Err(ExpressionError::Eval(EvalError::InvalidArgument { .. }))));
        assert!(matches!(evaluate(""),
                         Err(ExpressionError::Parse(ParseError::UnexpectedEndOfInput))));
        assert!(matches!(evaluate("1 +"),
                         Err(ExpressionError::Parse(ParseError::UnexpectedEndOfInput))));
        assert!(matches!(evaluate("2 $ 3"),
                         Err(ExpressionError::Parse(ParseError::InvalidCharacter { .. }))));
    }
}
