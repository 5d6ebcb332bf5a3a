use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    expression::{
        lexer::Token,
        parser::{ParseResult, descend, parse_expression, utils::parse_comma_separated},
    },
    interpreter::value::Value,
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (negation) and `+` (identity). Prefix
/// operators bind more loosely than `**`, so `-2 ** 2` is `-(2 ** 2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Minus, position)) => {
            let position = *position;
            tokens.next();
            let expr = parse_unary(tokens, descend(depth)?)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                               expr: Box::new(expr),
                               position })
        },
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_unary(tokens, descend(depth)?)
        },
        _ => parse_power(tokens, depth),
    }
}

/// Parses exponentiation.
///
/// `**` is right-associative and its exponent may carry a sign:
/// `2 ** 3 ** 2` is `2 ** (3 ** 2)` and `2 ** -1` is `0.5`.
///
/// Grammar: `power := postfix ("**" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let base = parse_postfix(tokens, depth)?;

    if let Some((Token::DoubleStar, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let exponent = parse_unary(tokens, descend(depth)?)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   position });
    }

    Ok(base)
}

/// Parses factorials applied to a primary expression.
///
/// Consecutive `!` are counted and folded into a single
/// `UnaryOperator::Factorial(n)` node, so `7!!` is the double factorial of 7.
///
/// Grammar: `postfix := primary "!"*`
///
/// # Errors
/// Returns `TooManyFactorials` if the count does not fit in a `u8`.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut node = parse_primary(tokens, depth)?;

    loop {
        let mut count = 0usize;
        let mut position = node.position();
        while let Some((Token::Bang, bang_position)) = tokens.peek() {
            if count == 0 {
                position = *bang_position;
            }
            tokens.next();
            count += 1;
        }
        if count == 0 {
            break;
        }

        let count = u8::try_from(count).map_err(|_| ParseError::TooManyFactorials { count })?;
        node = Expr::UnaryOp { op: UnaryOperator::Factorial(count),
                               expr: Box::new(node),
                               position };
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Grammar (simplified):
/// ```text
///     primary := INTEGER | REAL
///              | identifier
///              | identifier "(" arguments ")"
///              | "(" expression ")"
/// ```
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Integer(n), position)) => Ok(Expr::Literal { value:    Value::Integer(*n),
                                                                  position: *position, }),
        Some((Token::Real(r), position)) => Ok(Expr::Literal { value:    Value::Float(*r),
                                                               position: *position, }),
        Some((Token::LParen, position)) => parse_grouping(tokens, *position, descend(depth)?),
        Some((Token::Identifier(name), position)) => {
            parse_identifier_or_function(tokens, name, *position, depth)
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    format!("{tok:?}"),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// Parses the rest of a parenthesized expression after its `(`.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, open: usize, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let expr = parse_expression(tokens, depth)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    format!("{tok:?}, expected ')'"),
                                                                   position: *position, }),
        None => Err(ParseError::ExpectedClosingParen { position: open }),
    }
}

/// Parses a symbol reference or, when followed by `(`, a function call.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>,
                                       name: &str,
                                       position: usize,
                                       depth: usize)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((Token::LParen, open)) = tokens.peek() {
        let open = *open;
        tokens.next();
        let depth = descend(depth)?;
        let arguments = parse_comma_separated(tokens,
                                              |tokens| parse_expression(tokens, depth),
                                              &Token::RParen,
                                              open)?;
        return Ok(Expr::FunctionCall { name: name.to_string(),
                                       arguments,
                                       position });
    }

    Ok(Expr::Symbol { name: name.to_string(),
                      position })
}
