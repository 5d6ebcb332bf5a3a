use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    expression::{lexer::Token, parser::binary::parse_additive},
};

/// Binary operator parsing.
///
/// Implements the additive and multiplicative precedence levels.
pub mod binary;
/// Unary, power, postfix and primary parsing.
///
/// Handles prefix signs, right-associative `**`, factorials, literals,
/// symbols, function calls and parenthesized groups.
pub mod unary;
/// Shared parsing helpers.
pub mod utils;

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting depth of an expression tree.
///
/// Parentheses, prefix signs, exponents and every link of an operator chain
/// each add one level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Returns the depth one level below `depth`.
///
/// # Errors
/// Returns `NestingTooDeep` once [`MAX_NESTING_DEPTH`] is exceeded.
pub(crate) fn descend(depth: usize) -> ParseResult<usize> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    }
    Ok(depth + 1)
}

/// Parses a full expression.
///
/// This is the entry point of the recursive descent. It begins at the lowest
/// precedence level, addition, and descends through the precedence hierarchy.
///
/// `depth` is the nesting depth of the expression being parsed.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_additive(tokens, depth)
}

/// Parses a complete token stream into a single expression.
///
/// The whole stream must be consumed; leftover tokens are an error.
///
/// # Errors
/// - `UnexpectedEndOfInput` for an empty stream or a dangling operator.
/// - `UnexpectedTrailingTokens` when tokens remain after the expression.
/// - `NestingTooDeep` when the tree would be deeper than
///   [`MAX_NESTING_DEPTH`].
/// - Any error raised by the precedence levels.
///
/// # Example
/// ```
/// use fir::expression::{lexer::tokenize, parser::parse};
///
/// assert!(parse(&tokenize("2 ** (1 + 2)").unwrap()).is_ok());
/// assert!(parse(&tokenize("2 3").unwrap()).is_err());
/// assert!(parse(&[]).is_err());
///
/// let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
/// assert!(parse(&tokenize(&deep).unwrap()).is_err());
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();

    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    let expr = parse_expression(&mut iter, 0)?;

    if let Some((token, position)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token:    format!("{token:?}"),
                                                          position: *position, });
    }

    Ok(expr)
}
