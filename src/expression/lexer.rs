use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token of an arithmetic expression.
///
/// The power operator is `**`; the `^` accepted by Fir scripts is rewritten
/// to it before lexing (see [`crate::expression::evaluate`]).
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5`, `5.`, or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    #[regex(r"[0-9]+\.", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Identifier tokens; symbol or function names such as `pi` or `sqrt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Whitespace.
    #[regex(r"[ \t\f\r\n]+", logos::skip)]
    Ignored,
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` for literals that do not fit in an `i64`; [`tokenize`]
/// turns those into real literals.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Splits expression text into tokens paired with their byte offsets.
///
/// Integer literals outside the `i64` range become [`Token::Real`], the same
/// way integer arithmetic falls back to floats on overflow.
///
/// # Errors
/// Returns `InvalidCharacter` for anything the token set does not cover.
///
/// # Example
/// ```
/// use fir::expression::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ** 10").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Integer(2), 0), (Token::DoubleStar, 2), (Token::Integer(10), 5)]);
///
/// assert_eq!(tokenize("100000000000000000000").unwrap(),
///            vec![(Token::Real(1e20), 0)]);
///
/// assert!(tokenize("2 # 3").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let slice = lexer.slice();
                if !slice.is_empty()
                   && slice.bytes().all(|b| b.is_ascii_digit())
                   && let Ok(r) = slice.parse::<f64>()
                {
                    tokens.push((Token::Real(r), position));
                    continue;
                }
                return Err(ParseError::InvalidCharacter { text: slice.to_string(),
                                                          position });
            },
        }
    }

    Ok(tokens)
}
