use std::fmt;

use crate::interpreter::value::Value;

/// An abstract syntax tree node representing an arithmetic expression.
///
/// Expressions are what the `str` command evaluates. Every node records the
/// byte offset of the token that introduced it so that evaluation errors can
/// point at the offending part of the text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The constant value.
        value:    Value,
        /// Offset in the expression text.
        position: usize,
    },
    /// A named constant such as `pi`.
    Symbol {
        /// Name of the symbol.
        name:     String,
        /// Offset in the expression text.
        position: usize,
    },
    /// A unary operation.
    UnaryOp {
        /// The operator to apply.
        op:       UnaryOperator,
        /// The operand.
        expr:     Box<Self>,
        /// Offset in the expression text.
        position: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Offset in the expression text.
        position: usize,
    },
    /// A call of a builtin function, e.g. `sqrt(2)`.
    FunctionCall {
        /// Name of the function.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Offset in the expression text.
        position:  usize,
    },
}

impl Expr {
    /// Returns the offset of the token that introduced this node.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Symbol { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }
}

/// Operators that take a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric negation, `-x`.
    Negate,
    /// Factorial (`1`) or multi-factorial (`n > 1`), `x!`, `x!!`, ...
    Factorial(u8),
}

/// Operators that take two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        };
        write!(f, "{symbol}")
    }
}
