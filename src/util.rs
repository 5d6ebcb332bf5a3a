/// Numeric conversion helpers.
///
/// This module provides the conversions between `i64` and `f64` used by the
/// value model and the expression evaluator. Float to integer conversion is
/// only performed when it is exact, which is the basis of canonicalization.
pub mod num;
/// Path helpers.
///
/// Lexical normalization of file paths and the display names used in
/// diagnostics.
pub mod path;
