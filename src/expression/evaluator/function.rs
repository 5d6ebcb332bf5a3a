use crate::{
    error::EvalError,
    expression::evaluator::{EvalResult, Evaluator},
    interpreter::value::Value,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values whose length has
/// already been checked against its [`Arity`].
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with at least `n` arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides a name, an arity specification and a function pointer
/// implementing the builtin. The macro produces `BUILTIN_TABLE` for lookup and
/// the public `BUILTIN_FUNCTIONS` name list.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function an expression may call.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

/// Generates a one-argument builtin that applies an `f64` method.
///
/// The argument is converted to a float; the result is canonicalized, so
/// `sqrt(16)` yields the integer `4`.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        fn $fname(args: &[Value]) -> EvalResult<Value> {
            Ok(Value::Float(args[0].as_float().$real_fn()).canonicalize())
        }
    };
}

real_builtin!(exp, exp);
real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(sinh, sinh);
real_builtin!(cosh, cosh);
real_builtin!(tanh, tanh);
real_builtin!(atan, atan);

builtin_functions! {
    "sqrt"      => { arity: Arity::Exact(1), func: sqrt },
    "exp"       => { arity: Arity::Exact(1), func: exp },
    "ln"        => { arity: Arity::Exact(1), func: ln },
    "log"       => { arity: Arity::OneOf(&[1, 2]), func: log },
    "sin"       => { arity: Arity::Exact(1), func: sin },
    "cos"       => { arity: Arity::Exact(1), func: cos },
    "tan"       => { arity: Arity::Exact(1), func: tan },
    "asin"      => { arity: Arity::Exact(1), func: |args| inverse_trig("asin", args, f64::asin) },
    "acos"      => { arity: Arity::Exact(1), func: |args| inverse_trig("acos", args, f64::acos) },
    "atan"      => { arity: Arity::Exact(1), func: atan },
    "sinh"      => { arity: Arity::Exact(1), func: sinh },
    "cosh"      => { arity: Arity::Exact(1), func: cosh },
    "tanh"      => { arity: Arity::Exact(1), func: tanh },
    "abs"       => { arity: Arity::Exact(1), func: abs },
    "Abs"       => { arity: Arity::Exact(1), func: abs },
    "floor"     => { arity: Arity::Exact(1), func: |args| unary_round("floor", args) },
    "ceiling"   => { arity: Arity::Exact(1), func: |args| unary_round("ceiling", args) },
    "ceil"      => { arity: Arity::Exact(1), func: |args| unary_round("ceiling", args) },
    "round"     => { arity: Arity::Exact(1), func: |args| unary_round("round", args) },
    "factorial" => { arity: Arity::Exact(1), func: |args| Evaluator::eval_factorial(args[0], 1) },
    "min"       => { arity: Arity::AtLeast(1), func: |args| min_max("min", args) },
    "Min"       => { arity: Arity::AtLeast(1), func: |args| min_max("min", args) },
    "max"       => { arity: Arity::AtLeast(1), func: |args| min_max("max", args) },
    "Max"       => { arity: Arity::AtLeast(1), func: |args| min_max("max", args) },
}

impl Evaluator {
    /// Evaluates a call to a builtin function.
    ///
    /// # Parameters
    /// - `name`: Function name as written.
    /// - `args`: Evaluated argument values.
    /// - `position`: Offset of the call, for error reporting.
    ///
    /// # Returns
    /// The function result, or an error if the name is unknown, the arity
    /// does not match or the argument lies outside the function's domain.
    ///
    /// # Example
    /// ```
    /// use fir::{expression::evaluator::Evaluator, interpreter::value::Value};
    ///
    /// let v = Evaluator::eval_function("max", &[Value::Integer(3), Value::Float(4.5)], 0).unwrap();
    /// assert_eq!(v, Value::Float(4.5));
    ///
    /// assert!(Evaluator::eval_function("sqrt", &[], 0).is_err());
    /// assert!(Evaluator::eval_function("frobnicate", &[Value::Integer(1)], 0).is_err());
    /// ```
    pub fn eval_function(name: &str, args: &[Value], position: usize) -> EvalResult<Value> {
        let builtin = BUILTIN_TABLE.iter()
                                   .find(|b| b.name == name)
                                   .ok_or_else(|| EvalError::UnknownFunction { name: name.to_string(),
                                                                               position })?;

        if !builtin.arity.check(args.len()) {
            return Err(EvalError::ArgumentCountMismatch { name:  name.to_string(),
                                                          found: args.len(), });
        }

        (builtin.func)(args)
    }
}

/// Square root; negative arguments have no real root.
fn sqrt(args: &[Value]) -> EvalResult<Value> {
    let x = args[0].as_float();
    if x < 0.0 {
        return Err(EvalError::InvalidArgument { details: format!("sqrt is not defined for negative value {}", args[0]) });
    }
    Ok(Value::Float(x.sqrt()).canonicalize())
}

/// Natural logarithm of a strictly positive argument.
fn ln(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Float(positive(args[0], "ln")?.ln()).canonicalize())
}

/// Logarithm with an optional base.
///
/// `log(x)` is the natural logarithm; `log(x, b)` is the logarithm of `x` to
/// the base `b`. Bases 2 and 10 use the dedicated functions so that exact
/// powers give exact results.
fn log(args: &[Value]) -> EvalResult<Value> {
    let x = positive(args[0], "log")?;
    let Some(base) = args.get(1) else {
        return Ok(Value::Float(x.ln()).canonicalize());
    };

    let b = positive(*base, "log")?;
    let result = if b == 1.0 {
        return Err(EvalError::DivisionByZero);
    } else if b == 2.0 {
        x.log2()
    } else if b == 10.0 {
        x.log10()
    } else {
        x.ln() / b.ln()
    };
    Ok(Value::Float(result).canonicalize())
}

fn positive(value: Value, name: &str) -> EvalResult<f64> {
    let x = value.as_float();
    if x <= 0.0 {
        return Err(EvalError::InvalidArgument { details: format!("{name} is only defined for positive values, but found {value}") });
    }
    Ok(x)
}

fn inverse_trig(name: &str, args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    let x = args[0].as_float();
    if !(-1.0..=1.0).contains(&x) {
        return Err(EvalError::InvalidArgument { details: format!("{name} is only defined on [-1, 1], but found {}", args[0]) });
    }
    Ok(Value::Float(f(x)).canonicalize())
}

fn abs(args: &[Value]) -> EvalResult<Value> {
    match args[0] {
        Value::Integer(n) => {
            Ok(n.checked_abs()
                .map_or_else(|| Value::Float(args[0].as_float().abs()), Value::Integer))
        },
        Value::Float(r) => Ok(Value::Float(r.abs()).canonicalize()),
    }
}

/// Rounding functions: `floor`, `ceiling` and `round`.
///
/// Integers are returned unchanged. `round` rounds half to even.
fn unary_round(kind: &str, args: &[Value]) -> EvalResult<Value> {
    let Value::Float(r) = args[0] else {
        return Ok(args[0]);
    };

    let rounded = match kind {
        "floor" => r.floor(),
        "ceiling" => r.ceil(),
        _ => r.round_ties_even(),
    };
    Ok(Value::Float(rounded).canonicalize())
}

/// Returns the smallest or largest argument, keeping its type.
fn min_max(kind: &str, args: &[Value]) -> EvalResult<Value> {
    let mut best = args[0];
    for &candidate in &args[1..] {
        let replace = match kind {
            "min" => candidate.as_float() < best.as_float(),
            _ => candidate.as_float() > best.as_float(),
        };
        if replace {
            best = candidate;
        }
    }
    Ok(best)
}
