/// Smallest `f64` that is out of range for `i64` (`2^63`).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `i64` to the nearest `f64`.
///
/// Integers beyond `2^53` are rounded to the nearest representable float,
/// which matches how mixed integer/float arithmetic behaves in Fir.
///
/// # Example
/// ```
/// use fir::util::num::int_to_float;
///
/// assert_eq!(int_to_float(42), 42.0);
/// assert_eq!(int_to_float(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Converts an `f64` to `i64` if and only if the conversion is exact.
///
/// The value must be finite, have no fractional part and lie inside the `i64`
/// range. Negative zero converts to `0`.
///
/// # Example
/// ```
/// use fir::util::num::float_to_int_exact;
///
/// assert_eq!(float_to_int_exact(8.0), Some(8));
/// assert_eq!(float_to_int_exact(-0.0), Some(0));
/// assert_eq!(float_to_int_exact(2.5), None);
/// assert_eq!(float_to_int_exact(1e300), None);
/// assert_eq!(float_to_int_exact(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn float_to_int_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < -I64_UPPER_BOUND || value >= I64_UPPER_BOUND {
        return None;
    }
    Some(value as i64)
}

/// Formats a float the way Fir prints non-integral numbers.
///
/// Magnitudes from `1e-4` up to `1e16` use plain decimal notation. Anything
/// smaller or larger uses exponent notation with a signed exponent of at
/// least two digits. The mantissa is the shortest representation that
/// round-trips.
///
/// # Example
/// ```
/// use fir::util::num::format_float;
///
/// assert_eq!(format_float(2.5), "2.5");
/// assert_eq!(format_float(0.30000000000000004), "0.30000000000000004");
/// assert_eq!(format_float(1e-7), "1e-07");
/// assert_eq!(format_float(1.5e-12), "1.5e-12");
/// assert_eq!(format_float(2.5e300), "2.5e+300");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() || (1e-4..1e16).contains(&magnitude) {
        return format!("{value}");
    }

    let text = format!("{value:e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = exponent.strip_prefix('-').map_or(('+', exponent), |digits| ('-', digits));
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Computes the multi-factorial `k(!^n)` of a non-negative integer.
///
/// Multi-factorial generalizes the factorial: `k!! = k * (k - 2) * ...`,
/// `k!!! = k * (k - 3) * ...` and so on. `n = 1` is the ordinary factorial.
///
/// Returns `None` when the result overflows an `i64`.
///
/// # Example
/// ```
/// use fir::util::num::multi_factorial;
///
/// assert_eq!(multi_factorial(5, 1), Some(120));
/// assert_eq!(multi_factorial(7, 2), Some(105));
/// assert_eq!(multi_factorial(0, 1), Some(1));
/// assert_eq!(multi_factorial(30, 1), None);
/// ```
#[must_use]
pub fn multi_factorial(k: i64, n: u8) -> Option<i64> {
    let step = i64::from(n.max(1));
    let mut result = 1i64;
    let mut current = k;

    while current > 1 {
        result = result.checked_mul(current)?;
        current -= step;
    }
    Some(result)
}

/// Computes the gamma function Γ(z) using the Lanczos approximation.
///
/// Uses the standard 9-term coefficients (`g = 7`) and the reflection formula
/// for `z < 0.5`. Poles (zero and negative integers) yield a non-finite
/// result, which callers reject.
///
/// # Example
/// ```
/// use fir::util::num::gamma;
///
/// assert!((gamma(5.0) - 24.0).abs() < 1e-9);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn gamma(z: f64) -> f64 {
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        return std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * gamma(1.0 - z));
    }

    let z_minus_1 = z - 1.0;
    let mut x = COEFFS[0];
    let mut offset = 1.0;
    for &c in COEFFS.iter().skip(1) {
        x += c / (z_minus_1 + offset);
        offset += 1.0;
    }

    let t = z_minus_1 + G + 0.5;
    std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
}
