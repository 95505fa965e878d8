//! Utility functions for ta-trend.
//!
//! # Undefined values
//!
//! Warm-up positions are flagged with the floating-point NaN sentinel. NaN never
//! compares equal to anything, itself included, so callers and tests must use
//! [`is_undefined`] / [`is_defined`] rather than `==`.
//!
//! # Floating-point comparison
//!
//! Oracle fixtures are compared with an absolute tolerance; see [`approx_eq`].
//!
//! ```
//! use ta_trend::utils::{approx_eq, is_undefined, FIXTURE_EPSILON};
//!
//! assert!(approx_eq(8.2176_f64, 8.217600000000001, FIXTURE_EPSILON));
//! assert!(is_undefined(f64::NAN));
//! ```

use crate::traits::SeriesElement;

/// Absolute tolerance used when matching oracle fixtures.
pub const FIXTURE_EPSILON: f64 = 1e-9;

/// Returns `true` if `value` is the undefined (warm-up) sentinel.
#[inline]
#[must_use]
pub fn is_undefined<T: SeriesElement>(value: T) -> bool {
    value.is_nan()
}

/// Returns `true` if `value` holds a computed result.
#[inline]
#[must_use]
pub fn is_defined<T: SeriesElement>(value: T) -> bool {
    !value.is_nan()
}

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other, or if
/// both are undefined.
///
/// ```
/// use ta_trend::utils::approx_eq;
///
/// assert!(approx_eq(1.0_f64, 1.0 + 1e-11, 1e-10));
/// assert!(!approx_eq(1.0_f64, 2.0, 1e-10));
/// assert!(approx_eq(f64::NAN, f64::NAN, 1e-10));
/// assert!(!approx_eq(f64::NAN, 1.0, 1e-10));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    match (is_undefined(a), is_undefined(b)) {
        (true, true) => true,
        (false, false) => (a - b).abs() < tolerance,
        _ => false,
    }
}

/// Count the undefined values in a slice.
#[inline]
#[must_use]
pub fn count_undefined<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|&&x| is_undefined(x)).count()
}

/// Count the undefined values at the beginning of a slice.
///
/// Useful for verifying the warm-up length of an indicator output.
///
/// ```
/// use ta_trend::utils::count_undefined_prefix;
///
/// let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, f64::NAN];
/// assert_eq!(count_undefined_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_undefined_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|&&x| is_undefined(x)).count()
}
