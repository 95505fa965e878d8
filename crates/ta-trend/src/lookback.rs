//! Lookback and output alignment.
//!
//! Every indicator output has the same length as its input. The leading
//! positions that cannot be computed (the *warm-up*) hold the undefined
//! sentinel. The warm-up is the indicator's lookback plus any leading inputs
//! that were themselves undefined: computation starts at the first valid bar,
//! the way the Python TA-Lib wrapper skips leading NaNs before calling into the
//! C library.

use crate::traits::SeriesElement;
use crate::utils::is_defined;

/// Index of the first defined value in `data`.
#[inline]
#[must_use]
pub fn first_valid_index<T: SeriesElement>(data: &[T]) -> Option<usize> {
    data.iter().position(|&v| is_defined(v))
}

/// Index of the first position where both paired series are defined.
///
/// Only the common prefix of the two slices is inspected.
#[inline]
#[must_use]
pub fn first_valid_pair_index<T: SeriesElement>(a: &[T], b: &[T]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(&x, &y)| is_defined(x) && is_defined(y))
}

/// Number of leading undefined outputs for a series of `len` values whose
/// computation starts at `begin` and needs `lookback` bars of history.
#[inline]
#[must_use]
pub const fn warmup_len(len: usize, begin: usize, lookback: usize) -> usize {
    let warmup = begin.saturating_add(lookback);
    if warmup < len {
        warmup
    } else {
        len
    }
}

/// Fills the first `count` entries of `output` with the undefined sentinel.
///
/// `count` is clamped to the buffer length.
#[inline]
pub fn fill_warmup<T: SeriesElement>(output: &mut [T], count: usize) {
    let end = count.min(output.len());
    output[..end].fill(T::nan());
}
