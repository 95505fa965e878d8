//! SAR (Parabolic Stop and Reverse) indicator.
//!
//! The Parabolic SAR is a trend-following trailing stop. While long it sits
//! below price and rises toward the highest high; while short it sits above
//! price and falls toward the lowest low. When price penetrates it the trend
//! flips and the stop jumps to the other side.
//!
//! # Formula
//!
//! SAR(i+1) = SAR(i) + AF × (EP - SAR(i))
//!
//! Where:
//! - AF = Acceleration Factor, starts at `acceleration` and grows by
//!   `acceleration` each time a new extreme point is made, up to `maximum`
//! - EP = Extreme Point, the highest high while long or lowest low while short
//!
//! The next SAR is clamped so it never penetrates the current or previous
//! bar: while long it is at most the lower of the two lows, while short at
//! least the higher of the two highs.
//!
//! # Initial direction
//!
//! The trend starts short when the first bar-to-bar move is a down move
//! (`low[0] - low[1] > 0`) larger than the up move (`high[1] - high[0]`), and
//! long otherwise. This is the one-bar minus directional movement test used by
//! TA-Lib.
//!
//! # Default Parameters
//!
//! - `acceleration` = 0.02
//! - `maximum` = 0.20
//!
//! When `acceleration > maximum`, both the starting factor and the increment
//! are lowered to `maximum`.
//!
//! # Lookback
//!
//! The lookback period is 1: the first defined value is at index 1.

use crate::error::Result;
use crate::lookback::{fill_warmup, first_valid_pair_index, warmup_len};
use crate::series::Series;
use crate::traits::{validate_non_negative, SeriesElement, ValidatedInput};

/// Default starting (and incremental) acceleration factor.
pub const DEFAULT_ACCELERATION: f64 = 0.02;

/// Default cap on the acceleration factor.
pub const DEFAULT_MAXIMUM: f64 = 0.20;

const INDICATOR: &str = "sar";

/// Computes the lookback period for SAR.
#[inline]
#[must_use]
pub const fn sar_lookback() -> usize {
    1
}

/// Returns the minimum input length that yields a defined SAR value.
#[inline]
#[must_use]
pub const fn sar_min_len() -> usize {
    2
}

/// Raises `value` so it is not below either bound.
#[inline]
fn floor_at<T: SeriesElement>(mut value: T, a: T, b: T) -> T {
    if value < a {
        value = a;
    }
    if value < b {
        value = b;
    }
    value
}

/// Lowers `value` so it is not above either bound.
#[inline]
fn cap_at<T: SeriesElement>(mut value: T, a: T, b: T) -> T {
    if value > a {
        value = a;
    }
    if value > b {
        value = b;
    }
    value
}

/// Per-bar SAR recurrence state.
///
/// Created from the first two bars, then advanced once per bar with
/// [`next`](Self::next), starting with bar 1.
///
/// ```
/// use ta_trend::indicators::sar::SarState;
///
/// let high = [10.0_f64, 11.0, 12.0];
/// let low = [8.0_f64, 9.0, 10.0];
/// let mut state = SarState::new(&high, &low, 0.02, 0.20).unwrap();
/// assert!(state.is_long());
///
/// let values: Vec<f64> = (1..3).map(|i| state.next(high[i], low[i])).collect();
/// assert!((values[0] - 8.0).abs() < 1e-12);
/// assert!((values[1] - 8.06).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SarState<T> {
    /// SAR carried into the next bar.
    sar: T,
    extreme: T,
    af: T,
    step: T,
    maximum: T,
    is_long: bool,
    last_high: T,
    last_low: T,
}

impl<T: SeriesElement> SarState<T> {
    /// Seeds the state from the first two bars of `high` and `low`.
    ///
    /// Returns `None` when fewer than two bars are available.
    #[must_use]
    pub fn new(high: &[T], low: &[T], acceleration: T, maximum: T) -> Option<Self> {
        let (&[high0, high1, ..], &[low0, low1, ..]) = (high, low) else {
            return None;
        };

        let step = if acceleration > maximum {
            maximum
        } else {
            acceleration
        };

        let up_move = high1 - high0;
        let down_move = low0 - low1;
        let is_long = !(down_move > T::zero() && up_move < down_move);

        let (sar, extreme) = if is_long { (low0, high1) } else { (high0, low1) };

        Some(Self {
            sar,
            extreme,
            af: step,
            step,
            maximum,
            is_long,
            last_high: high1,
            last_low: low1,
        })
    }

    /// SAR for a bar that is still forming, without committing it.
    ///
    /// Call again with revised extremes as the bar updates, then commit the
    /// closed bar with [`next`](Self::next).
    #[must_use]
    pub fn peek(&self, high: T, low: T) -> T {
        self.clone().next(high, low)
    }

    /// Processes one bar and returns its SAR value.
    pub fn next(&mut self, high: T, low: T) -> T {
        let prev_high = self.last_high;
        let prev_low = self.last_low;
        self.last_high = high;
        self.last_low = low;

        if self.is_long {
            if low <= self.sar {
                let reversal = floor_at(self.extreme, prev_high, high);
                self.reverse(reversal, low);
                self.sar = floor_at(self.projected(reversal), prev_high, high);
                reversal
            } else {
                let current = self.sar;
                if high > self.extreme {
                    self.extend(high);
                }
                self.sar = cap_at(self.projected(current), prev_low, low);
                current
            }
        } else if high >= self.sar {
            let reversal = cap_at(self.extreme, prev_low, low);
            self.reverse(reversal, high);
            self.sar = cap_at(self.projected(reversal), prev_low, low);
            reversal
        } else {
            let current = self.sar;
            if low < self.extreme {
                self.extend(low);
            }
            self.sar = floor_at(self.projected(current), prev_high, high);
            current
        }
    }

    fn reverse(&mut self, stop: T, extreme: T) {
        tracing::trace!(
            from_long = self.is_long,
            stop = stop.as_f64(),
            "sar reversal"
        );
        self.is_long = !self.is_long;
        self.af = self.step;
        self.extreme = extreme;
    }

    fn extend(&mut self, extreme: T) {
        self.extreme = extreme;
        self.af = self.af + self.step;
        if self.af > self.maximum {
            self.af = self.maximum;
        }
    }

    #[inline]
    fn projected(&self, sar: T) -> T {
        sar + self.af * (self.extreme - sar)
    }

    /// SAR that will be reported for the next bar unless that bar reverses.
    #[inline]
    #[must_use]
    pub const fn sar(&self) -> T {
        self.sar
    }

    /// Highest high (long) or lowest low (short) of the current trend.
    #[inline]
    #[must_use]
    pub const fn extreme_point(&self) -> T {
        self.extreme
    }

    /// Current acceleration factor.
    #[inline]
    #[must_use]
    pub const fn acceleration_factor(&self) -> T {
        self.af
    }

    /// `true` while the trend is up.
    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.is_long
    }
}

/// Computes Parabolic SAR into a pre-allocated output buffer.
///
/// Returns the number of defined values written.
///
/// # Arguments
///
/// * `high` - High price data
/// * `low` - Low price data
/// * `acceleration` - Starting and incremental acceleration factor
/// * `maximum` - Maximum acceleration factor
/// * `output` - Output buffer, at least as long as the input
///
/// # Errors
///
/// Returns an error if:
/// - The input arrays have different lengths (`Error::InvalidInput`)
/// - A parameter is negative or not finite (`Error::InvalidParameter`)
/// - The output buffer is too small (`Error::BufferTooSmall`)
pub fn sar_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    acceleration: T,
    maximum: T,
    output: &mut [T],
) -> Result<usize> {
    high.validate_paired_with(low, INDICATOR)?;
    validate_non_negative(acceleration, "acceleration", INDICATOR)?;
    validate_non_negative(maximum, "maximum", INDICATOR)?;
    high.validate_output_len(output.len(), INDICATOR)?;

    let n = high.len();
    let begin = first_valid_pair_index(high, low).unwrap_or(n);
    let warmup = warmup_len(n, begin, sar_lookback());
    fill_warmup(output, warmup);

    let Some(mut state) = SarState::new(&high[begin..], &low[begin..], acceleration, maximum)
    else {
        tracing::debug!(len = n, begin, "sar: fewer than two valid bars, output undefined");
        return Ok(0);
    };

    if begin > 0 {
        tracing::debug!(begin, "sar: skipped leading undefined bars");
    }

    for ((out, &h), &l) in output[warmup..n]
        .iter_mut()
        .zip(&high[warmup..])
        .zip(&low[warmup..])
    {
        *out = state.next(h, l);
    }

    Ok(n - warmup)
}

/// Computes Parabolic SAR with custom parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The input arrays have different lengths (`Error::InvalidInput`)
/// - A parameter is negative or not finite (`Error::InvalidParameter`)
pub fn sar_with<T: SeriesElement>(
    high: &[T],
    low: &[T],
    acceleration: T,
    maximum: T,
) -> Result<Series<T>> {
    let mut output = vec![T::nan(); high.len()];
    sar_into(high, low, acceleration, maximum, &mut output)?;
    Ok(Series::from(output))
}

/// Computes Parabolic SAR with default parameters (0.02, 0.20).
///
/// # Example
///
/// ```
/// use ta_trend::indicators::sar;
///
/// let high: Vec<f64> = vec![10.0, 11.0, 12.0, 13.0];
/// let low: Vec<f64> = vec![8.0, 9.0, 10.0, 11.0];
/// let result = sar(&high, &low).unwrap();
/// assert!(!result.is_defined(0));
/// assert!((result[1] - 8.0).abs() < 1e-12);
/// assert!((result[2] - 8.06).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the input arrays have different lengths.
pub fn sar<T: SeriesElement>(high: &[T], low: &[T]) -> Result<Series<T>> {
    Sar::default().compute(high, low)
}

/// Parabolic SAR configuration.
///
/// ```
/// use ta_trend::indicators::sar::Sar;
///
/// let high = vec![10.0_f64, 11.0, 12.0];
/// let low = vec![8.0_f64, 9.0, 10.0];
/// let result = Sar::new()
///     .acceleration(0.03)
///     .maximum(0.25)
///     .compute(&high, &low)
///     .unwrap();
/// assert!((result[2] - 8.09).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sar {
    acceleration: f64,
    maximum: f64,
}

impl Default for Sar {
    /// Creates a SAR configuration with standard parameters (0.02, 0.20).
    fn default() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            maximum: DEFAULT_MAXIMUM,
        }
    }
}

impl Sar {
    /// Creates a new SAR configuration with standard parameters (0.02, 0.20).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting and incremental acceleration factor.
    ///
    /// Default: 0.02
    #[must_use]
    pub const fn acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Sets the maximum acceleration factor.
    ///
    /// Default: 0.20
    #[must_use]
    pub const fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = maximum;
        self
    }

    /// Computes SAR using the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`sar_with`].
    pub fn compute<T: SeriesElement>(&self, high: &[T], low: &[T]) -> Result<Series<T>> {
        let acceleration = T::from_f64(self.acceleration)?;
        let maximum = T::from_f64(self.maximum)?;
        sar_with(high, low, acceleration, maximum)
    }

    /// Computes SAR into a pre-allocated buffer, returning the number of defined values.
    ///
    /// # Errors
    ///
    /// See [`sar_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        high: &[T],
        low: &[T],
        output: &mut [T],
    ) -> Result<usize> {
        let acceleration = T::from_f64(self.acceleration)?;
        let maximum = T::from_f64(self.maximum)?;
        sar_into(high, low, acceleration, maximum, output)
    }

    /// Returns the acceleration factor.
    #[must_use]
    pub const fn get_acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Returns the maximum acceleration factor.
    #[must_use]
    pub const fn get_maximum(&self) -> f64 {
        self.maximum
    }
}
