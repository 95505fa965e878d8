//! Hilbert Transform building blocks.
//!
//! Ehlers' discrete Hilbert transform is the 7-tap FIR kernel
//!
//! ```text
//! y(t) = (a·x(t) + b·x(t-2) - b·x(t-4) - a·x(t-6)) · (0.075·P(t-1) + 0.54)
//! ```
//!
//! with `a = 0.0962`, `b = 0.5769` and `P` the running dominant-cycle period.
//! TA-Lib evaluates it incrementally: samples of odd and even bars feed two
//! separate delay lines, each holding a 3-slot ring of `a·x` terms and the
//! previous `b·x` term. [`HilbertStage`] reproduces that evaluation order so
//! results match the reference to the last few ulps.

use crate::error::Result;
use crate::traits::SeriesElement;

/// Weight of the newest and oldest taps of the Hilbert FIR kernel.
pub const HILBERT_A: f64 = 0.0962;

/// Weight of the two inner taps of the Hilbert FIR kernel.
pub const HILBERT_B: f64 = 0.5769;

/// Slope of the period-adaptive gain `0.075·P + 0.54`.
pub const PERIOD_GAIN_SLOPE: f64 = 0.075;

/// Offset of the period-adaptive gain `0.075·P + 0.54`.
pub const PERIOD_GAIN_OFFSET: f64 = 0.54;

/// Number of slots in each parity's delay line.
const SLOTS: usize = 3;

/// Kernel coefficients converted to the series element type.
#[derive(Debug, Clone, Copy)]
pub struct HilbertCoefficients<T> {
    a: T,
    b: T,
    gain_slope: T,
    gain_offset: T,
}

impl<T: SeriesElement> HilbertCoefficients<T> {
    /// Converts the reference constants to `T`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if a constant cannot be represented.
    pub fn new() -> Result<Self> {
        Ok(Self {
            a: T::from_f64(HILBERT_A)?,
            b: T::from_f64(HILBERT_B)?,
            gain_slope: T::from_f64(PERIOD_GAIN_SLOPE)?,
            gain_offset: T::from_f64(PERIOD_GAIN_OFFSET)?,
        })
    }

    /// Period-adaptive gain for a previous-bar period estimate.
    #[inline]
    #[must_use]
    pub fn gain(&self, prev_period: T) -> T {
        self.gain_slope * prev_period + self.gain_offset
    }
}

/// Bar parity; odd and even bars use separate delay lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Bar index divisible by two.
    Even,
    /// Any other bar index.
    Odd,
}

impl Parity {
    /// Parity of the bar at `index`.
    #[inline]
    #[must_use]
    pub const fn of(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DelayLine<T> {
    taps: [T; SLOTS],
    prev: T,
    prev_input: T,
}

impl<T: SeriesElement> DelayLine<T> {
    fn new() -> Self {
        Self {
            taps: [T::zero(); SLOTS],
            prev: T::zero(),
            prev_input: T::zero(),
        }
    }
}

/// One Hilbert FIR filter with odd/even delay lines.
#[derive(Debug, Clone, Copy)]
pub struct HilbertStage<T> {
    odd: DelayLine<T>,
    even: DelayLine<T>,
}

impl<T: SeriesElement> Default for HilbertStage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> HilbertStage<T> {
    /// Creates a stage with zeroed delay lines.
    #[must_use]
    pub fn new() -> Self {
        Self {
            odd: DelayLine::new(),
            even: DelayLine::new(),
        }
    }

    /// Feeds `input` through the delay line for `parity` and returns the
    /// filtered value scaled by `gain`.
    ///
    /// `slot` selects the ring position; the caller advances it after every
    /// even bar so both delay lines stay three samples deep.
    #[inline]
    pub fn apply(
        &mut self,
        input: T,
        parity: Parity,
        slot: usize,
        coeffs: &HilbertCoefficients<T>,
        gain: T,
    ) -> T {
        let line = match parity {
            Parity::Even => &mut self.even,
            Parity::Odd => &mut self.odd,
        };
        let scaled = coeffs.a * input;
        let mut value = -line.taps[slot];
        line.taps[slot] = scaled;
        value = value + scaled;
        value = value - line.prev;
        line.prev = coeffs.b * line.prev_input;
        value = value + line.prev;
        line.prev_input = input;
        value * gain
    }
}

/// Advances a delay-line slot index, wrapping after the last slot.
#[inline]
#[must_use]
pub const fn next_slot(slot: usize) -> usize {
    if slot + 1 == SLOTS {
        0
    } else {
        slot + 1
    }
}
