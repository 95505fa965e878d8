//! `HT_TRENDLINE` (Hilbert Transform - Instantaneous Trendline) indicator.
//!
//! An adaptive trendline: the averaging window follows the dominant cycle
//! period measured by a Hilbert-transform homodyne discriminator, so the line
//! removes the cycle component without a fixed period parameter.
//!
//! # Algorithm
//!
//! Per bar, after the first three bars have primed the price smoother:
//!
//! 1. Smooth the price with a 4-bar WMA (weights 4:3:2:1).
//! 2. From bar 37 on, detrend the smoothed price with a Hilbert FIR stage and
//!    derive the in-phase (`I1`, the detrender delayed three bars) and
//!    quadrature (`Q1`) components; advance both by 90° (`jI`, `jQ`) and form
//!    the smoothed phasors `I2`/`Q2`.
//! 3. Run the homodyne discriminator (`Re`/`Im`) to measure the period, limit
//!    its bar-to-bar change to [0.67, 1.5]× and its range to [6, 50], then
//!    smooth it twice.
//! 4. Average the last `round(smoothPeriod)` raw prices and smooth that
//!    instantaneous trend with a 4:3:2:1 WMA to get the trendline.
//!
//! This follows Ehlers' *Rocket Science for Traders* as implemented by TA-Lib.
//!
//! # Lookback
//!
//! The lookback period is 63 bars; shorter inputs produce an all-undefined
//! output rather than an error.

use crate::error::Result;
use crate::indicators::hilbert::{next_slot, HilbertCoefficients, HilbertStage, Parity};
use crate::kernels::RingWindow;
use crate::lookback::{fill_warmup, first_valid_index, warmup_len};
use crate::series::Series;
use crate::traits::{SeriesElement, ValidatedInput};

const INDICATOR: &str = "ht_trendline";

/// Bars consumed to prime the 4-bar price WMA before it yields a value.
const WMA_PRIMING_BARS: usize = 3;

/// First bar on which the Hilbert pipeline runs (3 priming + 34 WMA-only bars).
const HILBERT_START: usize = WMA_PRIMING_BARS + 34;

/// Longest averaging window: `trunc(50 + 0.5)`.
const MAX_DOMINANT_CYCLE: usize = 50;

/// Single-pole smoothing weight for `I2`, `Q2`, `Re`, `Im` and the period.
const PHASOR_ALPHA: f64 = 0.2;

/// Weight kept from the previous phasor or period value.
const PHASOR_DECAY: f64 = 0.8;

/// Single-pole smoothing weight for the smoothed period.
const SMOOTH_PERIOD_ALPHA: f64 = 0.33;

/// Weight kept from the previous smoothed period.
const SMOOTH_PERIOD_DECAY: f64 = 0.67;

/// Largest allowed bar-to-bar period growth.
const PERIOD_MAX_RATIO: f64 = 1.5;

/// Smallest allowed bar-to-bar period shrink.
const PERIOD_MIN_RATIO: f64 = 0.67;

/// Lower bound of the measured period, in bars.
const MIN_PERIOD: f64 = 6.0;

/// Upper bound of the measured period, in bars.
const MAX_PERIOD: f64 = 50.0;

/// Computes the lookback period for `HT_TRENDLINE`.
#[inline]
#[must_use]
pub const fn ht_trendline_lookback() -> usize {
    63
}

/// Returns the minimum input length that yields a defined `HT_TRENDLINE` value.
#[inline]
#[must_use]
pub const fn ht_trendline_min_len() -> usize {
    64
}

/// Incremental 4-bar WMA with weights 4:3:2:1.
///
/// Keeps a running sum and a running weighted sum; each update adds the new
/// price with weight 4 and removes the price that fell out of the window.
#[derive(Debug, Clone, Copy)]
struct PriceWma<T> {
    sum: T,
    weighted_sum: T,
    trailing: T,
}

impl<T: SeriesElement> PriceWma<T> {
    fn new() -> Self {
        Self {
            sum: T::zero(),
            weighted_sum: T::zero(),
            trailing: T::zero(),
        }
    }

    /// Adds one of the first three prices with weight `bar + 1`.
    fn prime(&mut self, price: T, weight: T) {
        self.sum = self.sum + price;
        self.weighted_sum = self.weighted_sum + price * weight;
    }

    /// Adds `price`, returns the smoothed value and retires `oldest`.
    fn update(&mut self, price: T, oldest: T, c: &Coefficients<T>) -> T {
        self.sum = self.sum + price;
        self.sum = self.sum - self.trailing;
        self.weighted_sum = self.weighted_sum + price * c.four;
        self.trailing = oldest;
        let smoothed = self.weighted_sum * c.tenth;
        self.weighted_sum = self.weighted_sum - self.sum;
        smoothed
    }
}

/// Every constant of the pipeline, converted once to `T`.
#[derive(Debug, Clone, Copy)]
struct Coefficients<T> {
    hilbert: HilbertCoefficients<T>,
    alpha: T,
    one_minus_alpha: T,
    smooth_alpha: T,
    one_minus_smooth_alpha: T,
    max_ratio: T,
    min_ratio: T,
    min_period: T,
    max_period: T,
    full_circle: T,
    rad_to_deg: T,
    half: T,
    one: T,
    two: T,
    three: T,
    four: T,
    ten: T,
    tenth: T,
}

impl<T: SeriesElement> Coefficients<T> {
    fn new() -> Result<Self> {
        Ok(Self {
            hilbert: HilbertCoefficients::new()?,
            alpha: T::from_f64(PHASOR_ALPHA)?,
            one_minus_alpha: T::from_f64(PHASOR_DECAY)?,
            smooth_alpha: T::from_f64(SMOOTH_PERIOD_ALPHA)?,
            one_minus_smooth_alpha: T::from_f64(SMOOTH_PERIOD_DECAY)?,
            max_ratio: T::from_f64(PERIOD_MAX_RATIO)?,
            min_ratio: T::from_f64(PERIOD_MIN_RATIO)?,
            min_period: T::from_f64(MIN_PERIOD)?,
            max_period: T::from_f64(MAX_PERIOD)?,
            full_circle: T::from_f64(360.0)?,
            rad_to_deg: T::from_f64(180.0 / (4.0 * 1.0_f64.atan()))?,
            half: T::from_f64(0.5)?,
            one: T::one(),
            two: T::from_f64(2.0)?,
            three: T::from_f64(3.0)?,
            four: T::from_f64(4.0)?,
            ten: T::from_f64(10.0)?,
            tenth: T::from_f64(0.1)?,
        })
    }
}

/// Per-bar `HT_TRENDLINE` state machine.
///
/// Feed prices in order with [`next`](Self::next); it returns `None` for the
/// first 63 bars and the trendline value afterwards.
///
/// ```
/// use ta_trend::indicators::ht_trendline::HtTrendline;
///
/// let mut engine = HtTrendline::<f64>::new().unwrap();
/// let values: Vec<Option<f64>> = (0..70).map(|_| engine.next(100.0)).collect();
/// assert!(values[..63].iter().all(Option::is_none));
/// assert!((values[69].unwrap() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct HtTrendline<T: SeriesElement> {
    c: Coefficients<T>,
    bars: usize,
    prices: RingWindow<T, MAX_DOMINANT_CYCLE>,
    wma: PriceWma<T>,
    detrender: HilbertStage<T>,
    q1: HilbertStage<T>,
    ji: HilbertStage<T>,
    jq: HilbertStage<T>,
    slot: usize,
    /// Detrender history by parity, feeding the three-bar delayed `I1`.
    i1_odd_prev2: T,
    i1_odd_prev3: T,
    i1_even_prev2: T,
    i1_even_prev3: T,
    prev_i2: T,
    prev_q2: T,
    re: T,
    im: T,
    period: T,
    smooth_period: T,
    /// Last three instantaneous trend values, newest first.
    i_trend: [T; 3],
    /// `window_divisors[k] == k`, for averaging the last `k` prices.
    window_divisors: [T; MAX_DOMINANT_CYCLE + 1],
}

impl<T: SeriesElement> HtTrendline<T> {
    /// Creates an engine with all filter state zeroed.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if a filter constant cannot be
    /// represented in `T`.
    pub fn new() -> Result<Self> {
        let zero = T::zero();
        let mut window_divisors = [zero; MAX_DOMINANT_CYCLE + 1];
        for (len, divisor) in window_divisors.iter_mut().enumerate() {
            *divisor = T::from_usize(len)?;
        }
        Ok(Self {
            c: Coefficients::new()?,
            bars: 0,
            prices: RingWindow::new(),
            wma: PriceWma::new(),
            detrender: HilbertStage::new(),
            q1: HilbertStage::new(),
            ji: HilbertStage::new(),
            jq: HilbertStage::new(),
            slot: 0,
            i1_odd_prev2: zero,
            i1_odd_prev3: zero,
            i1_even_prev2: zero,
            i1_even_prev3: zero,
            prev_i2: zero,
            prev_q2: zero,
            re: zero,
            im: zero,
            period: zero,
            smooth_period: zero,
            i_trend: [zero; 3],
            window_divisors,
        })
    }

    /// Number of bars consumed so far.
    #[inline]
    #[must_use]
    pub const fn bars(&self) -> usize {
        self.bars
    }

    /// Current smoothed dominant cycle period estimate.
    #[inline]
    #[must_use]
    pub const fn smooth_period(&self) -> T {
        self.smooth_period
    }

    /// Trendline for a bar that is still forming, without committing it.
    #[must_use]
    pub fn peek(&self, price: T) -> Option<T> {
        self.clone().next(price)
    }

    /// Processes one price; returns the trendline once warm-up is over.
    pub fn next(&mut self, price: T) -> Option<T> {
        let bar = self.bars;
        self.bars += 1;
        self.prices.push(price);

        if bar < WMA_PRIMING_BARS {
            self.wma.prime(price, self.priming_weight(bar));
            return None;
        }

        let oldest = self.prices.back(WMA_PRIMING_BARS).unwrap_or_else(T::zero);
        let smoothed = self.wma.update(price, oldest, &self.c);
        if bar < HILBERT_START {
            return None;
        }

        let trend = self.cycle_step(bar, smoothed);
        (bar >= ht_trendline_lookback()).then_some(trend)
    }

    /// Weights 1, 2, 3 for the three oldest prices of the first window.
    #[inline]
    const fn priming_weight(&self, bar: usize) -> T {
        match bar {
            0 => self.c.one,
            1 => self.c.two,
            _ => self.c.three,
        }
    }

    fn cycle_step(&mut self, bar: usize, smoothed: T) -> T {
        let c = self.c;
        let gain = c.hilbert.gain(self.period);
        let parity = Parity::of(bar);

        let delayed_i1 = match parity {
            Parity::Even => self.i1_even_prev3,
            Parity::Odd => self.i1_odd_prev3,
        };

        let detrender = self
            .detrender
            .apply(smoothed, parity, self.slot, &c.hilbert, gain);
        let q1 = self.q1.apply(detrender, parity, self.slot, &c.hilbert, gain);
        let ji = self.ji.apply(delayed_i1, parity, self.slot, &c.hilbert, gain);
        let jq = self.jq.apply(q1, parity, self.slot, &c.hilbert, gain);

        match parity {
            Parity::Even => {
                self.slot = next_slot(self.slot);
                self.i1_odd_prev3 = self.i1_odd_prev2;
                self.i1_odd_prev2 = detrender;
            }
            Parity::Odd => {
                self.i1_even_prev3 = self.i1_even_prev2;
                self.i1_even_prev2 = detrender;
            }
        }

        let q2 = c.alpha * (q1 + ji) + c.one_minus_alpha * self.prev_q2;
        let i2 = c.alpha * (delayed_i1 - jq) + c.one_minus_alpha * self.prev_i2;

        self.re = c.alpha * (i2 * self.prev_i2 + q2 * self.prev_q2) + c.one_minus_alpha * self.re;
        self.im = c.alpha * (i2 * self.prev_q2 - q2 * self.prev_i2) + c.one_minus_alpha * self.im;
        self.prev_q2 = q2;
        self.prev_i2 = i2;

        self.update_period();

        let dominant_cycle = (self.smooth_period + c.half).truncate_to_len();
        let trend = self.instantaneous_trend(dominant_cycle);

        let [it1, it2, it3] = self.i_trend;
        let trendline = (c.four * trend + c.three * it1 + c.two * it2 + it3) / c.ten;
        self.i_trend = [trend, it1, it2];
        trendline
    }

    fn update_period(&mut self) {
        let c = self.c;
        let prev = self.period;
        let mut period = prev;

        if self.im != T::zero() && self.re != T::zero() {
            period = c.full_circle / ((self.im / self.re).atan() * c.rad_to_deg);
        }

        let ceiling = c.max_ratio * prev;
        if period > ceiling {
            period = ceiling;
        }
        let floor = c.min_ratio * prev;
        if period < floor {
            period = floor;
        }
        if period < c.min_period {
            period = c.min_period;
        } else if period > c.max_period {
            period = c.max_period;
        }

        self.period = c.alpha * period + c.one_minus_alpha * prev;
        self.smooth_period =
            c.smooth_alpha * self.period + c.one_minus_smooth_alpha * self.smooth_period;
    }

    /// Mean of the newest `window` raw prices, or zero for an empty window.
    fn instantaneous_trend(&self, window: usize) -> T {
        let window = window.min(self.prices.len());
        if window == 0 {
            return T::zero();
        }
        self.prices.sum_recent(window) / self.window_divisors[window]
    }
}

/// Computes Hilbert Transform Trendline into a pre-allocated output buffer.
///
/// Returns the number of defined values written.
///
/// # Errors
///
/// Returns an error if:
/// - The output buffer is too small (`Error::BufferTooSmall`)
/// - A filter constant cannot be represented in `T` (`Error::NumericConversion`)
pub fn ht_trendline_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<usize> {
    data.validate_output_len(output.len(), INDICATOR)?;

    let n = data.len();
    let begin = first_valid_index(data).unwrap_or(n);
    let warmup = warmup_len(n, begin, ht_trendline_lookback());
    fill_warmup(output, warmup);

    if warmup == n {
        tracing::debug!(
            len = n,
            begin,
            min_len = ht_trendline_min_len(),
            "ht_trendline: input shorter than warm-up, output undefined"
        );
        return Ok(0);
    }

    let mut engine = HtTrendline::new()?;
    let mut defined = 0;
    for (&price, out) in data[begin..].iter().zip(&mut output[begin..n]) {
        if let Some(value) = engine.next(price) {
            *out = value;
            defined += 1;
        }
    }

    Ok(defined)
}

/// Computes Hilbert Transform Trendline.
///
/// # Example
///
/// ```
/// use ta_trend::indicators::ht_trendline;
///
/// let prices: Vec<f64> = (0..100).map(|x| 50.0 + (x as f64 * 0.2).sin() * 10.0).collect();
/// let result = ht_trendline(&prices).unwrap();
/// assert_eq!(result.len(), 100);
/// assert!(!result.is_defined(62));
/// assert!(result.is_defined(63));
/// ```
///
/// # Errors
///
/// Returns `Error::NumericConversion` if a filter constant cannot be represented in `T`.
pub fn ht_trendline<T: SeriesElement>(data: &[T]) -> Result<Series<T>> {
    let mut output = vec![T::nan(); data.len()];
    ht_trendline_into(data, &mut output)?;
    Ok(Series::from(output))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|x| x as f64).collect()
    }

    #[test]
    fn test_ht_trendline_lookback() {
        assert_eq!(ht_trendline_lookback(), 63);
        assert_eq!(ht_trendline_min_len(), 64);
    }

    #[test]
    fn test_ht_trendline_empty_input() {
        let data: Vec<f64> = vec![];
        let result = ht_trendline(&data).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_ht_trendline_short_input_all_undefined() {
        for n in [1, 10, 50, 63] {
            let result = ht_trendline(&ramp(n)).unwrap();
            assert_eq!(result.len(), n);
            assert!(result.iter().all(|v| v.is_nan()), "n={n}");
        }
    }

    #[test]
    fn test_ht_trendline_minimum_length() {
        let result = ht_trendline(&ramp(64)).unwrap();
        assert_eq!(result.len(), 64);
        assert!((0..63).all(|i| !result.is_defined(i)));
        assert!(result[63].is_finite());
    }

    #[test]
    fn test_ht_trendline_defined_after_warmup() {
        let result = ht_trendline(&ramp(100)).unwrap();
        assert_eq!(result.first_defined(), Some(63));
        assert!(result[63..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_ht_trendline_constant_data() {
        let data = vec![50.0_f64; 100];
        let result = ht_trendline(&data).unwrap();
        for i in 63..100 {
            assert!((result[i] - 50.0).abs() < 1e-9, "result[{}]={}", i, result[i]);
        }
    }

    #[test]
    fn test_ht_trendline_trending_data() {
        let data = ramp(150);
        let result = ht_trendline(&data).unwrap();
        let increasing = (64..150).filter(|&i| result[i] > result[i - 1]).count();
        assert!(increasing > (150 - 64) / 2);
        // The trendline lags a rising ramp.
        assert!((64..150).all(|i| result[i] < data[i]));
    }

    #[test]
    fn test_ht_trendline_cyclic_data_stays_in_range() {
        let data: Vec<f64> = (0..200)
            .map(|x| 50.0 + (x as f64 * 0.2).sin() * 10.0)
            .collect();
        let result = ht_trendline(&data).unwrap();
        for i in 63..200 {
            assert!(result[i] > 40.0 && result[i] < 60.0, "result[{}]={}", i, result[i]);
        }
    }

    #[test]
    fn test_ht_trendline_smooth_period_in_range() {
        let data: Vec<f64> = (0..300)
            .map(|x| 100.0 + (x as f64 * 2.0 * std::f64::consts::PI / 20.0).sin() * 5.0)
            .collect();
        let mut engine = HtTrendline::new().unwrap();
        for (i, &x) in data.iter().enumerate() {
            engine.next(x);
            if i >= 63 {
                let p = engine.smooth_period();
                assert!(p > 0.0 && p <= 50.0, "bar {i}: smooth period {p}");
            }
        }
        assert_eq!(engine.bars(), 300);
    }

    #[test]
    fn test_ht_trendline_engine_matches_batch() {
        let data: Vec<f64> = (0..120).map(|x| 20.0 + (x as f64 * 0.3).cos() * 3.0).collect();
        let batch = ht_trendline(&data).unwrap();
        let mut engine = HtTrendline::new().unwrap();
        for (i, &x) in data.iter().enumerate() {
            match engine.next(x) {
                Some(v) => assert_eq!(v.to_bits(), batch[i].to_bits()),
                None => assert!(!batch.is_defined(i)),
            }
        }
    }

    #[test]
    fn test_ht_trendline_leading_nan_shifts_warmup() {
        let mut data = vec![f64::NAN; 5];
        data.extend(ramp(80));
        let result = ht_trendline(&data).unwrap();
        assert_eq!(result.first_defined(), Some(68));

        let unshifted = ht_trendline(&ramp(80)).unwrap();
        assert!((result[68] - unshifted[63]).abs() < 1e-12);
    }

    #[test]
    fn test_ht_trendline_into() {
        let data = ramp(100);
        let mut output = vec![0.0_f64; data.len()];
        let defined = ht_trendline_into(&data, &mut output).unwrap();
        assert_eq!(defined, 37);
        assert!(output[..63].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ht_trendline_into_buffer_too_small() {
        let data = ramp(100);
        let mut output = vec![0.0_f64; 50];
        let result = ht_trendline_into(&data, &mut output);
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_ht_trendline_f32() {
        let data: Vec<f32> = (1..=100).map(|x| x as f32).collect();
        let result = ht_trendline(&data).unwrap();
        assert_eq!(result.len(), 100);
        assert!(result[..63].iter().all(|v| v.is_nan()));
        assert!(result[63..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_ht_trendline_peek_revises_forming_bar() {
        let data: Vec<f64> = (0..90).map(|x| 30.0 + (x as f64 * 0.4).sin() * 2.0).collect();
        let batch = ht_trendline(&data).unwrap();

        let mut engine = HtTrendline::new().unwrap();
        for (i, &price) in data.iter().enumerate() {
            let _ = engine.peek(price * 3.0);
            let _ = engine.peek(price - 1.0);
            assert_eq!(engine.bars(), i);

            let forming = engine.peek(price);
            let closed = engine.next(price);
            assert_eq!(forming.map(f64::to_bits), closed.map(f64::to_bits));
            match closed {
                Some(v) => assert_eq!(v.to_bits(), batch[i].to_bits()),
                None => assert!(!batch.is_defined(i)),
            }
        }
    }

    #[test]
    fn test_ht_trendline_window_divisors_exact() {
        let engine = HtTrendline::<f32>::new().unwrap();
        assert_eq!(engine.window_divisors.len(), MAX_DOMINANT_CYCLE + 1);
        for (len, &d) in engine.window_divisors.iter().enumerate() {
            assert_eq!(d, len as f32);
        }
    }

    #[test]
    fn test_ht_trendline_instantaneous_trend_mean() {
        let mut engine = HtTrendline::new().unwrap();
        for x in [2.0_f64, 4.0, 6.0, 8.0, 10.0] {
            engine.prices.push(x);
        }
        assert_eq!(engine.instantaneous_trend(0), 0.0);
        assert_eq!(engine.instantaneous_trend(2), 9.0);
        assert_eq!(engine.instantaneous_trend(5), 6.0);
        // Windows longer than the history average what is available.
        assert_eq!(engine.instantaneous_trend(50), 6.0);
    }
}
