//! Trend indicators.
//!
//! Both engines take plain slices and return a [`Series`](crate::series::Series)
//! of the same length as the input. Warm-up positions hold NaN; inputs too
//! short to produce any value give an all-NaN series instead of an error.
//!
//! - [`sar`]: Parabolic SAR (Wilder), a trailing stop that flips sides on
//!   penetration
//! - [`ht_trendline`]: Hilbert Transform Instantaneous Trendline (Ehlers), an
//!   adaptive-window trendline with a 63-bar lookback
//!
//! Leading NaN inputs are skipped: computation starts at the first defined
//! value and the warm-up is counted from there.
//!
//! # Example
//!
//! ```
//! use ta_trend::indicators::{ht_trendline, sar};
//!
//! let high: Vec<f64> = (0..80).map(|i| 101.0 + (f64::from(i) * 0.2).sin()).collect();
//! let low: Vec<f64> = high.iter().map(|h| h - 2.0).collect();
//!
//! let stops = sar(&high, &low).unwrap();
//! let trend = ht_trendline(&high).unwrap();
//! assert_eq!(stops.first_defined(), Some(1));
//! assert_eq!(trend.first_defined(), Some(63));
//! ```

pub mod hilbert;
pub mod ht_trendline;
pub mod sar;

pub use ht_trendline::{
    ht_trendline, ht_trendline_into, ht_trendline_lookback, ht_trendline_min_len, HtTrendline,
};
pub use sar::{sar, sar_into, sar_lookback, sar_min_len, sar_with, Sar, SarState};
