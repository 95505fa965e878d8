//! ta-trend: Parabolic SAR and Hilbert Transform Trendline.
//!
//! Two trend-following indicators with TA-Lib compatible output:
//!
//! - [`indicators::sar()`]: Parabolic Stop-and-Reverse over high/low bars
//! - [`indicators::ht_trendline()`]: Hilbert Transform Instantaneous Trendline
//!   over a single price series
//!
//! Both work with `f32` and `f64` through [`SeriesElement`], return a
//! [`Series`] as long as the input, and mark warm-up positions with NaN.
//!
//! # Quick Start
//!
//! ```
//! use ta_trend::prelude::*;
//!
//! let high = vec![10.0_f64, 11.0, 12.0, 13.0, 14.0];
//! let low = vec![8.0_f64, 9.0, 10.0, 11.0, 12.0];
//!
//! let stops = sar(&high, &low).unwrap();
//! assert!(!stops.is_defined(0));
//! assert!((stops[1] - 8.0).abs() < 1e-12);
//!
//! // Too short for the 63-bar lookback: all undefined, not an error.
//! let trend = ht_trendline(&high).unwrap();
//! assert!(trend.iter().all(|v| v.is_nan()));
//! ```
//!
//! # Error Handling
//!
//! ```
//! use ta_trend::{sar, sar_with, Error};
//!
//! let result = sar(&[1.0_f64, 2.0], &[0.5]);
//! assert!(matches!(result, Err(Error::InvalidInput { .. })));
//!
//! let result = sar_with(&[1.0_f64, 2.0], &[0.5, 1.5], -0.02, 0.2);
//! assert!(matches!(result, Err(Error::InvalidParameter { .. })));
//! ```
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`] at `debug`/`trace` level; install any
//! subscriber to see them.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod lookback;
pub mod prelude;
pub mod series;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use indicators::{ht_trendline, sar, sar_with};
pub use series::Series;
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, count_undefined, count_undefined_prefix, FIXTURE_EPSILON};
