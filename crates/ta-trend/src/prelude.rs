//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use ta_trend::prelude::*;
//!
//! let high = vec![10.0_f64, 11.0, 12.0, 13.0];
//! let low = vec![8.0_f64, 9.0, 10.0, 11.0];
//!
//! let stops: Series<f64> = sar(&high, &low).unwrap();
//! assert_eq!(stops.len(), high.len());
//! assert_eq!(sar_lookback(), 1);
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Output buffer
pub use crate::series::Series;

// Indicator functions
pub use crate::indicators::{ht_trendline, ht_trendline_into, sar, sar_into, sar_with};

// Configuration and streaming state
pub use crate::indicators::{HtTrendline, Sar, SarState};

// Lookback functions
pub use crate::indicators::{
    ht_trendline_lookback, ht_trendline_min_len, sar_lookback, sar_min_len,
};
