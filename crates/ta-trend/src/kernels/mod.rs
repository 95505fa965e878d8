//! Reusable building blocks for the indicator engines.
//!
//! # Kernels
//!
//! - [`ring_window`]: fixed-capacity ring buffer over the most recent samples,
//!   used by the `HT_TRENDLINE` engine for its price history

pub mod ring_window;

pub use ring_window::RingWindow;
