//! Batch processing utilities for running an engine over many series.
//!
//! With the `parallel` feature enabled, batches at or above the configured
//! threshold are fanned out with Rayon; smaller batches (and all batches
//! without the feature) run sequentially. The first error short-circuits the
//! whole batch.
//!
//! ```toml
//! [dependencies]
//! ta-trend = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use ta_trend::batch::BatchProcessor;
//! use ta_trend::indicators::ht_trendline;
//!
//! let series: Vec<Vec<f64>> = (0..3)
//!     .map(|k| (0..80).map(|i| 100.0 + f64::from(k) + (f64::from(i) * 0.3).sin()).collect())
//!     .collect();
//!
//! let results = BatchProcessor::new()
//!     .process(&series, |s| ht_trendline(s))
//!     .unwrap();
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|r| r.first_defined() == Some(63)));
//! ```

use crate::error::Result;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of series at which a batch goes parallel.
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Batch processor for indicator computation over many series.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Minimum number of series before Rayon is used.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a new batch processor with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the minimum number of series required to use parallel processing.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns the configured parallel threshold.
    #[must_use]
    pub const fn get_min_parallel_threshold(&self) -> usize {
        self.min_parallel_threshold
    }

    /// Returns `true` if a batch of `count` series would run in parallel.
    #[must_use]
    pub const fn is_parallel(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && count >= self.min_parallel_threshold
    }

    /// Applies `indicator_fn` to every series and collects the results in order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(feature = "parallel")]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        let refs: Vec<&[T]> = series.iter().map(Vec::as_slice).collect();
        self.process_refs(&refs, indicator_fn)
    }

    /// Applies `indicator_fn` to every series and collects the results in order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(not(feature = "parallel"))]
    pub fn process<T, F, R>(&self, series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R>,
    {
        let refs: Vec<&[T]> = series.iter().map(Vec::as_slice).collect();
        self.process_refs(&refs, indicator_fn)
    }

    /// Like [`process`](Self::process), but accepts borrowed slices.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(feature = "parallel")]
    pub fn process_refs<T, F, R>(&self, series: &[&[T]], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        let parallel = self.is_parallel(series.len());
        tracing::debug!(series = series.len(), parallel, "batch: dispatching");
        if parallel {
            series
                .par_iter()
                .map(|s| indicator_fn(s))
                .collect::<Result<Vec<R>>>()
        } else {
            series.iter().map(|s| indicator_fn(s)).collect()
        }
    }

    /// Like [`process`](Self::process), but accepts borrowed slices.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(not(feature = "parallel"))]
    pub fn process_refs<T, F, R>(&self, series: &[&[T]], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R>,
    {
        tracing::debug!(series = series.len(), parallel = false, "batch: dispatching");
        series.iter().map(|s| indicator_fn(s)).collect()
    }

    /// Applies a high/low indicator to every `(high, low)` pair.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(feature = "parallel")]
    pub fn process_hl<T, F, R>(&self, datasets: &[(Vec<T>, Vec<T>)], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        let parallel = self.is_parallel(datasets.len());
        tracing::debug!(series = datasets.len(), parallel, "batch: dispatching high/low pairs");
        if parallel {
            datasets
                .par_iter()
                .map(|(h, l)| indicator_fn(h, l))
                .collect::<Result<Vec<R>>>()
        } else {
            datasets.iter().map(|(h, l)| indicator_fn(h, l)).collect()
        }
    }

    /// Applies a high/low indicator to every `(high, low)` pair.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    #[cfg(not(feature = "parallel"))]
    pub fn process_hl<T, F, R>(&self, datasets: &[(Vec<T>, Vec<T>)], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T], &[T]) -> Result<R>,
    {
        tracing::debug!(series = datasets.len(), parallel = false, "batch: dispatching high/low pairs");
        datasets.iter().map(|(h, l)| indicator_fn(h, l)).collect()
    }
}

/// Shorthand for [`BatchProcessor::process`] with default settings.
///
/// # Errors
///
/// Returns the first error produced by `indicator_fn`.
#[cfg(feature = "parallel")]
pub fn process_batch<T, F, R>(series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T]) -> Result<R> + Send + Sync,
    R: Send,
{
    BatchProcessor::new().process(series, indicator_fn)
}

/// Shorthand for [`BatchProcessor::process`] with default settings.
///
/// # Errors
///
/// Returns the first error produced by `indicator_fn`.
#[cfg(not(feature = "parallel"))]
pub fn process_batch<T, F, R>(series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T]) -> Result<R>,
{
    BatchProcessor::new().process(series, indicator_fn)
}

/// Shorthand for [`BatchProcessor::process_hl`] with default settings.
///
/// ```
/// use ta_trend::batch::process_hl_batch;
/// use ta_trend::indicators::sar;
///
/// let datasets = vec![
///     (vec![10.0_f64, 11.0, 12.0], vec![8.0, 9.0, 10.0]),
///     (vec![20.0, 21.0, 22.0], vec![18.0, 19.0, 20.0]),
/// ];
/// let results = process_hl_batch(&datasets, |h, l| sar(h, l)).unwrap();
/// assert_eq!(results[0][1], 8.0);
/// assert_eq!(results[1][1], 18.0);
/// ```
///
/// # Errors
///
/// Returns the first error produced by `indicator_fn`.
#[cfg(feature = "parallel")]
pub fn process_hl_batch<T, F, R>(datasets: &[(Vec<T>, Vec<T>)], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
    R: Send,
{
    BatchProcessor::new().process_hl(datasets, indicator_fn)
}

/// Shorthand for [`BatchProcessor::process_hl`] with default settings.
///
/// ```
/// use ta_trend::batch::process_hl_batch;
/// use ta_trend::indicators::sar;
///
/// let datasets = vec![
///     (vec![10.0_f64, 11.0, 12.0], vec![8.0, 9.0, 10.0]),
///     (vec![20.0, 21.0, 22.0], vec![18.0, 19.0, 20.0]),
/// ];
/// let results = process_hl_batch(&datasets, |h, l| sar(h, l)).unwrap();
/// assert_eq!(results[0][1], 8.0);
/// assert_eq!(results[1][1], 18.0);
/// ```
///
/// # Errors
///
/// Returns the first error produced by `indicator_fn`.
#[cfg(not(feature = "parallel"))]
pub fn process_hl_batch<T, F, R>(datasets: &[(Vec<T>, Vec<T>)], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T], &[T]) -> Result<R>,
{
    BatchProcessor::new().process_hl(datasets, indicator_fn)
}
