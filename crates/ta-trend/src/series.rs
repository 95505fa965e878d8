//! Fixed-length series buffer.
//!
//! [`Series`] is the output type of every indicator: one value per input bar,
//! with warm-up positions holding the undefined sentinel. It dereferences to a
//! slice, so indexing, iteration and `len()` work as they do on `Vec<T>`, and it
//! adds bounds-checked access plus conversions to and from `Option<T>`.
//!
//! ```
//! use ta_trend::Series;
//!
//! let series = Series::from(vec![f64::NAN, 1.5, 2.5]);
//! assert_eq!(series.len(), 3);
//! assert!(!series.is_defined(0));
//! assert!(series.is_defined(1));
//! assert!(series.get(3).is_err());
//! assert_eq!(series.to_options(), vec![None, Some(1.5), Some(2.5)]);
//! ```

use std::ops::Deref;

use crate::error::{Error, Result};
use crate::traits::SeriesElement;
use crate::utils::is_defined;

/// An ordered, fixed-length sequence of samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series<T> {
    values: Vec<T>,
}

impl<T: SeriesElement> Series<T> {
    /// Creates a series of `len` undefined values.
    #[must_use]
    pub fn undefined(len: usize) -> Self {
        Self {
            values: vec![T::nan(); len],
        }
    }

    /// Builds a series from optional values, mapping `None` to the undefined sentinel.
    #[must_use]
    pub fn from_options(values: &[Option<T>]) -> Self {
        values.iter().map(|v| v.unwrap_or_else(T::nan)).collect()
    }

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<T> {
        self.values
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
    }

    /// Returns `true` if `index` is in bounds and holds a computed value.
    #[inline]
    #[must_use]
    pub fn is_defined(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|&v| is_defined(v))
    }

    /// Index of the first defined value, if any.
    #[must_use]
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(|&v| is_defined(v))
    }

    /// Converts to optional values, mapping the undefined sentinel to `None`.
    #[must_use]
    pub fn to_options(&self) -> Vec<Option<T>> {
        self.values
            .iter()
            .map(|&v| is_defined(v).then_some(v))
            .collect()
    }

    /// Returns the underlying values as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Consumes the series and returns the underlying vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Deref for Series<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> AsRef<[T]> for Series<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.values
    }
}

impl<T> From<Vec<T>> for Series<T> {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T> From<Series<T>> for Vec<T> {
    #[inline]
    fn from(series: Series<T>) -> Self {
        series.values
    }
}

impl<T> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Series<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
