//! Core traits for ta-trend numeric operations.
//!
//! The primary trait is [`SeriesElement`], which abstracts over `f32` and `f64`
//! so both engines can be written once. [`ValidatedInput`] carries the few
//! structural checks the engines perform before a pass.
//!
//! # Example
//!
//! ```
//! use ta_trend::traits::{SeriesElement, ValidatedInput};
//!
//! fn spread<T: SeriesElement>(high: &[T], low: &[T]) -> ta_trend::Result<Vec<T>> {
//!     high.validate_paired_with(low, "spread")?;
//!     Ok(high.iter().zip(low).map(|(&h, &l)| h - l).collect())
//! }
//!
//! let result = spread(&[3.0_f64, 4.0], &[1.0, 1.5]).unwrap();
//! assert!((result[1] - 2.5).abs() < 1e-12);
//! assert!(spread(&[3.0_f64], &[1.0, 2.0]).is_err());
//! ```

use num_traits::{Float, NumCast, ToPrimitive};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// Requires `Send + Sync` so independent series can be processed on separate
/// threads (see [`crate::batch`]).
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Truncates toward zero and converts to a window length.
    ///
    /// NaN, negative and out-of-range values map to zero.
    #[inline]
    #[must_use]
    fn truncate_to_len(self) -> usize {
        ToPrimitive::to_usize(&self.trunc()).unwrap_or(0)
    }

    /// Returns the widened `f64` value, used in diagnostics.
    #[inline]
    #[must_use]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Structural validation performed before an indicator pass.
pub trait ValidatedInput {
    /// Returns the length of the series.
    fn series_len(&self) -> usize;

    /// Validates that a paired series (e.g. high and low) has the same length.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` describing both lengths when they differ.
    #[inline]
    fn validate_paired_with<O: ValidatedInput + ?Sized>(
        &self,
        other: &O,
        indicator: &'static str,
    ) -> Result<()> {
        if self.series_len() == other.series_len() {
            Ok(())
        } else {
            Err(Error::InvalidInput {
                indicator,
                description: format!(
                    "high has {} elements, low has {}",
                    self.series_len(),
                    other.series_len()
                ),
            })
        }
    }

    /// Validates that an output buffer can hold one value per input element.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `output_len` is shorter than the series.
    #[inline]
    fn validate_output_len(&self, output_len: usize, indicator: &'static str) -> Result<()> {
        if output_len < self.series_len() {
            Err(Error::BufferTooSmall {
                indicator,
                required: self.series_len(),
                actual: output_len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    #[inline]
    fn series_len(&self) -> usize {
        self.len()
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    #[inline]
    fn series_len(&self) -> usize {
        self.len()
    }
}

/// Validates that an acceleration-style parameter is finite and non-negative.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` for negative, NaN or infinite values.
#[inline]
pub fn validate_non_negative<T: SeriesElement>(
    value: T,
    name: &'static str,
    indicator: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            indicator,
            name,
            reason: format!(
                "must be a finite, non-negative number (got {})",
                value.as_f64()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_element_from_f64() {
        let val: f64 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val - std::f64::consts::PI).abs() < 1e-12);

        let val_f32: f32 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val_f32 - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_series_element_from_usize() {
        let val: f64 = SeriesElement::from_usize(42).unwrap();
        assert!((val - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_truncate_to_len() {
        assert_eq!(6.4_f64.truncate_to_len(), 6);
        assert_eq!(6.99_f64.truncate_to_len(), 6);
        assert_eq!(50.5_f32.truncate_to_len(), 50);
        assert_eq!(0.49_f64.truncate_to_len(), 0);
        assert_eq!(f64::NAN.truncate_to_len(), 0);
        assert_eq!((-3.0_f64).truncate_to_len(), 0);
    }

    #[test]
    fn test_as_f64() {
        assert!((1.5_f32.as_f64() - 1.5).abs() < 1e-12);
        assert!(f32::NAN.as_f64().is_nan());
    }

    #[test]
    fn test_validate_paired_with() {
        let high: Vec<f64> = vec![1.0, 2.0, 3.0];
        let low: Vec<f64> = vec![0.5, 1.5, 2.5];
        assert!(high.validate_paired_with(&low, "sar").is_ok());

        let short: Vec<f64> = vec![0.5];
        match high.validate_paired_with(&short, "sar") {
            Err(Error::InvalidInput {
                indicator,
                description,
            }) => {
                assert_eq!(indicator, "sar");
                assert_eq!(description, "high has 3 elements, low has 1");
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_paired_with_empty() {
        let empty: Vec<f64> = vec![];
        assert!(empty.validate_paired_with(&empty, "sar").is_ok());
    }

    #[test]
    fn test_validate_output_len() {
        let data: &[f64] = &[1.0, 2.0, 3.0];
        assert!(data.validate_output_len(3, "test").is_ok());
        assert!(data.validate_output_len(10, "test").is_ok());
        assert!(matches!(
            data.validate_output_len(2, "test"),
            Err(Error::BufferTooSmall {
                required: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0_f64, "acceleration", "sar").is_ok());
        assert!(validate_non_negative(0.02_f64, "acceleration", "sar").is_ok());
        assert!(matches!(
            validate_non_negative(-0.02_f64, "acceleration", "sar"),
            Err(Error::InvalidParameter {
                name: "acceleration",
                ..
            })
        ));
        assert!(validate_non_negative(f64::NAN, "maximum", "sar").is_err());
        assert!(validate_non_negative(f64::INFINITY, "maximum", "sar").is_err());
    }

    #[test]
    fn test_series_element_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<f64>();
        assert_send_sync::<f32>();
    }
}
