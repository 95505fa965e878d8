//! Error types for ta-trend.
//!
//! Both indicator engines are deterministic: a given input either succeeds or
//! fails with one of the variants below, and no partial output is returned on
//! failure. Short or empty inputs are *not* errors; they produce an empty or
//! all-undefined output series instead.

use thiserror::Error;

/// The main error type for ta-trend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input series violate a structural precondition.
    ///
    /// Returned by SAR when the high and low series have different lengths.
    #[error("invalid input for {indicator}: {description}")]
    InvalidInput {
        /// The indicator that rejected the input.
        indicator: &'static str,
        /// Which precondition was violated.
        description: String,
    },

    /// A numeric parameter is outside the range accepted by the indicator.
    #[error("invalid parameter `{name}` for {indicator}: {reason}")]
    InvalidParameter {
        /// The indicator that rejected the parameter.
        indicator: &'static str,
        /// The parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The caller-supplied output buffer is shorter than the input.
    #[error("output buffer too small for {indicator}: required {required}, got {actual}")]
    BufferTooSmall {
        /// The indicator being computed.
        indicator: &'static str,
        /// The number of elements the buffer must hold.
        required: usize,
        /// The length of the supplied buffer.
        actual: usize,
    },

    /// A positional access fell outside a series.
    #[error("index {index} out of bounds for series of length {len}")]
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// The length of the series.
        len: usize,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This occurs when a filter constant cannot be represented in the
    /// series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the ta-trend Error type.
pub type Result<T> = std::result::Result<T, Error>;
