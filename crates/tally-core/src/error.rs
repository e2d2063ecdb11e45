//! Error types for the Tally library.
//!
//! Every failure here is a local validation failure: callers must fix the
//! input, retrying will not help.

use thiserror::Error;

/// A specialized Result type for Tally operations.
pub type TallyResult<T> = Result<T, TallyError>;

/// The main error type for Tally operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// Frequency value below one, out of range, or an unknown unit.
    #[error("Invalid frequency: {reason}")]
    InvalidFrequency {
        /// Description of what's invalid.
        reason: String,
    },

    /// An average was requested over zero buckets.
    #[error("No data: cannot average an empty series")]
    NoData,

    /// A time series was not in ascending order.
    #[error("Unsorted series: point {index} precedes its predecessor")]
    UnsortedSeries {
        /// Index of the first out-of-order point.
        index: usize,
    },

    /// A timestamp could not be parsed at the ingestion boundary.
    #[error("Invalid instant: {message}")]
    InvalidInstant {
        /// Description of the parse failure.
        message: String,
    },

    /// Date or amount arithmetic left the representable range.
    #[error("Overflow: {reason}")]
    Overflow {
        /// Description of the overflowing computation.
        reason: String,
    },
}

impl TallyError {
    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(reason: impl Into<String>) -> Self {
        Self::InvalidFrequency {
            reason: reason.into(),
        }
    }

    /// Creates an unsorted series error.
    #[must_use]
    pub fn unsorted_series(index: usize) -> Self {
        Self::UnsortedSeries { index }
    }

    /// Creates an invalid instant error.
    #[must_use]
    pub fn invalid_instant(message: impl Into<String>) -> Self {
        Self::InvalidInstant {
            message: message.into(),
        }
    }

    /// Creates an overflow error.
    #[must_use]
    pub fn overflow(reason: impl Into<String>) -> Self {
        Self::Overflow {
            reason: reason.into(),
        }
    }
}
