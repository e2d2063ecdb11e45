//! Period keying: mapping instants onto canonical recurrence periods.
//!
//! A [`Period`] is derived on demand from a [`Frequency`] and an epoch; it is
//! never stored. For a fixed `(frequency, epoch)` the mapping from instant to
//! period is a pure function, so two instants in the same period always get
//! byte-identical keys, no matter when or where the call runs.
//!
//! # Conventions
//!
//! - All arithmetic is on the UTC calendar date of the instant.
//! - Weeks run Monday through Sunday (ISO 8601). Multi-week periods are laid
//!   out from the Monday on or before the epoch.
//! - Month periods start on the first of a month, year periods on January 1.
//! - Without a natural epoch, use [`default_epoch`] (the Unix epoch) so that
//!   period boundaries never move as new data arrives.
//!
//! # Example
//!
//! ```rust
//! use tally_core::periods::{default_epoch, period_for};
//! use tally_core::types::{Frequency, Instant};
//!
//! let instant = Instant::parse("2024-01-20").unwrap();
//! let period = period_for(instant, Frequency::MONTHLY, default_epoch()).unwrap();
//! assert_eq!(period.key(), "2024-01-01/P1M");
//! assert_eq!(period.end(), Instant::parse("2024-02-01").unwrap());
//! ```

mod grid;

pub use grid::PeriodGrid;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TallyResult;
use crate::types::{Frequency, Instant};

/// The fixed epoch used when a caller has no natural one: `1970-01-01T00:00:00Z`.
#[must_use]
pub fn default_epoch() -> Instant {
    Instant::unix_epoch()
}

/// A half-open interval `[start, end)` of one recurrence period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    key: String,
    index: i64,
    start: Instant,
    end: Instant,
}

impl Period {
    pub(crate) fn new(key: String, index: i64, start: Instant, end: Instant) -> Self {
        Self {
            key,
            index,
            start,
            end,
        }
    }

    /// Canonical identifier, `<start date>/P<n><unit>`, e.g. `2024-01-01/P1M`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Position on the grid; period `0` starts at the grid origin.
    #[must_use]
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Inclusive start, at UTC midnight.
    #[must_use]
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Exclusive end, at UTC midnight.
    #[must_use]
    pub fn end(&self) -> Instant {
        self.end
    }

    /// Whether `instant` falls inside this period.
    #[must_use]
    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// The period of `frequency` containing `instant`, on the grid anchored at `epoch`.
///
/// # Errors
///
/// Returns `TallyError::Overflow` if the grid origin or the period lies
/// outside the representable date range. An invalid frequency cannot reach this point: [`Frequency`]
/// rejects it on construction with `TallyError::InvalidFrequency`.
pub fn period_for(instant: Instant, frequency: Frequency, epoch: Instant) -> TallyResult<Period> {
    PeriodGrid::new(frequency, epoch)?.period_for(instant)
}

/// The period with the given grid index.
///
/// # Errors
///
/// Returns `TallyError::Overflow` if the period lies outside the representable
/// date range.
pub fn period_at(index: i64, frequency: Frequency, epoch: Instant) -> TallyResult<Period> {
    PeriodGrid::new(frequency, epoch)?.period_at(index)
}
