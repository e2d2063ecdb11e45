//! Period grids anchored at a fixed epoch.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::Period;
use crate::error::{TallyError, TallyResult};
use crate::types::{Frequency, FrequencyUnit, Instant};

/// The tiling of the UTC timeline into consecutive periods of one frequency.
///
/// Period `0` starts at the grid origin, which depends only on the epoch's
/// UTC calendar date:
///
/// | Unit  | Origin                                   |
/// |-------|------------------------------------------|
/// | day   | the epoch's date                         |
/// | week  | the Monday on or before the epoch's date |
/// | month | the first of the epoch's month           |
/// | year  | January 1 of the epoch's year            |
///
/// Period `i` covers `[origin + i*n units, origin + (i+1)*n units)`. Negative
/// indices cover instants before the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodGrid {
    frequency: Frequency,
    origin: NaiveDate,
}

impl PeriodGrid {
    /// Creates the grid for a frequency and epoch.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if the grid origin lies before the
    /// earliest representable date, e.g. the Monday before a week epoch
    /// at the very start of the calendar.
    pub fn new(frequency: Frequency, epoch: Instant) -> TallyResult<Self> {
        let date = epoch.date();
        let origin = match frequency.unit() {
            FrequencyUnit::Day => Some(date),
            FrequencyUnit::Week => date.checked_sub_days(Days::new(u64::from(
                date.weekday().num_days_from_monday(),
            ))),
            FrequencyUnit::Month => date.with_day(1),
            FrequencyUnit::Year => date.with_ordinal(1),
        }
        .ok_or_else(|| {
            TallyError::overflow(format!("{frequency} grid origin for epoch {date}"))
        })?;
        Ok(Self { frequency, origin })
    }

    /// The grid's frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Start of period `0`, at UTC midnight.
    #[must_use]
    pub fn origin(&self) -> Instant {
        Instant::from_date(self.origin)
    }

    /// Index of the period containing `instant`.
    #[must_use]
    pub fn index_of(&self, instant: Instant) -> i64 {
        let date = instant.date();
        let n = i64::from(self.frequency.value());
        match self.frequency.unit() {
            FrequencyUnit::Day => (date - self.origin).num_days().div_euclid(n),
            FrequencyUnit::Week => (date - self.origin).num_days().div_euclid(7 * n),
            FrequencyUnit::Month => {
                let months = i64::from(date.year() - self.origin.year()) * 12
                    + i64::from(date.month())
                    - i64::from(self.origin.month());
                months.div_euclid(n)
            }
            FrequencyUnit::Year => i64::from(date.year() - self.origin.year()).div_euclid(n),
        }
    }

    /// The period containing `instant`.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if the period's end lies outside the
    /// representable date range.
    pub fn period_for(&self, instant: Instant) -> TallyResult<Period> {
        self.period_at(self.index_of(instant))
    }

    /// The period with the given index.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if either bound lies outside the
    /// representable date range.
    pub fn period_at(&self, index: i64) -> TallyResult<Period> {
        let start = self.boundary(index)?;
        let next = index
            .checked_add(1)
            .ok_or_else(|| TallyError::overflow(format!("period index {index}")))?;
        let end = self.boundary(next)?;
        let key = format!(
            "{}/{}",
            start.format("%Y-%m-%d"),
            self.frequency.duration_code()
        );
        Ok(Period::new(
            key,
            index,
            Instant::from_date(start),
            Instant::from_date(end),
        ))
    }

    /// Start date of period `index`.
    fn boundary(&self, index: i64) -> TallyResult<NaiveDate> {
        let overflow = || {
            TallyError::overflow(format!(
                "period {index} of {} from {}",
                self.frequency, self.origin
            ))
        };
        let steps = index
            .checked_mul(i64::from(self.frequency.value()))
            .ok_or_else(overflow)?;
        let shifted = match self.frequency.unit() {
            FrequencyUnit::Day => shift_days(self.origin, steps),
            FrequencyUnit::Week => steps.checked_mul(7).and_then(|d| shift_days(self.origin, d)),
            FrequencyUnit::Month => shift_months(self.origin, steps),
            FrequencyUnit::Year => steps
                .checked_mul(12)
                .and_then(|m| shift_months(self.origin, m)),
        };
        shifted.ok_or_else(overflow)
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    }
}

// Origins are always the first of a month, so no end-of-month clamping occurs.
fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    }
}
