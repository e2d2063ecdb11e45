//! Date windows around an explicit "today".
//!
//! Balance charts show a short look-back and a forecast horizon; cash-flow
//! charts show calendar ranges. Every window is computed from an anchor the
//! caller passes in, never from the system clock.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use tally_core::types::Instant;
use tally_core::{TallyError, TallyResult};

/// An inclusive range of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, at UTC midnight
    pub start: Instant,
    /// Last day, at UTC midnight
    pub end: Instant,
}

impl DateRange {
    /// Creates a range covering the days of `start` through `end`.
    #[must_use]
    pub fn new(start: Instant, end: Instant) -> Self {
        Self {
            start: start.start_of_day(),
            end: end.start_of_day(),
        }
    }

    /// Whether `instant` falls on one of the range's days.
    #[must_use]
    pub fn contains(&self, instant: Instant) -> bool {
        let day = instant.start_of_day();
        self.start <= day && day <= self.end
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start.date_string(), self.end.date_string())
    }
}

/// How far a balance chart looks ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceHorizon {
    /// Seven days
    #[default]
    Week,
    /// Thirty days
    Month,
    /// Ninety days
    #[serde(alias = "threeMonths", alias = "three_months")]
    Quarter,
}

impl BalanceHorizon {
    /// Days shown after the anchor.
    #[must_use]
    pub fn forward_days(&self) -> u32 {
        match self {
            BalanceHorizon::Week => 7,
            BalanceHorizon::Month => 30,
            BalanceHorizon::Quarter => 90,
        }
    }
}

/// Days of balance history and forecast to request around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceWindow {
    /// Days shown before the anchor
    pub lookback_days: u32,
    /// Forecast length
    pub horizon: BalanceHorizon,
}

impl BalanceWindow {
    /// Look-back used by the daily balance chart.
    pub const DAILY_LOOKBACK_DAYS: u32 = 14;

    /// The daily balance chart: two weeks back, `horizon` ahead.
    #[must_use]
    pub fn daily_balance(horizon: BalanceHorizon) -> Self {
        Self {
            lookback_days: Self::DAILY_LOOKBACK_DAYS,
            horizon,
        }
    }

    /// The account overview: one week either side.
    #[must_use]
    pub fn overview() -> Self {
        Self {
            lookback_days: 7,
            horizon: BalanceHorizon::Week,
        }
    }

    /// The days to request, relative to the anchor's UTC day.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if the window leaves the date range.
    pub fn range(&self, anchor: Instant) -> TallyResult<DateRange> {
        let today = anchor.start_of_day();
        Ok(DateRange {
            start: today.add_days(-i64::from(self.lookback_days))?,
            end: today.add_days(i64::from(self.horizon.forward_days()))?,
        })
    }
}

impl Default for BalanceWindow {
    fn default() -> Self {
        Self::daily_balance(BalanceHorizon::default())
    }
}

/// Calendar ranges offered by the cash-flow chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowRange {
    /// January 1 of the anchor's year through the anchor
    #[default]
    YearToDate,
    /// Twelve months back through the anchor
    #[serde(rename = "last_12_months")]
    Last12Months,
    /// The whole previous calendar year
    PreviousYear,
    /// Five years back through the anchor
    AllTime,
}

impl CashFlowRange {
    /// How far back `AllTime` reaches.
    pub const ALL_TIME_YEARS: u32 = 5;

    /// The days this range covers for the given anchor.
    ///
    /// Month arithmetic clamps to the end of the month, so twelve months
    /// before 2024-02-29 is 2023-02-28.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Overflow` if the range leaves the date range.
    pub fn range(&self, anchor: Instant) -> TallyResult<DateRange> {
        let today = anchor.date();
        let (start, end) = match self {
            CashFlowRange::YearToDate => (jan_1(today.year())?, today),
            CashFlowRange::Last12Months => (months_back(today, 12)?, today),
            CashFlowRange::PreviousYear => {
                let year = today.year() - 1;
                (jan_1(year)?, dec_31(year)?)
            }
            CashFlowRange::AllTime => (months_back(today, Self::ALL_TIME_YEARS * 12)?, today),
        };
        Ok(DateRange {
            start: Instant::from_date(start),
            end: Instant::from_date(end),
        })
    }
}

fn jan_1(year: i32) -> TallyResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| TallyError::overflow(format!("January 1 of {year}")))
}

fn dec_31(year: i32) -> TallyResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| TallyError::overflow(format!("December 31 of {year}")))
}

fn months_back(date: NaiveDate, months: u32) -> TallyResult<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| TallyError::overflow(format!("{date} minus {months} months")))
}
