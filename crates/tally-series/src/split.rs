//! Actual/projected splitting of a time series at an anchor instant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tally_core::types::{Instant, Money};
use tally_core::{TallyError, TallyResult};

/// One observation of a series, e.g. an end-of-day balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// When the value holds
    #[serde(alias = "date")]
    pub at: Instant,
    /// The value, e.g. an account balance
    #[serde(alias = "balance")]
    pub value: Money,
}

impl SeriesPoint {
    /// Creates a point.
    #[must_use]
    pub fn new(at: Instant, value: Money) -> Self {
        Self { at, value }
    }
}

/// An ordered sequence of points.
pub type TimeSeries = Vec<SeriesPoint>;

/// A series split into its settled and forecast parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSeries {
    /// Points at or before the anchor
    pub actual: TimeSeries,
    /// Points at or after the anchor
    pub projected: TimeSeries,
}

impl SplitSeries {
    /// The points shared by both segments: every point sitting exactly on
    /// the anchor, in input order. Empty when nothing sits on the anchor.
    #[must_use]
    pub fn boundary(&self) -> &[SeriesPoint] {
        let (Some(last), Some(first)) = (self.actual.last(), self.projected.first()) else {
            return &[];
        };
        if last.at != first.at {
            return &[];
        }
        let shared = self
            .actual
            .iter()
            .rev()
            .take_while(|point| point.at == last.at)
            .count();
        &self.actual[self.actual.len() - shared..]
    }
}

/// Splits `series` at `anchor`.
///
/// Points before the anchor go to `actual`, points after it to `projected`.
/// A point exactly on the anchor goes to both, so a chart draws the two
/// segments as one continuous line. No point is invented when nothing sits
/// on the anchor.
///
/// # Errors
///
/// Returns `TallyError::UnsortedSeries` if any point is earlier than the one
/// before it. The series is never re-sorted here.
///
/// # Example
///
/// ```rust
/// use tally_core::types::{Instant, Money};
/// use tally_series::{split, SeriesPoint};
///
/// let day = |d: &str| Instant::parse(d).unwrap();
/// let series = vec![
///     SeriesPoint::new(day("2024-01-01"), Money::from_cents(10_000)),
///     SeriesPoint::new(day("2024-01-02"), Money::from_cents(11_000)),
///     SeriesPoint::new(day("2024-01-03"), Money::from_cents(12_000)),
/// ];
/// let split = split(&series, day("2024-01-02")).unwrap();
/// assert_eq!(split.actual.len(), 2);
/// assert_eq!(split.projected.len(), 2);
/// assert_eq!(split.boundary(), &series[1..2]);
/// ```
pub fn split(series: &[SeriesPoint], anchor: Instant) -> TallyResult<SplitSeries> {
    if let Some(i) = series.windows(2).position(|pair| pair[1].at < pair[0].at) {
        return Err(TallyError::unsorted_series(i + 1));
    }

    let actual_end = series.partition_point(|point| point.at <= anchor);
    let projected_start = series.partition_point(|point| point.at < anchor);

    let split = SplitSeries {
        actual: series[..actual_end].to_vec(),
        projected: series[projected_start..].to_vec(),
    };

    debug!(
        %anchor,
        points = series.len(),
        actual = split.actual.len(),
        projected = split.projected.len(),
        "Split series"
    );

    Ok(split)
}
