//! Several named series on one period axis.
//!
//! Comparison charts draw, say, groceries against dining out. Each series is
//! aggregated on the same grid, then every series is zero-filled over the
//! combined span so the rows line up period by period.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{aggregate, Bucket};
use tally_core::periods::{Period, PeriodGrid};
use tally_core::types::{Frequency, Instant, Money, Transaction};
use tally_core::TallyResult;

/// One period of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// The shared period
    pub period: Period,
    /// One total per series, in the order the series were given
    pub totals: Vec<Money>,
}

/// Named series aligned on a common, gap-filled axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Series names, in input order
    pub names: Vec<String>,
    /// Rows from the earliest to the latest period observed in any series
    pub rows: Vec<AlignedRow>,
}

impl Comparison {
    /// True when no series had any transaction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Totals of the first series called `name`, one per row.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<Money>> {
        let position = self.names.iter().position(|n| n == name)?;
        Some(self.rows.iter().map(|row| row.totals[position]).collect())
    }
}

/// Aggregates each named series by `frequency` and aligns them.
///
/// The axis runs from the earliest period observed in any series to the
/// latest, with no holes. A series contributes zero to every period where it
/// has no transactions, including periods outside its own span.
///
/// # Errors
///
/// Returns `TallyError::Overflow` if a total leaves the decimal range or a
/// period lies outside the representable date range.
pub fn align(
    series: &[(&str, &[Transaction])],
    frequency: Frequency,
    epoch: Instant,
) -> TallyResult<Comparison> {
    let grid = PeriodGrid::new(frequency, epoch)?;
    let names = series.iter().map(|(name, _)| (*name).to_string()).collect();
    let aggregated = series
        .iter()
        .map(|(_, transactions)| aggregate(*transactions, frequency, epoch))
        .collect::<TallyResult<Vec<_>>>()?;

    let first = aggregated
        .iter()
        .filter_map(|buckets| buckets.first())
        .map(|bucket| bucket.period.index())
        .min();
    let last = aggregated
        .iter()
        .filter_map(|buckets| buckets.last())
        .map(|bucket| bucket.period.index())
        .max();
    let (Some(first), Some(last)) = (first, last) else {
        debug!(%frequency, series = series.len(), "No transactions to align");
        return Ok(Comparison {
            names,
            rows: Vec::new(),
        });
    };

    let mut rows = Vec::with_capacity(usize::try_from(last - first + 1).unwrap_or(0));
    for index in first..=last {
        rows.push(AlignedRow {
            period: grid.period_at(index)?,
            totals: aggregated
                .iter()
                .map(|buckets| total_at(buckets, index))
                .collect(),
        });
    }

    debug!(
        %frequency,
        series = series.len(),
        rows = rows.len(),
        "Aligned series"
    );

    Ok(Comparison { names, rows })
}

/// Total of the bucket with grid index `index`, zero outside the series.
fn total_at(buckets: &[Bucket], index: i64) -> Money {
    let Some(first) = buckets.first() else {
        return Money::ZERO;
    };
    usize::try_from(index - first.period.index())
        .ok()
        .and_then(|offset| buckets.get(offset))
        .map_or(Money::ZERO, |bucket| bucket.total)
}
