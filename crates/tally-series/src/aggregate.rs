//! Recurrence bucketing with gap filling.
//!
//! [`aggregate`] sums transactions into the periods of a frequency and fills
//! every quiet period between the first and last observed one with an empty
//! bucket, so the output is a contiguous, chart-ready series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use tally_core::periods::{Period, PeriodGrid};
use tally_core::types::{Frequency, Instant, Money, Transaction, TransactionId, CENT_SCALE};
use tally_core::{TallyError, TallyResult};

/// One period's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// The period this bucket covers
    pub period: Period,
    /// Sum of the amounts of every transaction in the period
    pub total: Money,
    /// Number of transactions in the period
    pub transaction_count: usize,
    /// Ids of those transactions, in input order
    pub transaction_ids: Vec<TransactionId>,
}

impl Bucket {
    /// An empty bucket for a period with no transactions.
    #[must_use]
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            total: Money::ZERO,
            transaction_count: 0,
            transaction_ids: Vec::new(),
        }
    }

    /// True if the bucket was inserted by gap filling.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        self.transaction_count == 0
    }
}

#[derive(Default)]
struct Accumulator {
    total: Money,
    ids: Vec<TransactionId>,
}

/// Buckets transactions by the periods of `frequency` anchored at `epoch`.
///
/// The result is ordered by period start and has exactly one bucket for
/// every period from the first observed to the last observed, inclusive.
/// Empty input gives an empty result.
///
/// # Errors
///
/// Returns `TallyError::Overflow` if a total leaves the decimal range or a
/// period lies outside the representable date range.
///
/// # Example
///
/// ```rust
/// use tally_core::prelude::*;
/// use tally_series::aggregate;
/// use rust_decimal_macros::dec;
///
/// let txs = vec![
///     Transaction::new(1, Instant::parse("2024-01-05").unwrap(), Money::new(dec!(10))),
///     Transaction::new(2, Instant::parse("2024-03-01").unwrap(), Money::new(dec!(7))),
/// ];
/// let buckets = aggregate(&txs, Frequency::MONTHLY, default_epoch()).unwrap();
/// assert_eq!(buckets.len(), 3);
/// assert!(buckets[1].is_gap());
/// ```
pub fn aggregate<'a, I>(
    transactions: I,
    frequency: Frequency,
    epoch: Instant,
) -> TallyResult<Vec<Bucket>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let grid = PeriodGrid::new(frequency, epoch)?;
    let mut observed: BTreeMap<i64, Accumulator> = BTreeMap::new();
    let mut input_count = 0usize;

    for tx in transactions {
        let slot = observed.entry(grid.index_of(tx.occurred_at)).or_default();
        slot.total = slot.total.checked_add(tx.amount).ok_or_else(|| {
            TallyError::overflow(format!("sum of transactions up to id {}", tx.id))
        })?;
        slot.ids.push(tx.id);
        input_count += 1;
    }

    let (Some(&first), Some(&last)) = (observed.keys().next(), observed.keys().next_back())
    else {
        debug!(%frequency, "No transactions to aggregate");
        return Ok(Vec::new());
    };

    let observed_count = observed.len();
    let mut buckets = Vec::with_capacity(usize::try_from(last - first + 1).unwrap_or(0));
    for index in first..=last {
        let period = grid.period_at(index)?;
        let bucket = match observed.remove(&index) {
            Some(slot) => Bucket {
                period,
                total: slot.total,
                transaction_count: slot.ids.len(),
                transaction_ids: slot.ids,
            },
            None => Bucket::empty(period),
        };
        buckets.push(bucket);
    }

    debug!(
        %frequency,
        transactions = input_count,
        buckets = buckets.len(),
        gap_filled = buckets.len() - observed_count,
        "Aggregated transactions"
    );

    Ok(buckets)
}

/// Average total per bucket, rounded to cents.
///
/// Gap-filled buckets count toward the denominator: this is the average per
/// period including quiet ones.
///
/// # Errors
///
/// Returns `TallyError::NoData` for an empty slice.
pub fn average_of(buckets: &[Bucket]) -> TallyResult<Money> {
    average_of_with_scale(buckets, CENT_SCALE)
}

/// Average total per bucket, rounded half away from zero to `scale` places.
///
/// # Errors
///
/// Returns `TallyError::NoData` for an empty slice, `TallyError::Overflow`
/// if the grand total leaves the decimal range.
pub fn average_of_with_scale(buckets: &[Bucket], scale: u32) -> TallyResult<Money> {
    if buckets.is_empty() {
        warn!("Average requested over an empty aggregation");
        return Err(TallyError::NoData);
    }
    let total = total_of(buckets)?;
    total
        .checked_div_count(buckets.len(), scale)
        .ok_or_else(|| TallyError::overflow("average of bucket totals"))
}

/// Cumulative average after each bucket, rounded to `scale` places.
///
/// Entry `i` is the average of the totals of buckets `0..=i`. The last entry
/// equals [`average_of_with_scale`].
///
/// # Errors
///
/// Returns `TallyError::Overflow` if a running total leaves the decimal range.
pub fn running_averages(buckets: &[Bucket], scale: u32) -> TallyResult<Vec<Money>> {
    let mut running = Money::ZERO;
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            running = running
                .checked_add(bucket.total)
                .ok_or_else(|| TallyError::overflow("running total of buckets"))?;
            running
                .checked_div_count(i + 1, scale)
                .ok_or_else(|| TallyError::overflow("running average of buckets"))
        })
        .collect()
}

/// Cumulative total after each bucket.
///
/// Entry `i` is the sum of the totals of buckets `0..=i`; gap buckets repeat
/// the previous entry. The last entry equals [`total_of`].
///
/// # Errors
///
/// Returns `TallyError::Overflow` if a running total leaves the decimal range.
pub fn running_totals(buckets: &[Bucket]) -> TallyResult<Vec<Money>> {
    let mut running = Money::ZERO;
    buckets
        .iter()
        .map(|bucket| {
            running = running
                .checked_add(bucket.total)
                .ok_or_else(|| TallyError::overflow("running total of buckets"))?;
            Ok(running)
        })
        .collect()
}

/// Sum of all bucket totals.
///
/// # Errors
///
/// Returns `TallyError::Overflow` if the sum leaves the decimal range.
pub fn total_of(buckets: &[Bucket]) -> TallyResult<Money> {
    buckets.iter().try_fold(Money::ZERO, |acc, bucket| {
        acc.checked_add(bucket.total)
            .ok_or_else(|| TallyError::overflow("sum of bucket totals"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_core::periods::default_epoch;
    use tally_core::types::FrequencyUnit;

    fn tx(id: u64, date: &str, amount: Money) -> Transaction {
        Transaction::new(id, Instant::parse(date).unwrap(), amount)
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<Transaction> = Vec::new();
        let buckets = aggregate(&none, Frequency::MONTHLY, default_epoch()).unwrap();
        assert!(buckets.is_empty());
        assert_eq!(average_of(&buckets), Err(TallyError::NoData));
        assert!(running_averages(&buckets, 2).unwrap().is_empty());
    }

    #[test]
    fn test_single_transaction() {
        let txs = [tx(1, "2024-06-15", Money::new(dec!(42.10)))];
        let buckets = aggregate(&txs, Frequency::WEEKLY, default_epoch()).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].transaction_count, 1);
        assert_eq!(average_of(&buckets).unwrap(), Money::new(dec!(42.10)));
    }

    #[test]
    fn test_unordered_input_is_bucketed_in_order() {
        let txs = [
            tx(3, "2024-01-03", Money::new(dec!(3))),
            tx(1, "2024-01-01", Money::new(dec!(1))),
            tx(2, "2024-01-01T22:00:00Z", Money::new(dec!(2))),
        ];
        let buckets = aggregate(&txs, Frequency::DAILY, default_epoch()).unwrap();
        let keys: Vec<_> = buckets.iter().map(|b| b.period.key()).collect();
        assert_eq!(keys, ["2024-01-01/P1D", "2024-01-02/P1D", "2024-01-03/P1D"]);
        assert_eq!(buckets[0].total, Money::new(dec!(3)));
        assert_eq!(
            buckets[0].transaction_ids,
            vec![TransactionId::new(1), TransactionId::new(2)]
        );
        assert!(buckets[1].is_gap());
    }

    #[test]
    fn test_gap_buckets_count_toward_average() {
        let every_ten_days = Frequency::new(10, FrequencyUnit::Day).unwrap();
        let epoch = Instant::parse("2024-01-01").unwrap();
        let txs = [
            tx(1, "2024-01-02", Money::new(dec!(30))),
            tx(2, "2024-01-31", Money::new(dec!(0.01))),
        ];
        let buckets = aggregate(&txs, every_ten_days, epoch).unwrap();
        assert_eq!(buckets.len(), 4);
        // (30 + 0 + 0 + 0.01) / 4 = 7.5025
        assert_eq!(average_of(&buckets).unwrap(), Money::new(dec!(7.50)));
        assert_eq!(
            average_of_with_scale(&buckets, 4).unwrap(),
            Money::new(dec!(7.5025))
        );
    }

    #[test]
    fn test_running_averages() {
        let txs = [
            tx(1, "2024-01-10", Money::new(dec!(10))),
            tx(2, "2024-03-10", Money::new(dec!(5))),
        ];
        let buckets = aggregate(&txs, Frequency::MONTHLY, default_epoch()).unwrap();
        let running = running_averages(&buckets, 2).unwrap();
        assert_eq!(
            running,
            vec![
                Money::new(dec!(10)),
                Money::new(dec!(5)),
                Money::new(dec!(5)),
            ]
        );
        assert_eq!(running.last().copied().unwrap(), average_of(&buckets).unwrap());
    }

    #[test]
    fn test_running_totals() {
        let txs = [
            tx(1, "2024-01-10", Money::new(dec!(10))),
            tx(2, "2024-01-12", Money::new(dec!(2.50))),
            tx(3, "2024-03-10", Money::new(dec!(-5))),
        ];
        let buckets = aggregate(&txs, Frequency::MONTHLY, default_epoch()).unwrap();
        let running = running_totals(&buckets).unwrap();
        assert_eq!(
            running,
            vec![
                Money::new(dec!(12.50)),
                Money::new(dec!(12.50)),
                Money::new(dec!(7.50)),
            ]
        );
        assert_eq!(running.last().copied().unwrap(), total_of(&buckets).unwrap());
        assert!(running_totals(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_negative_amounts_net_out() {
        let txs = [
            tx(1, "2024-02-01", Money::new(dec!(-19.99))),
            tx(2, "2024-02-20", Money::new(dec!(19.99))),
        ];
        let buckets = aggregate(&txs, Frequency::MONTHLY, default_epoch()).unwrap();
        assert_eq!(buckets.len(), 1);
        assert!(buckets[0].total.is_zero());
        assert!(!buckets[0].is_gap());
    }
}
