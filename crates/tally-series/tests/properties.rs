//! Property tests for aggregation and splitting invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

use tally_core::prelude::*;
use tally_series::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn frequency() -> impl Strategy<Value = Frequency> {
    (
        1u32..=5,
        prop_oneof![
            Just(FrequencyUnit::Day),
            Just(FrequencyUnit::Week),
            Just(FrequencyUnit::Month),
            Just(FrequencyUnit::Year),
        ],
    )
        .prop_map(|(value, unit)| Frequency::new(value, unit).unwrap())
}

/// Seconds since 2020-01-01, spanning about four years.
fn instant() -> impl Strategy<Value = Instant> {
    (0i64..126_000_000).prop_map(|offset| {
        let secs = 1_577_836_800 + offset;
        Instant::from(chrono::DateTime::from_timestamp(secs, 0).unwrap())
    })
}

fn transactions() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((instant(), -500_000i64..500_000), 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (at, cents))| Transaction::new(i as u64, at, Money::from_cents(cents)))
            .collect()
    })
}

fn sorted_series() -> impl Strategy<Value = Vec<SeriesPoint>> {
    prop::collection::vec((instant(), -100_000i64..100_000), 0..40).prop_map(|mut rows| {
        rows.sort_by_key(|(at, _)| *at);
        rows.into_iter()
            .map(|(at, cents)| SeriesPoint::new(at, Money::from_cents(cents)))
            .collect()
    })
}

// ============================================================================
// Aggregation properties
// ============================================================================

proptest! {
    #[test]
    fn prop_every_transaction_in_exactly_one_bucket(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let buckets = aggregate(&txs, freq, epoch).unwrap();
        let mut seen = HashSet::new();
        for bucket in &buckets {
            prop_assert_eq!(bucket.transaction_ids.len(), bucket.transaction_count);
            for id in &bucket.transaction_ids {
                prop_assert!(seen.insert(*id), "transaction {} counted twice", id);
            }
        }
        let expected: HashSet<_> = txs.iter().map(|tx| tx.id).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_bucket_totals_sum_to_input(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let buckets = aggregate(&txs, freq, epoch).unwrap();
        let input: Money = txs.iter().map(|tx| tx.amount).sum();
        prop_assert_eq!(total_of(&buckets).unwrap(), input);
    }

    #[test]
    fn prop_transactions_land_in_their_period(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let buckets = aggregate(&txs, freq, epoch).unwrap();
        for tx in &txs {
            let bucket = buckets
                .iter()
                .find(|b| b.transaction_ids.contains(&tx.id))
                .unwrap();
            prop_assert!(bucket.period.contains(tx.occurred_at));
            prop_assert_eq!(&bucket.period, &period_for(tx.occurred_at, freq, epoch).unwrap());
        }
    }

    #[test]
    fn prop_gap_filled_series_is_contiguous(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let buckets = aggregate(&txs, freq, epoch).unwrap();
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].period.end(), pair[1].period.start());
            prop_assert_eq!(pair[0].period.index() + 1, pair[1].period.index());
        }
        if let (Some(first), Some(last)) = (buckets.first(), buckets.last()) {
            prop_assert!(!first.is_gap());
            prop_assert!(!last.is_gap());
        }
    }

    #[test]
    fn prop_input_order_does_not_matter(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let mut reversed = txs.clone();
        reversed.reverse();
        let forward = aggregate(&txs, freq, epoch).unwrap();
        let backward = aggregate(&reversed, freq, epoch).unwrap();
        prop_assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(&backward) {
            prop_assert_eq!(&a.period, &b.period);
            prop_assert_eq!(a.total, b.total);
            prop_assert_eq!(a.transaction_count, b.transaction_count);
        }
    }

    #[test]
    fn prop_average_uses_every_bucket(
        txs in transactions(), freq in frequency(), epoch in instant()
    ) {
        let buckets = aggregate(&txs, freq, epoch).unwrap();
        match average_of_with_scale(&buckets, 10) {
            Ok(average) => {
                let total = total_of(&buckets).unwrap();
                let n = i64::try_from(buckets.len()).unwrap();
                let diff = (average.amount() * Decimal::from(n) - total.amount()).abs();
                // Rounding to 10 places moves each share by at most 0.5e-10
                prop_assert!(diff <= Decimal::new(n, 10));
            }
            Err(err) => {
                prop_assert!(buckets.is_empty());
                prop_assert_eq!(err, TallyError::NoData);
            }
        }
    }
}

// ============================================================================
// Splitting properties
// ============================================================================

proptest! {
    #[test]
    fn prop_split_is_complete(series in sorted_series(), anchor in instant()) {
        let split = split(&series, anchor).unwrap();
        let on_anchor = series.iter().filter(|p| p.at == anchor).count();
        prop_assert_eq!(split.actual.len() + split.projected.len(), series.len() + on_anchor);

        prop_assert!(split.actual.iter().all(|p| p.at <= anchor));
        prop_assert!(split.projected.iter().all(|p| p.at >= anchor));
        prop_assert_eq!(split.boundary().len(), on_anchor);

        let mut rejoined = split.actual.clone();
        rejoined.extend(split.projected.iter().filter(|p| p.at != anchor));
        prop_assert_eq!(rejoined, series);
    }

    #[test]
    fn prop_split_on_existing_point_duplicates_it(series in sorted_series(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!series.is_empty());
        let anchor = series[pick.index(series.len())].at;
        let split = split(&series, anchor).unwrap();
        prop_assert_eq!(split.actual.last().map(|p| p.at), Some(anchor));
        prop_assert_eq!(split.projected.first().map(|p| p.at), Some(anchor));
    }

    #[test]
    fn prop_unsorted_series_is_rejected(series in sorted_series()) {
        let distinct: Vec<_> = series
            .iter()
            .enumerate()
            .filter(|(i, p)| *i == 0 || series[i - 1].at != p.at)
            .map(|(_, p)| *p)
            .collect();
        prop_assume!(distinct.len() >= 2);
        let mut reversed = distinct.clone();
        reversed.reverse();
        prop_assert_eq!(
            split(&reversed, distinct[0].at),
            Err(TallyError::UnsortedSeries { index: 1 })
        );
    }
}
