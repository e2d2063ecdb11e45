//! Chart-ready transaction summaries.
//!
//! Every expense, income, bill, and transfer view draws the same chart: one
//! bar or point per period, a flat budget reference line, and the average
//! per period. [`summarize`] produces those rows in one place.

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, average_of_with_scale, Bucket};
use tally_core::periods::default_epoch;
use tally_core::types::{Frequency, Instant, Money, Transaction, CENT_SCALE};
use tally_core::TallyResult;

/// How rows are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryView {
    /// One row per period of the item's own frequency (line chart)
    #[default]
    Recurrence,
    /// One row per calendar month, whatever the frequency (bar chart)
    CalendarMonth,
}

/// Which transactions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowFilter {
    /// Every transaction
    #[default]
    All,
    /// Only money leaving the account (negative amounts); transfer views
    Outflows,
    /// Only money arriving (positive amounts)
    Inflows,
}

impl FlowFilter {
    /// Whether a transaction with this amount is counted.
    #[must_use]
    pub fn admits(&self, amount: Money) -> bool {
        match self {
            FlowFilter::All => true,
            FlowFilter::Outflows => amount.is_negative(),
            FlowFilter::Inflows => amount.is_positive(),
        }
    }
}

/// Inputs to [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// The item's recurrence
    pub frequency: Frequency,
    /// Grid anchor
    pub epoch: Instant,
    /// Bucketing mode
    pub view: SummaryView,
    /// Transaction filter
    pub flow: FlowFilter,
    /// Budgeted amount per period, drawn as a reference line
    pub budget: Option<Money>,
    /// Decimal places of the average
    pub scale: u32,
}

impl SummaryOptions {
    /// Options for `frequency` with the default epoch, recurrence view, all
    /// flows, no budget, and cent rounding.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            epoch: default_epoch(),
            view: SummaryView::default(),
            flow: FlowFilter::default(),
            budget: None,
            scale: CENT_SCALE,
        }
    }

    /// Sets the grid anchor.
    pub fn with_epoch(mut self, epoch: Instant) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the bucketing mode.
    pub fn with_view(mut self, view: SummaryView) -> Self {
        self.view = view;
        self
    }

    /// Sets the transaction filter.
    pub fn with_flow(mut self, flow: FlowFilter) -> Self {
        self.flow = flow;
        self
    }

    /// Sets the budget reference amount.
    pub fn with_budget(mut self, budget: Money) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets the rounding scale of the average.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// The frequency actually used for bucketing.
    #[must_use]
    pub fn bucket_frequency(&self) -> Frequency {
        match self.view {
            SummaryView::Recurrence => self.frequency,
            SummaryView::CalendarMonth => Frequency::MONTHLY,
        }
    }
}

/// One chart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// The period and its total
    pub bucket: Bucket,
    /// Budget reference, if any
    pub budget: Option<Money>,
    /// Average per period over the whole summary
    pub average: Money,
}

/// A whole chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Gap-filled rows in period order
    pub rows: Vec<SummaryRow>,
    /// Average per period, `None` when there are no rows
    pub average: Option<Money>,
}

impl Summary {
    /// True when no transaction passed the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose total exceeds the budget in magnitude.
    pub fn over_budget(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().filter(|row| {
            row.budget
                .is_some_and(|budget| row.bucket.total.amount().abs() > budget.amount().abs())
        })
    }
}

/// Builds the chart rows for a set of transactions.
///
/// An empty result is not an error: the summary simply has no rows and no
/// average.
///
/// # Errors
///
/// Propagates `TallyError::Overflow` from aggregation.
pub fn summarize(transactions: &[Transaction], options: &SummaryOptions) -> TallyResult<Summary> {
    let buckets = aggregate(
        transactions.iter().filter(|tx| options.flow.admits(tx.amount)),
        options.bucket_frequency(),
        options.epoch,
    )?;

    if buckets.is_empty() {
        return Ok(Summary::default());
    }

    let average = average_of_with_scale(&buckets, options.scale)?;
    let rows = buckets
        .into_iter()
        .map(|bucket| SummaryRow {
            bucket,
            budget: options.budget,
            average,
        })
        .collect();

    Ok(Summary {
        rows,
        average: Some(average),
    })
}
