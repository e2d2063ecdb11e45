//! # Tally Series
//!
//! Turns raw dated amounts into chart-ready series.
//!
//! - [`aggregate`]: bucket transactions by recurrence period and fill gaps
//! - [`average_of`]: average per period, quiet periods included
//! - [`align`]: several named series zero-filled on one shared axis
//! - [`split`]: cut a balance series into actual and projected segments
//! - [`summarize`]: the rows behind every expense, income, bill, and transfer chart
//! - [`window`]: look-back/forecast and calendar ranges around an explicit "today"
//!
//! All functions are pure and synchronous. Nothing reads the system clock;
//! callers pass the anchor instant in.
//!
//! ## Example
//!
//! ```rust
//! use tally_core::prelude::*;
//! use tally_series::{aggregate, average_of};
//! use rust_decimal_macros::dec;
//!
//! let txs = vec![
//!     Transaction::new(1, Instant::parse("2024-01-05").unwrap(), Money::new(dec!(10))),
//!     Transaction::new(2, Instant::parse("2024-01-20").unwrap(), Money::new(dec!(5))),
//!     Transaction::new(3, Instant::parse("2024-03-01").unwrap(), Money::new(dec!(7))),
//! ];
//! let epoch = Instant::parse("2024-01-01").unwrap();
//! let buckets = aggregate(&txs, Frequency::MONTHLY, epoch).unwrap();
//! assert_eq!(average_of(&buckets).unwrap(), Money::new(dec!(7.33)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod aggregate;
pub mod compare;
pub mod split;
pub mod summary;
pub mod window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{
        aggregate, average_of, average_of_with_scale, running_averages, running_totals, total_of,
        Bucket,
    };
    pub use crate::compare::{align, AlignedRow, Comparison};
    pub use crate::split::{split, SeriesPoint, SplitSeries, TimeSeries};
    pub use crate::summary::{summarize, FlowFilter, Summary, SummaryOptions, SummaryRow, SummaryView};
    pub use crate::window::{BalanceHorizon, BalanceWindow, CashFlowRange, DateRange};
}

pub use aggregate::{aggregate, average_of, running_averages, running_totals, Bucket};
pub use compare::{align, Comparison};
pub use split::{split, SeriesPoint, SplitSeries, TimeSeries};
pub use summary::{summarize, Summary, SummaryOptions};
