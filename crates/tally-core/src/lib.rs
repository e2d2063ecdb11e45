//! # Tally Core
//!
//! Core types and period keying for the Tally transaction-series engine.
//!
//! This crate provides the foundational building blocks used throughout Tally:
//!
//! - **Types**: `Instant` (always UTC), `Money` (fixed-point), `Frequency`,
//!   `Transaction`
//! - **Period keying**: Deterministic mapping of instants onto recurrence
//!   periods anchored at a fixed epoch
//!
//! ## Design Philosophy
//!
//! - **UTC only**: timestamps are normalized at the ingestion boundary and no
//!   function consults the host timezone
//! - **No floats for money**: amounts are `rust_decimal` values
//! - **No hidden clock**: "now" is always a parameter
//!
//! ## Example
//!
//! ```rust
//! use tally_core::prelude::*;
//!
//! let every_two_weeks = Frequency::new(2, FrequencyUnit::Week).unwrap();
//! let instant = Instant::parse("2024-01-10").unwrap();
//! let period = period_for(instant, every_two_weeks, default_epoch()).unwrap();
//! assert!(period.contains(instant));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod periods;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{TallyError, TallyResult};
    pub use crate::periods::{default_epoch, period_at, period_for, Period, PeriodGrid};
    pub use crate::types::{
        Frequency, FrequencyUnit, Instant, Money, Transaction, TransactionId, CENT_SCALE,
    };
}

// Re-export commonly used types at crate root
pub use error::{TallyError, TallyResult};
pub use periods::{period_for, Period};
pub use types::{Frequency, FrequencyUnit, Instant, Money, Transaction, TransactionId};
