//! Domain types for transaction aggregation.
//!
//! - [`Instant`]: UTC-normalized point in time
//! - [`Money`]: Fixed-point currency amount
//! - [`Frequency`]: "Every N units" recurrence
//! - [`Transaction`]: Dated amount from the finance API

mod frequency;
mod instant;
mod money;
mod transaction;

pub use frequency::{Frequency, FrequencyUnit};
pub use instant::Instant;
pub use money::{Money, CENT_SCALE};
pub use transaction::{Transaction, TransactionId};
