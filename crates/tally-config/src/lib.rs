//! Tally Configuration Layer
//!
//! Loads the defaults the series engine runs with: the grid epoch, the
//! fallback frequency, the rounding scale of averages, and the windows the
//! balance and cash-flow charts request.
//!
//! # Example
//!
//! ```rust
//! use tally_config::prelude::*;
//!
//! let config = SeriesConfig::from_toml_str(
//!     r#"
//!     epoch = "2024-01-01"
//!     cash_flow_range = "previous_year"
//!     "#,
//! )
//! .unwrap();
//!
//! let anchor = tally_core::Instant::parse("2024-06-30").unwrap();
//! let range = config.cash_flow_range(anchor).unwrap();
//! assert_eq!(range.to_string(), "2023-01-01..=2023-12-31");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::series::SeriesConfig;
}

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use series::SeriesConfig;
