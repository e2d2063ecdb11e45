//! Series configuration.
//!
//! The dashboard's defaults for aggregation and charting: which epoch anchors
//! the period grid, the fallback frequency, how averages are rounded, and
//! which date windows the balance and cash-flow charts request.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use tally_core::periods::default_epoch;
use tally_core::types::{Frequency, Instant, CENT_SCALE};
use tally_series::summary::SummaryOptions;
use tally_series::window::{BalanceWindow, CashFlowRange, DateRange};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Series configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Anchor of every period grid.
    #[serde(default = "default_epoch")]
    pub epoch: Instant,

    /// Frequency used when an item has none of its own.
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,

    /// Decimal places of averages.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,

    /// Balance chart window.
    #[serde(default)]
    pub balance_window: BalanceWindow,

    /// Cash-flow chart range.
    #[serde(default)]
    pub cash_flow_range: CashFlowRange,
}

fn default_frequency() -> Frequency {
    Frequency::MONTHLY
}

fn default_amount_scale() -> u32 {
    CENT_SCALE
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            frequency: default_frequency(),
            amount_scale: default_amount_scale(),
            balance_window: BalanceWindow::default(),
            cash_flow_range: CashFlowRange::default(),
        }
    }
}

impl SeriesConfig {
    /// Largest accepted `amount_scale`.
    pub const MAX_AMOUNT_SCALE: u32 = 8;

    /// Largest accepted balance look-back, in days.
    pub const MAX_LOOKBACK_DAYS: u32 = 366;

    /// Sets the epoch.
    pub fn with_epoch(mut self, epoch: Instant) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the default frequency.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the rounding scale of averages.
    pub fn with_amount_scale(mut self, scale: u32) -> Self {
        self.amount_scale = scale;
        self
    }

    /// Sets the balance chart window.
    pub fn with_balance_window(mut self, window: BalanceWindow) -> Self {
        self.balance_window = window;
        self
    }

    /// Sets the cash-flow chart range.
    pub fn with_cash_flow_range(mut self, range: CashFlowRange) -> Self {
        self.cash_flow_range = range;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        debug!(format = "toml", epoch = %config.epoch, frequency = %config.frequency, "Loaded series config");
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        debug!(format = "json", epoch = %config.epoch, frequency = %config.frequency, "Loaded series config");
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Summary options seeded from this configuration.
    ///
    /// `frequency` overrides the configured default when the item has its own.
    pub fn summary_options(&self, frequency: Option<Frequency>) -> SummaryOptions {
        SummaryOptions::new(frequency.unwrap_or(self.frequency))
            .with_epoch(self.epoch)
            .with_scale(self.amount_scale)
    }

    /// Days the balance chart should request for the given "today".
    pub fn balance_range(&self, anchor: Instant) -> ConfigResult<DateRange> {
        Ok(self.balance_window.range(anchor)?)
    }

    /// Days the cash-flow chart should request for the given "today".
    pub fn cash_flow_range(&self, anchor: Instant) -> ConfigResult<DateRange> {
        Ok(self.cash_flow_range.range(anchor)?)
    }
}

impl Validate for SeriesConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.amount_scale > Self::MAX_AMOUNT_SCALE {
            errors.push(ValidationError::new(
                "amount_scale",
                format!(
                    "must be at most {}, got {}",
                    Self::MAX_AMOUNT_SCALE,
                    self.amount_scale
                ),
            ));
        }

        if self.balance_window.lookback_days > Self::MAX_LOOKBACK_DAYS {
            errors.push(ValidationError::new(
                "balance_window.lookback_days",
                format!(
                    "must be at most {}, got {}",
                    Self::MAX_LOOKBACK_DAYS,
                    self.balance_window.lookback_days
                ),
            ));
        }

        errors
    }
}
