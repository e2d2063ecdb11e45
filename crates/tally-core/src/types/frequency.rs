//! Recurrence frequency types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TallyError, TallyResult};

/// Calendar unit of a recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FrequencyUnit {
    /// Calendar days
    Day,
    /// ISO weeks, Monday through Sunday
    Week,
    /// Calendar months
    Month,
    /// Calendar years
    Year,
}

impl FrequencyUnit {
    /// ISO-8601 duration designator (`D`, `W`, `M`, `Y`).
    #[must_use]
    pub fn designator(&self) -> char {
        match self {
            FrequencyUnit::Day => 'D',
            FrequencyUnit::Week => 'W',
            FrequencyUnit::Month => 'M',
            FrequencyUnit::Year => 'Y',
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FrequencyUnit::Day => "day",
            FrequencyUnit::Week => "week",
            FrequencyUnit::Month => "month",
            FrequencyUnit::Year => "year",
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FrequencyUnit {
    type Err = TallyError;

    /// Accepts singular and plural unit names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(FrequencyUnit::Day),
            "week" | "weeks" => Ok(FrequencyUnit::Week),
            "month" | "months" => Ok(FrequencyUnit::Month),
            "year" | "years" => Ok(FrequencyUnit::Year),
            other => Err(TallyError::invalid_frequency(format!(
                "unknown unit '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for FrequencyUnit {
    type Error = TallyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// "Every `value` `unit`s", e.g. every 2 weeks.
///
/// The value is validated on construction, so a `Frequency` in hand is
/// always usable.
///
/// # Example
///
/// ```rust
/// use tally_core::types::{Frequency, FrequencyUnit};
///
/// let biweekly = Frequency::new(2, FrequencyUnit::Week).unwrap();
/// assert_eq!(biweekly.to_string(), "every 2 weeks");
/// assert!(Frequency::new(0, FrequencyUnit::Day).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFrequency")]
pub struct Frequency {
    value: u32,
    unit: FrequencyUnit,
}

impl Frequency {
    /// Largest accepted multiplier.
    pub const MAX_VALUE: u32 = 10_000;

    /// Every day.
    pub const DAILY: Frequency = Frequency {
        value: 1,
        unit: FrequencyUnit::Day,
    };

    /// Every week.
    pub const WEEKLY: Frequency = Frequency {
        value: 1,
        unit: FrequencyUnit::Week,
    };

    /// Every month.
    pub const MONTHLY: Frequency = Frequency {
        value: 1,
        unit: FrequencyUnit::Month,
    };

    /// Every year.
    pub const YEARLY: Frequency = Frequency {
        value: 1,
        unit: FrequencyUnit::Year,
    };

    /// Creates a frequency.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::InvalidFrequency` if `value` is zero or above
    /// [`Frequency::MAX_VALUE`].
    pub fn new(value: u32, unit: FrequencyUnit) -> TallyResult<Self> {
        if value < 1 {
            return Err(TallyError::invalid_frequency(format!(
                "value must be at least 1, got {value}"
            )));
        }
        if value > Self::MAX_VALUE {
            return Err(TallyError::invalid_frequency(format!(
                "value must be at most {}, got {value}",
                Self::MAX_VALUE
            )));
        }
        Ok(Self { value, unit })
    }

    /// Creates a frequency from untrusted form input.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::InvalidFrequency` for a non-positive value or an
    /// unknown unit name.
    pub fn from_parts(value: i64, unit: &str) -> TallyResult<Self> {
        let unit = unit.parse()?;
        let value = u32::try_from(value).map_err(|_| {
            TallyError::invalid_frequency(format!("value must be at least 1, got {value}"))
        })?;
        Self::new(value, unit)
    }

    /// Multiplier.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Calendar unit.
    #[must_use]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// ISO-8601 duration form, e.g. `P2W`.
    #[must_use]
    pub fn duration_code(&self) -> String {
        format!("P{}{}", self.value, self.unit.designator())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 1 {
            write!(f, "every {}", self.unit)
        } else {
            write!(f, "every {} {}s", self.value, self.unit)
        }
    }
}

/// Wire shape of a frequency before validation.
#[derive(Deserialize)]
struct RawFrequency {
    value: i64,
    unit: String,
}

impl TryFrom<RawFrequency> for Frequency {
    type Error = TallyError;

    fn try_from(raw: RawFrequency) -> Result<Self, Self::Error> {
        Self::from_parts(raw.value, &raw.unit)
    }
}
