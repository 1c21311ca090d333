//! Reporting periods.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Time bucket selector for listings and summaries.
///
/// The caller-facing request layer passes these as plain strings; parsing
/// lives here so every surface agrees on the accepted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Month,
    LastMonth,
    #[default]
    Total,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Month => "month",
            Period::LastMonth => "last_month",
            Period::Total => "total",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "month" => Ok(Period::Month),
            "last_month" => Ok(Period::LastMonth),
            "total" => Ok(Period::Total),
            other => Err(format!("unknown period: {other}")),
        }
    }
}
