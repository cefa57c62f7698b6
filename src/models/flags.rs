use std::{fmt, str::FromStr};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, EnumIter, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    #[default]
    Hledger,
    Json,
    Csv,
    Table,
    TableLong,
    TableShort,
}

impl OutputFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Hledger => "hledger",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Table => "table",
            OutputFormat::TableLong => "table-long",
            OutputFormat::TableShort => "table-short",
        }
    }

    /// Formats that hand the upstream payload back untouched.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Csv)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::iter()
            .find(|format| format.to_str() == s)
            .ok_or_else(|| Error::InvalidOutputFormat {
                value: s.to_string(),
                expected: possible_values(OutputFormat::iter().map(|f| f.to_str())),
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Clone, Copy, Debug, Default, EnumIter, Eq, Hash, PartialEq)]
pub enum Interval {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Interval {
    pub fn to_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::iter()
            .find(|interval| interval.to_str() == s)
            .ok_or_else(|| Error::InvalidInterval {
                value: s.to_string(),
                expected: possible_values(Interval::iter().map(|i| i.to_str())),
            })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

fn possible_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}
