use std::{collections::HashMap, fmt};

use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use derive_new::new;

use super::{Interval, Quote};

/// Date-keyed quotes. Iteration order is unspecified; callers sort explicitly.
pub type TimeSeries = HashMap<NaiveDate, Quote>;

/// The wire variant of a time-series response.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SeriesKind {
    Stock { interval: Interval, adjusted: bool },
    Fx { interval: Interval },
}

impl SeriesKind {
    pub fn interval(&self) -> Interval {
        match self {
            SeriesKind::Stock { interval, .. } | SeriesKind::Fx { interval } => *interval,
        }
    }

    pub fn is_adjusted(&self) -> bool {
        matches!(self, SeriesKind::Stock { adjusted: true, .. })
    }

    pub fn has_volume(&self) -> bool {
        matches!(self, SeriesKind::Stock { .. })
    }

    /// Only the daily adjusted endpoint reports a split coefficient.
    pub fn has_split_coefficient(&self) -> bool {
        matches!(
            self,
            SeriesKind::Stock {
                interval: Interval::Daily,
                adjusted: true
            }
        )
    }

    pub fn api_function(&self) -> &'static str {
        match self {
            SeriesKind::Stock { interval, adjusted } => match (interval, adjusted) {
                (Interval::Daily, false) => "TIME_SERIES_DAILY",
                (Interval::Daily, true) => "TIME_SERIES_DAILY_ADJUSTED",
                (Interval::Weekly, false) => "TIME_SERIES_WEEKLY",
                (Interval::Weekly, true) => "TIME_SERIES_WEEKLY_ADJUSTED",
                (Interval::Monthly, false) => "TIME_SERIES_MONTHLY",
                (Interval::Monthly, true) => "TIME_SERIES_MONTHLY_ADJUSTED",
            },
            SeriesKind::Fx { interval } => match interval {
                Interval::Daily => "FX_DAILY",
                Interval::Weekly => "FX_WEEKLY",
                Interval::Monthly => "FX_MONTHLY",
            },
        }
    }

    /// JSON key holding the date-keyed records.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            SeriesKind::Stock { interval, adjusted } => match (interval, adjusted) {
                (Interval::Daily, _) => "Time Series (Daily)",
                (Interval::Weekly, false) => "Weekly Time Series",
                (Interval::Weekly, true) => "Weekly Adjusted Time Series",
                (Interval::Monthly, false) => "Monthly Time Series",
                (Interval::Monthly, true) => "Monthly Adjusted Time Series",
            },
            SeriesKind::Fx { interval } => match interval {
                Interval::Daily => "Time Series FX (Daily)",
                Interval::Weekly => "Time Series FX (Weekly)",
                Interval::Monthly => "Time Series FX (Monthly)",
            },
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Stock { interval, adjusted } => {
                let adjusted = if *adjusted { " adjusted" } else { "" };
                write!(f, "{} stock{} series", interval, adjusted)
            }
            SeriesKind::Fx { interval } => write!(f, "{} FX series", interval),
        }
    }
}

/// Alpha Vantage reports either a bare date or a full timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Refreshed {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Refreshed {
    pub fn date(&self) -> NaiveDate {
        match self {
            Refreshed::Date(date) => *date,
            Refreshed::DateTime(datetime) => datetime.date(),
        }
    }
}

impl fmt::Display for Refreshed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refreshed::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Refreshed::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// `commodity` is the stock symbol or the FX base code, `currency` the code
/// the prices are quoted in.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct SeriesMetadata {
    commodity: String,
    currency: String,
    last_refreshed: Refreshed,
    output_size: Option<String>,
    time_zone: String,
}

#[derive(Clone, Debug, Getters, new)]
pub struct Series {
    kind: SeriesKind,
    metadata: SeriesMetadata,
    quotes: TimeSeries,
}

/// Inclusive `[begin, end]` date window.
#[derive(Clone, Copy, Debug, Eq, Getters, PartialEq)]
pub struct DateWindow {
    begin: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(begin: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            begin: begin.unwrap_or(NaiveDate::MIN),
            end: end.unwrap_or(today),
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.begin <= *date && *date <= self.end
    }
}
