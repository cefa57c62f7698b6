pub mod exchange_rate;
pub mod flags;
pub mod quote;
pub mod series;
pub mod symbol_match;

pub use exchange_rate::ExchangeRate;
pub use flags::{Interval, OutputFormat, SortOrder};
pub use quote::{Adjustment, Quote};
pub use series::{DateWindow, Refreshed, Series, SeriesKind, SeriesMetadata, TimeSeries};
pub use symbol_match::SymbolMatch;
