use chrono::NaiveDate;

use crate::models::{DateWindow, SortOrder, TimeSeries};

/// Dates of `series` inside `window`, in the requested order.
pub fn select_dates(series: &TimeSeries, window: &DateWindow, order: SortOrder) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = series
        .keys()
        .filter(|date| window.contains(date))
        .copied()
        .collect();

    match order {
        SortOrder::Ascending => dates.sort_unstable(),
        SortOrder::Descending => dates.sort_unstable_by(|a, b| b.cmp(a)),
    }
    dates
}
