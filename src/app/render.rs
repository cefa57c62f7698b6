use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{table::TextTable, typing::DATE_FORMAT};
use crate::{
    api::CodeList,
    models::{ExchangeRate, SeriesKind, SeriesMetadata, SymbolMatch, TimeSeries},
};

/// Formats an amount with exactly two decimal digits, rounding half away from zero.
pub fn format_amount(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn ledger_line(date: NaiveDate, commodity: &str, amount: Decimal, currency: &str) -> String {
    format!(
        "P {} \"{}\" {} {}\n",
        date.format(DATE_FORMAT),
        commodity,
        format_amount(amount),
        currency
    )
}

/// One price directive per date; adjusted series record the adjusted close.
pub fn ledger_series(metadata: &SeriesMetadata, series: &TimeSeries, dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .filter_map(|date| series.get(date).map(|quote| (date, quote)))
        .map(|(date, quote)| {
            ledger_line(
                *date,
                metadata.commodity(),
                quote.ledger_price(),
                metadata.currency(),
            )
        })
        .collect()
}

pub fn metadata_table(kind: &SeriesKind, metadata: &SeriesMetadata) -> String {
    let header = match kind {
        SeriesKind::Stock { .. } => ["Symbol", "Currency", "Last Refreshed", "Time Zone"],
        SeriesKind::Fx { .. } => ["From", "To", "Last Refreshed", "Time Zone"],
    };
    let mut table = TextTable::new(header);
    table.push_row([
        metadata.commodity().clone(),
        metadata.currency().clone(),
        metadata.last_refreshed().to_string(),
        metadata.time_zone().clone(),
    ]);
    table.render()
}

/// The long table adds dividend amount and split coefficient to adjusted
/// series; for everything else both tables are identical.
pub fn series_table(
    kind: &SeriesKind,
    series: &TimeSeries,
    dates: &[NaiveDate],
    long: bool,
) -> String {
    let adjusted = kind.is_adjusted();
    let with_dividend = adjusted && long;
    let with_split = kind.has_split_coefficient() && long;

    let mut header = vec!["Date", "Open", "High", "Low", "Close"];
    if adjusted {
        header.push("Adj. Close");
    }
    if kind.has_volume() {
        header.push("Volume");
    }
    if with_dividend {
        header.push("Dividend Amount");
    }
    if with_split {
        header.push("Split Coefficient");
    }
    let numeric: Vec<usize> = (1..header.len()).collect();
    let mut table = TextTable::new(header).align_right(&numeric);

    for date in dates {
        let Some(quote) = series.get(date) else {
            continue;
        };
        let mut row = vec![
            date.format(DATE_FORMAT).to_string(),
            format_amount(*quote.open()),
            format_amount(*quote.high()),
            format_amount(*quote.low()),
            format_amount(*quote.close()),
        ];
        if adjusted {
            row.push(format_amount(quote.ledger_price()));
        }
        if let Some(volume) = quote.volume() {
            row.push(volume.to_string());
        }
        if let Some(adjustment) = quote.adjustment() {
            if with_dividend {
                row.push(format_amount(*adjustment.dividend_amount()));
            }
            if with_split {
                let split = adjustment
                    .split_coefficient()
                    .map(|split| split.normalize().to_string())
                    .unwrap_or_else(|| "-".to_string());
                row.push(split);
            }
        }
        table.push_row(row);
    }
    table.render()
}

pub fn ledger_exchange_rate(rate: &ExchangeRate) -> String {
    ledger_line(
        rate.last_refreshed().date(),
        rate.from_code(),
        *rate.rate(),
        rate.to_code(),
    )
}

pub fn exchange_rate_tables(rate: &ExchangeRate, long: bool) -> String {
    let mut metadata = TextTable::new(["From", "To", "Last Refreshed", "Time Zone"]);
    metadata.push_row([
        format!("{} ({})", rate.from_name(), rate.from_code()),
        format!("{} ({})", rate.to_name(), rate.to_code()),
        rate.last_refreshed().to_string(),
        rate.time_zone().clone(),
    ]);

    let optional = |price: &Option<Decimal>| {
        price
            .map(|price| price.normalize().to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let mut header = vec![rate.from_code().as_str(), rate.to_code().as_str()];
    let mut row = vec!["1".to_string(), rate.rate().normalize().to_string()];
    if long {
        header.extend(["Bid Price", "Ask Price"]);
        row.push(optional(rate.bid_price()));
        row.push(optional(rate.ask_price()));
    }
    let numeric: Vec<usize> = (0..header.len()).collect();
    let mut data = TextTable::new(header).align_right(&numeric);
    data.push_row(row);

    metadata.render() + &data.render()
}

pub fn search_table(matches: &[SymbolMatch], long: bool) -> String {
    let mut table = if long {
        TextTable::new([
            "#",
            "Symbol",
            "Name",
            "Type",
            "Region",
            "Market Open",
            "Market Close",
            "Timezone",
            "Currency",
            "Match Score",
        ])
        .align_right(&[0, 5, 6, 9])
    } else {
        TextTable::new(["#", "Symbol", "Name", "Type", "Region", "Currency", "Match Score"])
            .align_right(&[0, 6])
    };

    for (idx, result) in matches.iter().enumerate() {
        let score = format!("{:.2}%", result.match_score() * 100.0);
        let row = if long {
            vec![
                (idx + 1).to_string(),
                result.symbol().clone(),
                result.name().clone(),
                result.asset_type().clone(),
                result.region().clone(),
                result.market_open().format("%H:%M").to_string(),
                result.market_close().format("%H:%M").to_string(),
                format!("UTC{}", result.utc_offset()),
                result.currency().clone(),
                score,
            ]
        } else {
            vec![
                (idx + 1).to_string(),
                result.symbol().clone(),
                result.name().clone(),
                result.asset_type().clone(),
                result.region().clone(),
                result.currency().clone(),
                score,
            ]
        };
        table.push_row(row);
    }
    table.render()
}

pub fn code_list_table(codes: &CodeList) -> String {
    let mut table = TextTable::new(["Code", "Currency Name"]);
    for (code, name) in codes {
        table.push_row([code.as_str(), name.as_str()]);
    }
    table.render()
}
