use std::{collections::HashMap, str::FromStr, sync::LazyLock};

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    api::av_dto::{AvExchangeRateDto, AvFxMetaDto, AvQuoteDto, AvStockMetaDto, AvSymbolSearchDto},
    error::{Error, Result},
    models::{
        Adjustment, ExchangeRate, Quote, Refreshed, SeriesKind, SeriesMetadata, SymbolMatch,
        TimeSeries,
    },
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Currency shown instead of a looked-up one when running against the demo key.
pub const DEMO_CURRENCY: &str = "NIL";

static PLAIN_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static UTC_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^UTC(?:([+-])(\d{1,2}(?:\.\d+)?))?$").expect("UTC offset pattern is valid")
});

/// Resolves the currency a stock symbol trades in.
#[allow(async_fn_in_trait)]
pub trait SymbolLookup {
    async fn symbol_currency(&self, symbol: &str) -> Result<String>;
}

/// Strict `YYYY-MM-DD`: chrono alone also takes `2024-1-5`, `24-01-05` or
/// `+2024-01-05`.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDate {
        field,
        value: value.to_string(),
    };
    if !PLAIN_DATE.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Tries `YYYY-MM-DD HH:MM:SS` first and falls back to `YYYY-MM-DD`.
pub fn parse_refreshed(value: &str, record: &str) -> Result<Refreshed> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        return Ok(Refreshed::DateTime(datetime));
    }
    parse_date("last refreshed", value)
        .map(Refreshed::Date)
        .map_err(|_| Error::field("last refreshed", value, record))
}

/// Plain base-10 digits only. `str::parse` and `Decimal::from_str` also take
/// a leading `+`, and `Decimal` skips `_` separators.
fn is_plain_number(value: &str) -> bool {
    !value.starts_with('+') && !value.contains('_')
}

pub fn parse_decimal(value: &str, field: &'static str, record: &str) -> Result<Decimal> {
    if !is_plain_number(value) {
        return Err(Error::field(field, value, record));
    }
    Decimal::from_str(value).map_err(|_| Error::field(field, value, record))
}

/// Prices, rates and dividends are never negative.
pub fn parse_price(value: &str, field: &'static str, record: &str) -> Result<Decimal> {
    let price = parse_decimal(value, field, record)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Error::field(field, value, record));
    }
    Ok(price)
}

pub fn parse_volume(value: &str, record: &str) -> Result<u32> {
    if !is_plain_number(value) {
        return Err(Error::field("volume", value, record));
    }
    value
        .parse::<u32>()
        .map_err(|_| Error::field("volume", value, record))
}

fn required<'a>(value: &'a Option<String>, field: &'static str, record: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::field(field, "<missing>", record))
}

pub fn type_quote(kind: &SeriesKind, raw: &AvQuoteDto, record: &str) -> Result<Quote> {
    let open = parse_price(raw.open(), "open price", record)?;
    let high = parse_price(raw.high(), "high price", record)?;
    let low = parse_price(raw.low(), "low price", record)?;
    let close = parse_price(raw.close(), "close price", record)?;

    let volume = if kind.has_volume() {
        Some(parse_volume(required(raw.volume(), "volume", record)?, record)?)
    } else {
        None
    };

    let adjustment = if kind.is_adjusted() {
        let adjusted_close = required(raw.adjusted_close(), "adjusted close", record)?;
        let dividend_amount = required(raw.dividend_amount(), "dividend amount", record)?;
        let split_coefficient = if kind.has_split_coefficient() {
            let value = required(raw.split_coefficient(), "split coefficient", record)?;
            Some(parse_price(value, "split coefficient", record)?)
        } else {
            None
        };
        Some(Adjustment::new(
            parse_price(adjusted_close, "adjusted close", record)?,
            parse_price(dividend_amount, "dividend amount", record)?,
            split_coefficient,
        ))
    } else {
        None
    };

    Ok(Quote::new(open, high, low, close, volume, adjustment))
}

pub fn type_time_series(kind: &SeriesKind, raw: &HashMap<String, AvQuoteDto>) -> Result<TimeSeries> {
    let mut series = TimeSeries::with_capacity(raw.len());
    for (date, quote) in raw {
        let record = format!("{} record {}", kind, date);
        let date = parse_date("date", date).map_err(|_| Error::field("date", date, &record))?;
        series.insert(date, type_quote(kind, quote, &record)?);
    }
    Ok(series)
}

pub async fn type_stock_metadata<L: SymbolLookup>(
    raw: AvStockMetaDto,
    lookup: &L,
) -> Result<SeriesMetadata> {
    let last_refreshed = parse_refreshed(raw.last_refreshed(), "stock metadata")?;
    let currency = lookup.symbol_currency(raw.symbol()).await?;

    Ok(SeriesMetadata::new(
        raw.symbol().clone(),
        currency,
        last_refreshed,
        raw.output_size().clone(),
        raw.time_zone().clone(),
    ))
}

pub fn type_fx_metadata(raw: AvFxMetaDto) -> Result<SeriesMetadata> {
    let last_refreshed = parse_refreshed(raw.last_refreshed(), "FX metadata")?;

    Ok(SeriesMetadata::new(
        raw.from_symbol().clone(),
        raw.to_symbol().clone(),
        last_refreshed,
        raw.output_size().clone(),
        raw.time_zone().clone(),
    ))
}

/// Bid and ask come back as `-` for pairs without an order book.
fn parse_optional_price(value: &str, field: &'static str, record: &str) -> Result<Option<Decimal>> {
    match value.trim() {
        "-" | "" => Ok(None),
        _ => parse_price(value, field, record).map(Some),
    }
}

pub fn type_exchange_rate(raw: AvExchangeRateDto) -> Result<ExchangeRate> {
    let record = format!("exchange rate {}/{}", raw.from_code(), raw.to_code());
    let rate = parse_price(raw.exchange_rate(), "exchange rate", &record)?;
    let last_refreshed = parse_refreshed(raw.last_refreshed(), &record)?;
    let bid_price = parse_optional_price(raw.bid_price(), "bid price", &record)?;
    let ask_price = parse_optional_price(raw.ask_price(), "ask price", &record)?;

    Ok(ExchangeRate::new(
        raw.from_code().clone(),
        raw.from_name().clone(),
        raw.to_code().clone(),
        raw.to_name().clone(),
        rate,
        last_refreshed,
        raw.time_zone().clone(),
        bid_price,
        ask_price,
    ))
}

/// Parses `UTC`, `UTC-04`, `UTC+01` or `UTC+5.5` into a fixed offset.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let caps = UTC_OFFSET.captures(value.trim())?;
    let (Some(sign), Some(hours)) = (caps.get(1), caps.get(2)) else {
        return FixedOffset::east_opt(0);
    };
    let hours = hours.as_str().parse::<f64>().ok()?;
    let seconds = (hours * 3600.0).round() as i32;
    match sign.as_str() {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

pub fn type_symbol_match(raw: AvSymbolSearchDto) -> Result<SymbolMatch> {
    let record = format!("search match {}", raw.symbol());
    let match_score = raw
        .match_score()
        .parse::<f32>()
        .map_err(|_| Error::field("match score", raw.match_score(), &record))?;
    let utc_offset = parse_utc_offset(raw.timezone())
        .ok_or_else(|| Error::field("timezone offset", raw.timezone(), &record))?;
    let market_open = NaiveTime::parse_from_str(raw.market_open(), "%H:%M")
        .map_err(|_| Error::field("market open", raw.market_open(), &record))?;
    let market_close = NaiveTime::parse_from_str(raw.market_close(), "%H:%M")
        .map_err(|_| Error::field("market close", raw.market_close(), &record))?;

    Ok(SymbolMatch::new(
        raw.symbol().clone(),
        raw.name().clone(),
        raw.asset_type().clone(),
        raw.region().clone(),
        market_open,
        market_close,
        utc_offset,
        raw.currency().clone(),
        match_score,
    ))
}
