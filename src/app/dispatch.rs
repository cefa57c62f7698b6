use std::collections::HashMap;

use tracing::debug;

use super::{
    filter::select_dates,
    render,
    typing::{
        SymbolLookup, type_exchange_rate, type_fx_metadata, type_stock_metadata,
        type_symbol_match, type_time_series,
    },
};
use crate::{
    api::{
        av_dto::{AvExchangeRateDto, AvFxMetaDto, AvQuoteDto, AvStockMetaDto, AvSymbolSearchDto},
        reference::parse_code_list,
        utils::{parse_payload, take_envelope},
    },
    error::{Error, Result},
    models::{DateWindow, ExchangeRate, OutputFormat, Series, SeriesKind, SortOrder, SymbolMatch},
};

const META_DATA_KEY: &str = "Meta Data";
const EXCHANGE_RATE_KEY: &str = "Realtime Currency Exchange Rate";
const BEST_MATCHES_KEY: &str = "bestMatches";

/// Every response shape the tool knows how to render.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseKind {
    Series(SeriesKind),
    ExchangeRate,
    SymbolSearch,
    CurrencyList,
    CryptoList,
}

impl ResponseKind {
    pub fn target(&self) -> &'static str {
        match self {
            ResponseKind::Series(SeriesKind::Stock { .. }) => "stock prices",
            ResponseKind::Series(SeriesKind::Fx { .. }) => "exchange rate series",
            ResponseKind::ExchangeRate => "the current exchange rate",
            ResponseKind::SymbolSearch => "symbol search",
            ResponseKind::CurrencyList => "the physical currency list",
            ResponseKind::CryptoList => "the digital currency list",
        }
    }

    pub fn supports(&self, format: OutputFormat) -> bool {
        use OutputFormat::*;

        match self {
            ResponseKind::Series(_) => matches!(format, Hledger | Json | Csv | Table | TableLong),
            // The exchange rate endpoint has no CSV encoding.
            ResponseKind::ExchangeRate => matches!(format, Hledger | Json | Table | TableLong),
            ResponseKind::SymbolSearch => {
                matches!(format, Json | Csv | Table | TableLong | TableShort)
            }
            ResponseKind::CurrencyList | ResponseKind::CryptoList => {
                matches!(format, Csv | Table)
            }
        }
    }

    pub fn check_format(&self, format: OutputFormat) -> Result<()> {
        if self.supports(format) {
            Ok(())
        } else {
            Err(Error::UnsupportedFormat {
                format,
                target: self.target(),
            })
        }
    }
}

/// How a decoded response should be presented.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutputRequest {
    pub format: OutputFormat,
    pub window: DateWindow,
    pub order: SortOrder,
}

impl OutputRequest {
    pub fn new(format: OutputFormat, window: DateWindow, order: SortOrder) -> Self {
        Self {
            format,
            window,
            order,
        }
    }
}

/// Turns a raw payload into the requested output.
///
/// JSON and CSV are handed back byte for byte; every other format decodes
/// and types the payload before rendering it.
///
/// Output is text, so a passthrough body must be UTF-8. Alpha Vantage only
/// serves UTF-8; anything else fails with [`Error::Decode`] rather than
/// being printed lossily.
pub async fn generate_output<L: SymbolLookup>(
    kind: &ResponseKind,
    body: &[u8],
    request: &OutputRequest,
    lookup: &L,
) -> Result<String> {
    kind.check_format(request.format)?;

    if request.format.is_passthrough() {
        return String::from_utf8(body.to_vec())
            .map_err(|e| Error::decode(format!("{} response", kind.target()), e));
    }

    match kind {
        ResponseKind::Series(series_kind) => {
            let series = decode_series(series_kind, body, lookup).await?;
            series_output(&series, request)
        }
        ResponseKind::ExchangeRate => {
            let rate = decode_exchange_rate(body)?;
            match request.format {
                OutputFormat::Hledger => Ok(render::ledger_exchange_rate(&rate)),
                format => Ok(render::exchange_rate_tables(
                    &rate,
                    format == OutputFormat::TableLong,
                )),
            }
        }
        ResponseKind::SymbolSearch => {
            let matches = decode_search(body)?;
            Ok(render::search_table(
                &matches,
                request.format == OutputFormat::TableLong,
            ))
        }
        ResponseKind::CurrencyList | ResponseKind::CryptoList => {
            let codes = parse_code_list(body)?;
            Ok(render::code_list_table(&codes))
        }
    }
}

pub async fn decode_series<L: SymbolLookup>(
    kind: &SeriesKind,
    body: &[u8],
    lookup: &L,
) -> Result<Series> {
    let context = kind.to_string();
    let mut payload = parse_payload(body, &context)?;

    let raw_quotes: HashMap<String, AvQuoteDto> =
        take_envelope(&mut payload, kind.envelope_key(), &context)?;
    let quotes = type_time_series(kind, &raw_quotes)?;

    let metadata = match kind {
        SeriesKind::Stock { .. } => {
            let raw: AvStockMetaDto = take_envelope(&mut payload, META_DATA_KEY, &context)?;
            type_stock_metadata(raw, lookup).await?
        }
        SeriesKind::Fx { .. } => {
            let raw: AvFxMetaDto = take_envelope(&mut payload, META_DATA_KEY, &context)?;
            type_fx_metadata(raw)?
        }
    };

    debug!(kind = %kind, records = quotes.len(), "decoded time series");
    Ok(Series::new(*kind, metadata, quotes))
}

pub fn series_output(series: &Series, request: &OutputRequest) -> Result<String> {
    let dates = select_dates(series.quotes(), &request.window, request.order);
    debug!(
        selected = dates.len(),
        begin = %request.window.begin(),
        end = %request.window.end(),
        "filtered time series"
    );

    match request.format {
        OutputFormat::Hledger => Ok(render::ledger_series(
            series.metadata(),
            series.quotes(),
            &dates,
        )),
        OutputFormat::Table | OutputFormat::TableLong => {
            let long = request.format == OutputFormat::TableLong;
            Ok(render::metadata_table(series.kind(), series.metadata())
                + &render::series_table(series.kind(), series.quotes(), &dates, long))
        }
        format => Err(Error::UnsupportedFormat {
            format,
            target: ResponseKind::Series(*series.kind()).target(),
        }),
    }
}

pub fn decode_exchange_rate(body: &[u8]) -> Result<ExchangeRate> {
    let context = "exchange rate response";
    let mut payload = parse_payload(body, context)?;
    let raw: AvExchangeRateDto = take_envelope(&mut payload, EXCHANGE_RATE_KEY, context)?;
    type_exchange_rate(raw)
}

pub fn decode_search(body: &[u8]) -> Result<Vec<SymbolMatch>> {
    let context = "symbol search response";
    let mut payload = parse_payload(body, context)?;
    let raw: Vec<AvSymbolSearchDto> = take_envelope(&mut payload, BEST_MATCHES_KEY, context)?;
    raw.into_iter().map(type_symbol_match).collect()
}
