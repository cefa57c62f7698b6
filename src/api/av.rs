use reqwest::Url;

use crate::{
    error::{Error, Result},
    models::{Interval, OutputFormat, SeriesKind},
};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
pub const PHYSICAL_CURRENCY_LIST_URL: &str = "https://www.alphavantage.co/physical_currency_list/";
pub const DIGITAL_CURRENCY_LIST_URL: &str = "https://www.alphavantage.co/digital_currency_list/";

const FUNCTION_SYMBOL_SEARCH: &str = "SYMBOL_SEARCH";
const FUNCTION_EXCHANGE_RATE: &str = "CURRENCY_EXCHANGE_RATE";

/// Builds Alpha Vantage query URLs.
///
/// Parameters are always appended in the same order: `function`, the
/// symbol or currency parameters, `outputsize` (daily series with full
/// history only), `apikey`, then `datatype` (CSV output only).
#[derive(Clone, Copy, Debug)]
pub struct UrlBuilder<'a> {
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(base_url: &'a str, api_key: &'a str) -> Self {
        Self { base_url, api_key }
    }

    pub fn stock_series(
        &self,
        symbol: &str,
        interval: Interval,
        adjusted: bool,
        full: bool,
        format: OutputFormat,
    ) -> Result<Url> {
        let kind = SeriesKind::Stock { interval, adjusted };
        self.series(&kind, &[("symbol", symbol)], full, format)
    }

    pub fn fx_series(
        &self,
        from: &str,
        to: &str,
        interval: Interval,
        full: bool,
        format: OutputFormat,
    ) -> Result<Url> {
        let kind = SeriesKind::Fx { interval };
        self.series(&kind, &[("from_symbol", from), ("to_symbol", to)], full, format)
    }

    pub fn exchange_rate(&self, from: &str, to: &str) -> Result<Url> {
        self.build(&[
            ("function", FUNCTION_EXCHANGE_RATE),
            ("from_currency", from),
            ("to_currency", to),
            ("apikey", self.api_key),
        ])
    }

    pub fn symbol_search(&self, keywords: &str, format: OutputFormat) -> Result<Url> {
        let mut params = vec![
            ("function", FUNCTION_SYMBOL_SEARCH),
            ("keywords", keywords),
            ("apikey", self.api_key),
        ];
        if format == OutputFormat::Csv {
            params.push(("datatype", "csv"));
        }
        self.build(&params)
    }

    fn series(
        &self,
        kind: &SeriesKind,
        symbols: &[(&'static str, &str)],
        full: bool,
        format: OutputFormat,
    ) -> Result<Url> {
        let mut params = vec![("function", kind.api_function())];
        params.extend_from_slice(symbols);

        // Only the daily endpoints cut the history down to ~100 points.
        if kind.interval() == Interval::Daily && full {
            params.push(("outputsize", "full"));
        }
        params.push(("apikey", self.api_key));

        if format == OutputFormat::Csv {
            params.push(("datatype", "csv"));
        }
        self.build(&params)
    }

    fn build(&self, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(self.base_url, params).map_err(|e| {
            Error::Configuration(format!("invalid API base URL '{}': {}", self.base_url, e))
        })
    }
}

/// Renders `url` for logging with the API key masked.
pub fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "apikey" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
