use chrono::{Local, NaiveDate};
use reqwest::Url;
use tracing::debug;

use super::{lookup::SearchLookup, validation};
use crate::{
    api::{AvReferenceLists, Fetch, HttpFetcher, ReferenceLists, UrlBuilder, av::redact},
    app::{OutputRequest, ResponseKind, generate_output},
    config::Config,
    error::{Error, Result},
    models::{DateWindow, OutputFormat, SeriesKind, SortOrder},
};

/// Historical stock prices.
#[derive(Clone, Debug, Default)]
pub struct PriceQuery {
    pub symbol: String,
    pub format: String,
    pub interval: String,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub adjusted: bool,
    pub full: bool,
    pub reverse: bool,
}

/// Historical exchange rates between two currencies.
#[derive(Clone, Debug, Default)]
pub struct RateQuery {
    pub from: String,
    /// Falls back to the configured default currency.
    pub to: Option<String>,
    pub format: String,
    pub interval: String,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub full: bool,
    pub reverse: bool,
}

/// Current exchange rate between two physical or digital currencies.
#[derive(Clone, Debug, Default)]
pub struct CurrentRateQuery {
    pub from: String,
    pub to: Option<String>,
    pub format: String,
}

/// Validates queries, fetches the matching payload and renders it.
///
/// Every check that does not need the network runs before any request.
#[derive(Clone, Debug)]
pub struct PriceTrackerService<F, R> {
    config: Config,
    fetcher: F,
    lists: R,
}

/// The service wired to the live Alpha Vantage endpoints.
pub type HttpPriceTracker = PriceTrackerService<HttpFetcher, AvReferenceLists<HttpFetcher>>;

impl HttpPriceTracker {
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(*config.timeout())?;
        let lists = AvReferenceLists::new(
            fetcher.clone(),
            parse_url(config.physical_currency_list_url())?,
            parse_url(config.digital_currency_list_url())?,
        );
        Ok(Self::new(config, fetcher, lists))
    }
}

impl<F: Fetch, R: ReferenceLists> PriceTrackerService<F, R> {
    pub fn new(config: Config, fetcher: F, lists: R) -> Self {
        Self {
            config,
            fetcher,
            lists,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn lists(&self) -> &R {
        &self.lists
    }

    pub async fn stock_price(&self, query: &PriceQuery) -> Result<String> {
        validation::require_api_key(&self.config)?;
        let symbol = validation::require_value("stock symbol", &query.symbol)?;
        let format = validation::parse_format(&query.format)?;
        let interval = validation::parse_interval(&query.interval)?;

        let kind = ResponseKind::Series(SeriesKind::Stock {
            interval,
            adjusted: query.adjusted,
        });
        kind.check_format(format)?;
        let window =
            validation::parse_window(query.begin.as_deref(), query.end.as_deref(), today())?;

        let url = self
            .urls()
            .stock_series(symbol, interval, query.adjusted, query.full, format)?;
        let request = OutputRequest::new(format, window, SortOrder::from_reverse(query.reverse));
        self.fetch_and_render(&kind, &url, &request).await
    }

    pub async fn stock_search(&self, keywords: &str, format: &str) -> Result<String> {
        validation::require_api_key(&self.config)?;
        let keywords = validation::require_value("search keywords", keywords)?;
        let format = validation::parse_format(format)?;

        let kind = ResponseKind::SymbolSearch;
        kind.check_format(format)?;

        let url = self.urls().symbol_search(keywords, format)?;
        self.fetch_and_render(&kind, &url, &self.plain_request(format))
            .await
    }

    pub async fn currency_rate(&self, query: &RateQuery) -> Result<String> {
        validation::require_api_key(&self.config)?;
        let (from, to) = self.checked_pair(&query.from, query.to.as_deref()).await?;
        let format = validation::parse_format(&query.format)?;
        let interval = validation::parse_interval(&query.interval)?;

        let kind = ResponseKind::Series(SeriesKind::Fx { interval });
        kind.check_format(format)?;
        let window =
            validation::parse_window(query.begin.as_deref(), query.end.as_deref(), today())?;

        let url = self
            .urls()
            .fx_series(from, to, interval, query.full, format)?;
        let request = OutputRequest::new(format, window, SortOrder::from_reverse(query.reverse));
        self.fetch_and_render(&kind, &url, &request).await
    }

    pub async fn exchange_rate(&self, query: &CurrentRateQuery) -> Result<String> {
        validation::require_api_key(&self.config)?;
        let (from, to) = self.checked_pair(&query.from, query.to.as_deref()).await?;
        let format = validation::parse_format(&query.format)?;

        let kind = ResponseKind::ExchangeRate;
        kind.check_format(format)?;

        let url = self.urls().exchange_rate(from, to)?;
        self.fetch_and_render(&kind, &url, &self.plain_request(format))
            .await
    }

    /// The reference lists are public, so no API key is needed.
    pub async fn currency_list(&self, format: &str) -> Result<String> {
        let url = parse_url(self.config.physical_currency_list_url())?;
        self.list(ResponseKind::CurrencyList, &url, format).await
    }

    pub async fn crypto_list(&self, format: &str) -> Result<String> {
        let url = parse_url(self.config.digital_currency_list_url())?;
        self.list(ResponseKind::CryptoList, &url, format).await
    }

    async fn list(&self, kind: ResponseKind, url: &Url, format: &str) -> Result<String> {
        let format = validation::parse_format(format)?;
        kind.check_format(format)?;
        self.fetch_and_render(&kind, url, &self.plain_request(format))
            .await
    }

    /// Non-empty, distinct and known codes, in that order. Identical codes
    /// are rejected before the reference lists are downloaded.
    async fn checked_pair<'a>(
        &'a self,
        from: &'a str,
        to: Option<&'a str>,
    ) -> Result<(&'a str, &'a str)> {
        let from = validation::require_value("from currency", from)?;
        let to = validation::require_value(
            "to currency",
            to.unwrap_or(self.config.default_currency().as_str()),
        )?;
        validation::require_distinct(from, to)?;
        validation::require_known_code(&self.lists, "from", from).await?;
        validation::require_known_code(&self.lists, "to", to).await?;
        Ok((from, to))
    }

    fn urls(&self) -> UrlBuilder<'_> {
        UrlBuilder::new(self.config.base_url(), self.config.api_key())
    }

    fn plain_request(&self, format: OutputFormat) -> OutputRequest {
        OutputRequest::new(
            format,
            DateWindow::new(None, None, today()),
            SortOrder::Ascending,
        )
    }

    async fn fetch_and_render(
        &self,
        kind: &ResponseKind,
        url: &Url,
        request: &OutputRequest,
    ) -> Result<String> {
        debug!(
            response = kind.target(),
            format = %request.format,
            url = %redact(url),
            "running query"
        );
        let body = self.fetcher.fetch(url).await?;

        let lookup = SearchLookup::new(&self.fetcher, self.urls(), self.config.is_demo());
        generate_output(kind, &body, request, &lookup).await
    }
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Configuration(format!("invalid URL '{}': {}", value, e)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
