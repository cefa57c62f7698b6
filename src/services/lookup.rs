use tracing::{debug, warn};

use crate::{
    api::{Fetch, UrlBuilder},
    app::{
        SymbolLookup,
        dispatch::decode_search,
        typing::DEMO_CURRENCY,
    },
    error::{Error, Result},
    models::OutputFormat,
};

/// Resolves a stock's trading currency through the symbol search endpoint.
pub struct SearchLookup<'a, F> {
    fetcher: &'a F,
    urls: UrlBuilder<'a>,
    demo: bool,
}

impl<'a, F: Fetch> SearchLookup<'a, F> {
    pub fn new(fetcher: &'a F, urls: UrlBuilder<'a>, demo: bool) -> Self {
        Self {
            fetcher,
            urls,
            demo,
        }
    }
}

impl<F: Fetch> SymbolLookup for SearchLookup<'_, F> {
    async fn symbol_currency(&self, symbol: &str) -> Result<String> {
        // The demo key answers for a handful of symbols only, so searches
        // would fail for reasons unrelated to the query.
        if self.demo {
            debug!(symbol, "demo mode, skipping currency lookup");
            return Ok(DEMO_CURRENCY.to_string());
        }

        let url = self.urls.symbol_search(symbol, OutputFormat::Json)?;
        let body = self.fetcher.fetch(&url).await?;
        let matches = decode_search(&body)?;

        let exact = matches
            .iter()
            .find(|candidate| candidate.symbol().eq_ignore_ascii_case(symbol));
        let best = match exact {
            Some(found) => found,
            None => {
                let first = matches.first().ok_or_else(|| {
                    Error::Validation(format!("no stock symbol matches '{}'", symbol))
                })?;
                warn!(
                    symbol,
                    matched = %first.symbol(),
                    "no exact symbol match, using the best match's currency"
                );
                first
            }
        };

        debug!(symbol, currency = %best.currency(), "resolved symbol currency");
        Ok(best.currency().clone())
    }
}
