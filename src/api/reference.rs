use std::collections::BTreeMap;

use csv::Reader;
use reqwest::Url;
use tracing::debug;

use super::http::Fetch;
use crate::error::{Error, Result};

/// Currency code to currency name.
pub type CodeList = BTreeMap<String, String>;

/// Membership checks against the physical and digital currency lists.
#[allow(async_fn_in_trait)]
pub trait ReferenceLists {
    async fn currency_exists(&self, code: &str) -> Result<bool>;
    async fn crypto_exists(&self, code: &str) -> Result<bool>;
}

/// Parses the `currency code,currency name` CSV lists published by Alpha Vantage.
pub fn parse_code_list(body: &[u8]) -> Result<CodeList> {
    let mut reader = Reader::from_reader(body);
    let mut codes = CodeList::new();

    for (row_idx, record) in reader.records().enumerate() {
        let rec = record?;
        if rec.len() < 2 {
            return Err(Error::decode(
                "currency list",
                format!("expected 2 columns at row {}, found {}", row_idx + 1, rec.len()),
            ));
        }
        codes.insert(rec[0].trim().to_string(), rec[1].trim().to_string());
    }

    Ok(codes)
}

/// Reference lists downloaded through a [`Fetch`] implementation on every check.
#[derive(Clone, Debug)]
pub struct AvReferenceLists<F> {
    fetcher: F,
    physical_url: Url,
    digital_url: Url,
}

impl<F: Fetch> AvReferenceLists<F> {
    pub fn new(fetcher: F, physical_url: Url, digital_url: Url) -> Self {
        Self {
            fetcher,
            physical_url,
            digital_url,
        }
    }

    pub async fn currencies(&self) -> Result<CodeList> {
        let body = self.fetcher.fetch(&self.physical_url).await?;
        parse_code_list(&body)
    }

    pub async fn cryptos(&self) -> Result<CodeList> {
        let body = self.fetcher.fetch(&self.digital_url).await?;
        parse_code_list(&body)
    }
}

impl<F: Fetch> ReferenceLists for AvReferenceLists<F> {
    async fn currency_exists(&self, code: &str) -> Result<bool> {
        if code.is_empty() {
            return Ok(false);
        }
        let found = self.currencies().await?.contains_key(code);
        debug!(code, found, "physical currency lookup");
        Ok(found)
    }

    async fn crypto_exists(&self, code: &str) -> Result<bool> {
        if code.is_empty() {
            return Ok(false);
        }
        let found = self.cryptos().await?.contains_key(code);
        debug!(code, found, "digital currency lookup");
        Ok(found)
    }
}
