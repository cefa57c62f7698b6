#![allow(dead_code)]

use std::sync::Mutex;

use reqwest::{StatusCode, Url};

use crate::{
    api::{Fetch, ReferenceLists},
    app::SymbolLookup,
    error::{Error, Result},
};

pub const DAILY: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Prices (open, high, low, close) and Volumes",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-03-01",
        "4. Output Size": "Compact",
        "5. Time Zone": "US/Eastern"
    },
    "Time Series (Daily)": {
        "2024-03-01": {
            "1. open": "185.4900",
            "2. high": "188.3800",
            "3. low": "185.1800",
            "4. close": "185.0300",
            "5. volume": "4018354"
        },
        "2024-02-28": {
            "1. open": "184.6300",
            "2. high": "185.3700",
            "3. low": "183.5500",
            "4. close": "185.3000",
            "5. volume": "3216345"
        },
        "2024-02-29": {
            "1. open": "186.1500",
            "2. high": "186.8495",
            "3. low": "184.6850",
            "4. close": "185.0300",
            "5. volume": "6458487"
        }
    }
}"#;

pub const DAILY_ADJUSTED: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Time Series with Splits and Dividend Events",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-03-01",
        "4. Output Size": "Compact",
        "5. Time Zone": "US/Eastern"
    },
    "Time Series (Daily)": {
        "2024-03-01": {
            "1. open": "185.4900",
            "2. high": "188.3800",
            "3. low": "185.1800",
            "4. close": "185.0300",
            "5. adjusted close": "150.2500",
            "6. volume": "4018354",
            "7. dividend amount": "0.0000",
            "8. split coefficient": "1.0"
        },
        "2024-02-08": {
            "1. open": "182.6300",
            "2. high": "184.5500",
            "3. low": "181.4900",
            "4. close": "184.3600",
            "5. adjusted close": "149.8850",
            "6. volume": "5161185",
            "7. dividend amount": "1.6600",
            "8. split coefficient": "1.0"
        }
    }
}"#;

pub const MONTHLY_ADJUSTED: &str = r#"{
    "Meta Data": {
        "1. Information": "Monthly Adjusted Prices and Volumes",
        "2. Symbol": "IBM",
        "3. Last Refreshed": "2024-03-01",
        "4. Time Zone": "US/Eastern"
    },
    "Monthly Adjusted Time Series": {
        "2024-03-01": {
            "1. open": "185.4900",
            "2. high": "188.3800",
            "3. low": "185.1800",
            "4. close": "185.0300",
            "5. adjusted close": "185.0300",
            "6. volume": "4018354",
            "7. dividend amount": "0.0000"
        },
        "2024-02-29": {
            "1. open": "183.6300",
            "2. high": "188.9500",
            "3. low": "178.7500",
            "4. close": "185.0300",
            "5. adjusted close": "183.4150",
            "6. volume": "83988942",
            "7. dividend amount": "1.6600"
        }
    }
}"#;

pub const FX_WEEKLY: &str = r#"{
    "Meta Data": {
        "1. Information": "Forex Weekly Prices (open, high, low, close)",
        "2. From Symbol": "EUR",
        "3. To Symbol": "USD",
        "4. Last Refreshed": "2024-03-01 21:55:00",
        "5. Time Zone": "UTC"
    },
    "Time Series FX (Weekly)": {
        "2024-03-01": {
            "1. open": "1.08180",
            "2. high": "1.08880",
            "3. low": "1.07960",
            "4. close": "1.08375"
        },
        "2024-02-23": {
            "1. open": "1.07760",
            "2. high": "1.08870",
            "3. low": "1.07610",
            "4. close": "1.08210"
        }
    }
}"#;

pub const EXCHANGE_RATE: &str = r#"{
    "Realtime Currency Exchange Rate": {
        "1. From_Currency Code": "USD",
        "2. From_Currency Name": "United States Dollar",
        "3. To_Currency Code": "JPY",
        "4. To_Currency Name": "Japanese Yen",
        "5. Exchange Rate": "149.83000000",
        "6. Last Refreshed": "2024-03-01 21:55:01",
        "7. Time Zone": "UTC",
        "8. Bid Price": "149.82600000",
        "9. Ask Price": "-"
    }
}"#;

pub const SEARCH: &str = r#"{
    "bestMatches": [
        {
            "1. symbol": "TSCO.LON",
            "2. name": "Tesco PLC",
            "3. type": "Equity",
            "4. region": "United Kingdom",
            "5. marketOpen": "08:00",
            "6. marketClose": "16:30",
            "7. timezone": "UTC+01",
            "8. currency": "GBX",
            "9. matchScore": "0.7273"
        },
        {
            "1. symbol": "TSCDF",
            "2. name": "Tesco plc",
            "3. type": "Equity",
            "4. region": "United States",
            "5. marketOpen": "09:30",
            "6. marketClose": "16:00",
            "7. timezone": "UTC-04",
            "8. currency": "USD",
            "9. matchScore": "0.7143"
        }
    ]
}"#;

pub const IBM_SEARCH: &str = r#"{
    "bestMatches": [
        {
            "1. symbol": "IBM",
            "2. name": "International Business Machines Corp",
            "3. type": "Equity",
            "4. region": "United States",
            "5. marketOpen": "09:30",
            "6. marketClose": "16:00",
            "7. timezone": "UTC-04",
            "8. currency": "USD",
            "9. matchScore": "1.0000"
        }
    ]
}"#;

pub const RATE_LIMIT_NOTE: &str = r#"{
    "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
}"#;

pub const PHYSICAL_LIST: &str = "currency code,currency name\nUSD,United States Dollar\nEUR,Euro\nJPY,Japanese Yen\n";

pub const DIGITAL_LIST: &str = "currency code,currency name\nBTC,Bitcoin\nETH,Ethereum\n";

/// Answers requests from canned bodies, picking the first whose needle
/// occurs in the URL, and records every URL it was asked for.
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    responses: Vec<(String, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, needle: &str, body: &str) -> Self {
        self.responses
            .push((needle.to_string(), body.as_bytes().to_vec()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for RecordingFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let url = url.to_string();
        self.requests.lock().unwrap().push(url.clone());
        self.responses
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, body)| body.clone())
            .ok_or(Error::HttpStatus {
                url,
                status: StatusCode::NOT_FOUND,
            })
    }
}

/// In-memory reference lists that count how often they were consulted.
#[derive(Debug, Default)]
pub struct StaticLists {
    currencies: Vec<&'static str>,
    cryptos: Vec<&'static str>,
    checks: Mutex<usize>,
}

impl StaticLists {
    pub fn new(currencies: &[&'static str], cryptos: &[&'static str]) -> Self {
        Self {
            currencies: currencies.to_vec(),
            cryptos: cryptos.to_vec(),
            checks: Mutex::new(0),
        }
    }

    pub fn checks(&self) -> usize {
        *self.checks.lock().unwrap()
    }
}

impl ReferenceLists for StaticLists {
    async fn currency_exists(&self, code: &str) -> Result<bool> {
        *self.checks.lock().unwrap() += 1;
        Ok(self.currencies.contains(&code))
    }

    async fn crypto_exists(&self, code: &str) -> Result<bool> {
        *self.checks.lock().unwrap() += 1;
        Ok(self.cryptos.contains(&code))
    }
}

pub struct FixedLookup(pub &'static str);

impl SymbolLookup for FixedLookup {
    async fn symbol_currency(&self, _symbol: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}
