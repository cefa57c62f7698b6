use derive_getters::Getters;
use derive_new::new;
use serde::Deserialize;

/// Top-level messages Alpha Vantage sends instead of data, with HTTP 200.
#[derive(Debug, Default, Deserialize)]
pub struct AvMessageDto {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

impl AvMessageDto {
    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

/// `Meta Data` block of the TIME_SERIES_* functions. Daily responses put
/// the output size at position 4 and shift the time zone to 5.
#[derive(Debug, Deserialize, Getters, new)]
pub struct AvStockMetaDto {
    #[serde(rename = "1. Information")]
    information: String,
    #[serde(rename = "2. Symbol")]
    symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: String,
    #[serde(rename = "4. Output Size")]
    output_size: Option<String>,
    #[serde(rename = "5. Time Zone", alias = "4. Time Zone")]
    time_zone: String,
}

/// `Meta Data` block of the FX_* functions.
#[derive(Debug, Deserialize, Getters, new)]
pub struct AvFxMetaDto {
    #[serde(rename = "1. Information")]
    information: String,
    #[serde(rename = "2. From Symbol")]
    from_symbol: String,
    #[serde(rename = "3. To Symbol")]
    to_symbol: String,
    #[serde(rename = "4. Output Size")]
    output_size: Option<String>,
    #[serde(rename = "5. Last Refreshed", alias = "4. Last Refreshed")]
    last_refreshed: String,
    #[serde(rename = "6. Time Zone", alias = "5. Time Zone")]
    time_zone: String,
}

/// One record of any time series. Which of the optional fields must be
/// present depends on the series kind and is checked while typing.
#[derive(Debug, Deserialize, Getters, new)]
pub struct AvQuoteDto {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume", alias = "6. volume")]
    volume: Option<String>,
    #[serde(rename = "5. adjusted close")]
    adjusted_close: Option<String>,
    #[serde(rename = "7. dividend amount")]
    dividend_amount: Option<String>,
    #[serde(rename = "8. split coefficient")]
    split_coefficient: Option<String>,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct AvExchangeRateDto {
    #[serde(rename = "1. From_Currency Code")]
    from_code: String,
    #[serde(rename = "2. From_Currency Name")]
    from_name: String,
    #[serde(rename = "3. To_Currency Code")]
    to_code: String,
    #[serde(rename = "4. To_Currency Name")]
    to_name: String,
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: String,
    #[serde(rename = "6. Last Refreshed")]
    last_refreshed: String,
    #[serde(rename = "7. Time Zone")]
    time_zone: String,
    #[serde(rename = "8. Bid Price")]
    bid_price: String,
    #[serde(rename = "9. Ask Price")]
    ask_price: String,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct AvSymbolSearchDto {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type")]
    asset_type: String,
    #[serde(rename = "4. region")]
    region: String,
    #[serde(rename = "5. marketOpen")]
    market_open: String,
    #[serde(rename = "6. marketClose")]
    market_close: String,
    #[serde(rename = "7. timezone")]
    timezone: String,
    #[serde(rename = "8. currency")]
    currency: String,
    #[serde(rename = "9. matchScore")]
    match_score: String,
}
