#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        app::{OutputRequest, ResponseKind, dispatch::decode_series, generate_output},
        error::Error,
        models::{DateWindow, Interval, OutputFormat, SeriesKind, SortOrder},
        test::fixtures::{
            DAILY, DAILY_ADJUSTED, EXCHANGE_RATE, FX_WEEKLY, FixedLookup, MONTHLY_ADJUSTED,
            PHYSICAL_LIST, RATE_LIMIT_NOTE, SEARCH,
        },
    };

    const STOCK_DAILY: ResponseKind = ResponseKind::Series(SeriesKind::Stock {
        interval: Interval::Daily,
        adjusted: false,
    });

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn request(format: OutputFormat) -> OutputRequest {
        OutputRequest::new(
            format,
            DateWindow::new(None, None, date("2024-12-31")),
            SortOrder::Ascending,
        )
    }

    async fn render(kind: ResponseKind, body: &str, request: OutputRequest) -> Result<String, Error> {
        generate_output(&kind, body.as_bytes(), &request, &FixedLookup("USD")).await
    }

    #[tokio::test]
    async fn json_and_csv_are_passed_through() {
        let csv = "timestamp,open,high,low,close,volume\n2024-03-01,185.49,188.38,185.18,185.03,4018354\n";
        let output = render(STOCK_DAILY, csv, request(OutputFormat::Csv)).await.unwrap();
        assert_eq!(output, csv);

        // Passthrough never decodes, so even a broken payload survives untouched.
        let broken = "{\"Meta Data\": ";
        let output = render(STOCK_DAILY, broken, request(OutputFormat::Json)).await.unwrap();
        assert_eq!(output, broken);

        let output = render(ResponseKind::SymbolSearch, SEARCH, request(OutputFormat::Json))
            .await
            .unwrap();
        assert_eq!(output, SEARCH);
    }

    #[tokio::test]
    async fn passthrough_rejects_non_utf8_bodies() {
        let body = b"timestamp,open\n2024-03-01,\xff\xfe\n";
        let err = generate_output(&STOCK_DAILY, body, &request(OutputFormat::Csv), &FixedLookup("USD"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { .. }), "{:?}", err);
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn daily_prices_to_ledger() {
        let output = render(STOCK_DAILY, DAILY, request(OutputFormat::Hledger)).await.unwrap();

        assert_eq!(
            output,
            "P 2024-02-28 \"IBM\" 185.30 USD\n\
             P 2024-02-29 \"IBM\" 185.03 USD\n\
             P 2024-03-01 \"IBM\" 185.03 USD\n"
        );
    }

    #[tokio::test]
    async fn window_and_order_apply_before_rendering() {
        let request = OutputRequest::new(
            OutputFormat::Hledger,
            DateWindow::new(Some(date("2024-02-29")), None, date("2024-12-31")),
            SortOrder::Descending,
        );
        let output = render(STOCK_DAILY, DAILY, request).await.unwrap();

        assert_eq!(
            output,
            "P 2024-03-01 \"IBM\" 185.03 USD\n\
             P 2024-02-29 \"IBM\" 185.03 USD\n"
        );
    }

    #[tokio::test]
    async fn adjusted_daily_records_adjusted_close() {
        let kind = ResponseKind::Series(SeriesKind::Stock {
            interval: Interval::Daily,
            adjusted: true,
        });
        let output = render(kind, DAILY_ADJUSTED, request(OutputFormat::Hledger)).await.unwrap();

        assert_eq!(
            output,
            "P 2024-02-08 \"IBM\" 149.89 USD\n\
             P 2024-03-01 \"IBM\" 150.25 USD\n"
        );
    }

    #[tokio::test]
    async fn monthly_adjusted_metadata_without_output_size() {
        let kind = SeriesKind::Stock {
            interval: Interval::Monthly,
            adjusted: true,
        };
        let series = decode_series(&kind, MONTHLY_ADJUSTED.as_bytes(), &FixedLookup("USD"))
            .await
            .unwrap();

        assert_eq!(series.metadata().time_zone(), "US/Eastern");
        assert_eq!(*series.metadata().output_size(), None);
        assert_eq!(series.quotes().len(), 2);

        let table = generate_output(
            &ResponseKind::Series(kind),
            MONTHLY_ADJUSTED.as_bytes(),
            &request(OutputFormat::TableLong),
            &FixedLookup("USD"),
        )
        .await
        .unwrap();
        assert!(table.contains("Dividend Amount"));
        assert!(!table.contains("Split Coefficient"));
    }

    #[tokio::test]
    async fn fx_series_quotes_in_the_target_currency() {
        let kind = ResponseKind::Series(SeriesKind::Fx {
            interval: Interval::Weekly,
        });
        let output = render(kind, FX_WEEKLY, request(OutputFormat::Hledger)).await.unwrap();

        assert_eq!(
            output,
            "P 2024-02-23 \"EUR\" 1.08 USD\n\
             P 2024-03-01 \"EUR\" 1.08 USD\n"
        );

        let table = render(kind, FX_WEEKLY, request(OutputFormat::Table)).await.unwrap();
        assert!(table.contains("From"));
        assert!(table.contains("2024-03-01 21:55:00"));
        assert!(!table.contains("Volume"));
    }

    #[tokio::test]
    async fn current_rate_to_ledger_and_tables() {
        let output = render(ResponseKind::ExchangeRate, EXCHANGE_RATE, request(OutputFormat::Hledger))
            .await
            .unwrap();
        assert_eq!(output, "P 2024-03-01 \"USD\" 149.83 JPY\n");

        let short = render(ResponseKind::ExchangeRate, EXCHANGE_RATE, request(OutputFormat::Table))
            .await
            .unwrap();
        assert!(short.contains("United States Dollar (USD)"));
        assert!(short.contains("149.83"));
        assert!(!short.contains("Bid Price"));

        let long = render(ResponseKind::ExchangeRate, EXCHANGE_RATE, request(OutputFormat::TableLong))
            .await
            .unwrap();
        assert!(long.contains("Bid Price"));
        assert!(long.contains("149.826"));
    }

    #[tokio::test]
    async fn search_tables() {
        let short = render(ResponseKind::SymbolSearch, SEARCH, request(OutputFormat::TableShort))
            .await
            .unwrap();
        assert!(short.contains("TSCO.LON"));
        assert!(short.contains("72.73%"));
        assert!(!short.contains("Market Open"));
        assert_eq!(
            short,
            render(ResponseKind::SymbolSearch, SEARCH, request(OutputFormat::Table))
                .await
                .unwrap()
        );

        let long = render(ResponseKind::SymbolSearch, SEARCH, request(OutputFormat::TableLong))
            .await
            .unwrap();
        assert!(long.contains("Market Open"));
        assert!(long.contains("16:30"));
        assert!(long.contains("UTC+01:00"));
        assert!(long.contains("UTC-04:00"));
    }

    #[tokio::test]
    async fn code_list_table() {
        let output = render(ResponseKind::CurrencyList, PHYSICAL_LIST, request(OutputFormat::Table))
            .await
            .unwrap();

        assert!(output.contains("Japanese Yen"));
        assert!(!output.contains("currency code"));
    }

    #[tokio::test]
    async fn inapplicable_formats_are_rejected() {
        let cases = [
            (ResponseKind::ExchangeRate, OutputFormat::Csv),
            (ResponseKind::SymbolSearch, OutputFormat::Hledger),
            (ResponseKind::CryptoList, OutputFormat::Json),
            (STOCK_DAILY, OutputFormat::TableShort),
        ];

        for (kind, format) in cases {
            let err = render(kind, "{}", request(format)).await.unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedFormat { format: f, .. } if f == format),
                "{:?} with {} gave {:?}",
                kind,
                format,
                err
            );
        }
    }

    #[tokio::test]
    async fn provider_messages_become_api_errors() {
        let err = render(STOCK_DAILY, RATE_LIMIT_NOTE, request(OutputFormat::Hledger))
            .await
            .unwrap_err();

        match err {
            Error::Api(message) => assert!(message.contains("5 calls per minute")),
            other => panic!("expected an API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_envelope_is_a_decode_error() {
        // Weekly data handed to the daily decoder.
        let weekly = DAILY.replace("Time Series (Daily)", "Weekly Time Series");
        let err = render(STOCK_DAILY, &weekly, request(OutputFormat::Hledger))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{:?}", err);

        let err = render(STOCK_DAILY, "[1, 2]", request(OutputFormat::Table))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn bad_field_names_its_record() {
        let broken = DAILY.replace("\"4018354\"", "\"lots\"");
        let err = render(STOCK_DAILY, &broken, request(OutputFormat::Hledger))
            .await
            .unwrap_err();

        match err {
            Error::FieldParse { field, value, record } => {
                assert_eq!(field, "volume");
                assert_eq!(value, "lots");
                assert!(record.contains("2024-03-01"));
            }
            other => panic!("expected a field error, got {:?}", other),
        }
    }
}
