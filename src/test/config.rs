#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use crate::{
        config::{
            API_KEY_VAR, BASE_URL_VAR, Config, DEBUG_VAR, DEFAULT_CURRENCY_VAR, DEFAULT_TIMEOUT,
        },
        error::Error,
    };

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api_key(), "");
        assert_eq!(config.default_currency(), "EUR");
        assert!(!*config.debug());
        assert_eq!(config.base_url(), "https://www.alphavantage.co/query");
        assert_eq!(*config.timeout(), DEFAULT_TIMEOUT);
        assert!(!config.has_api_key());
        assert!(!config.is_demo());
    }

    #[test]
    fn reads_variables() {
        let config = config_from(&[
            (API_KEY_VAR, " ABCDEFGH "),
            (DEFAULT_CURRENCY_VAR, "CHF"),
            (DEBUG_VAR, "yes"),
            (BASE_URL_VAR, "http://localhost:8080/query"),
        ])
        .unwrap();

        assert_eq!(config.api_key(), "ABCDEFGH");
        assert_eq!(config.default_currency(), "CHF");
        assert!(*config.debug());
        assert_eq!(config.base_url(), "http://localhost:8080/query");
    }

    #[test]
    fn blank_variables_keep_defaults() {
        let config = config_from(&[(DEFAULT_CURRENCY_VAR, "  ")]).unwrap();
        assert_eq!(config.default_currency(), "EUR");
    }

    #[test]
    fn rejects_non_boolean_debug() {
        let err = config_from(&[(DEBUG_VAR, "sometimes")]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn demo_key_or_debug_enables_demo_mode() {
        assert!(config_from(&[(API_KEY_VAR, "demo")]).unwrap().is_demo());
        assert!(Config::default().with_api_key("real").with_debug(true).is_demo());
        assert!(!Config::default().with_api_key("real").is_demo());
    }

    #[test]
    fn flags_override_variables() {
        let config = config_from(&[(API_KEY_VAR, "from-env"), (DEFAULT_CURRENCY_VAR, "CHF")])
            .unwrap()
            .with_api_key("from-flag")
            .with_default_currency("GBP")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.api_key(), "from-flag");
        assert_eq!(config.default_currency(), "GBP");
        assert_eq!(config.timeout().as_secs(), 5);
    }

    #[test]
    fn masks_api_key() {
        assert_eq!(Config::default().masked_api_key(), "<unset>");
        assert_eq!(Config::default().with_api_key("abc").masked_api_key(), "***");
        assert_eq!(
            Config::default().with_api_key("ABCDEFGH").masked_api_key(),
            "****EFGH"
        );
    }

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(Error::MissingApiKey.exit_code(), 2);
        assert_eq!(Error::Validation("x".into()).exit_code(), 2);
        assert_eq!(Error::Api("limit".into()).exit_code(), 3);
        assert_eq!(Error::decode("payload", "eof").exit_code(), 4);
        assert_eq!(Error::field("volume", "x", "IBM").exit_code(), 4);
    }
}
