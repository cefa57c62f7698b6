use std::{path::PathBuf, time::Duration};

use derive_getters::Getters;
use tracing::debug;

use crate::{
    api::av::{BASE_URL, DIGITAL_CURRENCY_LIST_URL, PHYSICAL_CURRENCY_LIST_URL},
    error::{Error, Result},
};

pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";
pub const DEFAULT_CURRENCY_VAR: &str = "PRICE_TRACKER_DEFAULT_CURRENCY";
pub const DEBUG_VAR: &str = "PRICE_TRACKER_DEBUG";
pub const BASE_URL_VAR: &str = "PRICE_TRACKER_BASE_URL";

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The key Alpha Vantage hands out for its documentation examples.
pub const DEMO_API_KEY: &str = "demo";

/// Read-only settings for one invocation. Built once at startup and passed
/// down explicitly.
#[derive(Clone, Debug, Getters)]
pub struct Config {
    api_key: String,
    default_currency: String,
    debug: bool,
    base_url: String,
    physical_currency_list_url: String,
    digital_currency_list_url: String,
    timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            debug: false,
            base_url: BASE_URL.to_string(),
            physical_currency_list_url: PHYSICAL_CURRENCY_LIST_URL.to_string(),
            digital_currency_list_url: DIGITAL_CURRENCY_LIST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a variable lookup, so callers decide where
    /// the values come from.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(api_key) = value(API_KEY_VAR) {
            config.api_key = api_key;
        }
        if let Some(currency) = value(DEFAULT_CURRENCY_VAR) {
            config.default_currency = currency;
        }
        if let Some(debug) = value(DEBUG_VAR) {
            config.debug = parse_flag(DEBUG_VAR, &debug)?;
        }
        if let Some(base_url) = value(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_reference_urls(
        mut self,
        physical: impl Into<String>,
        digital: impl Into<String>,
    ) -> Self {
        self.physical_currency_list_url = physical.into();
        self.digital_currency_list_url = digital.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Demo mode skips live symbol lookups.
    pub fn is_demo(&self) -> bool {
        self.debug || self.api_key == DEMO_API_KEY
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        match chars.len() {
            0 => "<unset>".to_string(),
            n if n <= 4 => "*".repeat(n),
            n => format!("{}{}", "*".repeat(n - 4), chars[n - 4..].iter().collect::<String>()),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Configuration(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

/// Loads variables from a dotenv file without overriding ones already set.
///
/// An explicit path must exist; otherwise `.env` in the working directory is
/// used when present. Returns the file that was loaded.
pub fn load_env_file(path: Option<&str>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
            dotenv::from_path(&expanded).map_err(|e| {
                Error::Configuration(format!(
                    "failed to load env file {}: {}",
                    expanded.display(),
                    e
                ))
            })?;
            debug!(path = %expanded.display(), "loaded env file");
            Ok(Some(expanded))
        }
        None => match dotenv::dotenv() {
            Ok(path) => {
                debug!(path = %path.display(), "loaded env file");
                Ok(Some(path))
            }
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(Error::Configuration(format!("failed to load .env: {}", e))),
        },
    }
}
