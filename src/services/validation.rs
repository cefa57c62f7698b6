use chrono::NaiveDate;
use tracing::debug;

use crate::{
    api::ReferenceLists,
    app::typing::parse_date,
    config::Config,
    error::{Error, Result},
    models::{DateWindow, Interval, OutputFormat},
};

pub fn require_api_key(config: &Config) -> Result<()> {
    if config.has_api_key() {
        Ok(())
    } else {
        Err(Error::MissingApiKey)
    }
}

/// Returns `value` trimmed, failing when nothing is left.
pub fn require_value<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("no {} provided", what)));
    }
    Ok(value)
}

pub fn require_distinct(from: &str, to: &str) -> Result<()> {
    if from == to {
        return Err(Error::Validation(format!(
            "from and to currencies must be different (both are {})",
            from
        )));
    }
    Ok(())
}

/// A code is accepted when it is a physical currency or a cryptocurrency.
pub async fn require_known_code<R: ReferenceLists>(
    lists: &R,
    role: &str,
    code: &str,
) -> Result<()> {
    if lists.currency_exists(code).await? || lists.crypto_exists(code).await? {
        debug!(role, code, "currency code accepted");
        return Ok(());
    }
    Err(Error::Validation(format!(
        "{} currency '{}' is neither a known currency nor a known cryptocurrency",
        role, code
    )))
}

pub fn parse_format(value: &str) -> Result<OutputFormat> {
    value.trim().parse()
}

pub fn parse_interval(value: &str) -> Result<Interval> {
    value.trim().parse()
}

/// Checks the optional `begin`/`end` bounds and builds the inclusive window.
///
/// `begin` may not lie after `today`, and never after `end`.
pub fn parse_window(begin: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<DateWindow> {
    let begin = begin
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_date("begin", value))
        .transpose()?;
    if let Some(begin) = begin {
        if begin > today {
            return Err(Error::Validation(format!(
                "begin date {} is in the future",
                begin
            )));
        }
    }

    let end = end
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_date("end", value))
        .transpose()?;

    let window = DateWindow::new(begin, end, today);
    if window.begin() > window.end() {
        return Err(Error::Validation(format!(
            "begin date {} is after end date {}",
            window.begin(),
            window.end()
        )));
    }
    Ok(window)
}
