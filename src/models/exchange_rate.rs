use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::Refreshed;

/// Point-in-time exchange rate between two physical or digital currencies.
///
/// Bid and ask are `None` when Alpha Vantage reports `-` for the pair.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ExchangeRate {
    from_code: String,
    from_name: String,
    to_code: String,
    to_name: String,
    rate: Decimal,
    last_refreshed: Refreshed,
    time_zone: String,
    bid_price: Option<Decimal>,
    ask_price: Option<Decimal>,
}
