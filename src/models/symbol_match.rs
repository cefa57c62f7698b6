use chrono::{FixedOffset, NaiveTime};
use derive_getters::Getters;
use derive_new::new;

#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct SymbolMatch {
    symbol: String,
    name: String,
    asset_type: String,
    region: String,
    market_open: NaiveTime,
    market_close: NaiveTime,
    utc_offset: FixedOffset,
    currency: String,
    match_score: f32,
}
