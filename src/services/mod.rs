pub mod lookup;
pub mod price_tracker_service;
pub mod validation;

pub use lookup::SearchLookup;
pub use price_tracker_service::{
    CurrentRateQuery, HttpPriceTracker, PriceQuery, PriceTrackerService, RateQuery,
};
