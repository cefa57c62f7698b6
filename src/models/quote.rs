use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One data point of a time series.
///
/// FX series carry no volume; adjusted stock series carry an [`Adjustment`].
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Quote {
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Option<u32>,
    adjustment: Option<Adjustment>,
}

#[derive(Clone, Copy, Debug, Eq, Getters, PartialEq, new)]
pub struct Adjustment {
    adjusted_close: Decimal,
    dividend_amount: Decimal,
    split_coefficient: Option<Decimal>,
}

impl Quote {
    /// Price written to the ledger: the adjusted close when the series is adjusted.
    pub fn ledger_price(&self) -> Decimal {
        self.adjustment
            .map(|adjustment| adjustment.adjusted_close)
            .unwrap_or(self.close)
    }
}
