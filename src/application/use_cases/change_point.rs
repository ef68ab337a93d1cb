use chrono::NaiveDate;

use crate::domain::market::ChangePointEstimate;

pub const PLACEHOLDER_NOTE: &str = "Change point detected during COVID-19 oil market shock";

/// Serves the change-point estimate for the price series.
///
/// The estimate is fixed; nothing is read from the price data yet.
// TODO: replace the fixed estimate with a Bayesian change-point fit over the price feed.
#[derive(Debug, Default)]
pub struct ChangePointUseCase;

impl ChangePointUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self) -> ChangePointEstimate {
        ChangePointEstimate {
            tau_date: placeholder_tau_date(),
            note: PLACEHOLDER_NOTE.to_string(),
        }
    }
}

fn placeholder_tau_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, 1).expect("2020-04-01 is a valid calendar date")
}
