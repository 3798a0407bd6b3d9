//! Ledger aggregate, the recurring-charge generator, and forecast series.

pub mod forecast;
pub mod generator;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use forecast::{ForecastRow, ForecastSeries, MONTHS_PER_YEAR, MONTH_NAMES};
pub use generator::expand_rules;
pub use ledger::Ledger;
