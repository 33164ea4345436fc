mod engine;
mod series;
mod stats;
mod types;

pub use engine::{
    compare_strategies, simulate_lumpsum, simulate_sip, simulate_sip_series, simulate_swp,
    sip_schedule,
};
pub use series::{NavPoint, NavSeries, RawNav, RawNavRecord};
pub use stats::{RISK_RETURN_LOOKBACK, moving_average, risk_return};
pub use types::{
    DateRange, Frequency, LumpsumResult, NeedsReview, RiskReturn, SimulationResult, SipSummary,
    StrategyComparison, StrategyParams, SwpResult, parse_date,
};
