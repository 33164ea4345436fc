use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Reasons a calculation cannot produce a trustworthy result.
///
/// These are recoverable outcomes reported back to the caller, never faults.
/// The `Display` text is the human-readable reason shown next to the calculator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum NeedsReview {
    #[error("No NAV history available")]
    EmptySeries,
    #[error("Invalid date range")]
    InvalidDateRange,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("No NAV data in the date range")]
    NoDataInRange,
    #[error("Insufficient data for calculation")]
    NothingInvested,
    #[error("NAV history does not cover the requested period")]
    InsufficientHistory,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Next scheduled date after `from`.
    ///
    /// Steps chain from the previous date, so a clamp to month end sticks:
    /// a 31 Jan start runs 28 Feb, 28 Mar, 28 Apr.
    pub fn next_step(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => from.checked_add_days(Days::new(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::Yearly => from.checked_add_months(Months::new(12)),
        }
    }

    /// Fixed position count used by the withdrawal plan.
    pub fn day_count(self) -> usize {
        match self {
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Yearly => 365,
        }
    }
}

/// Inclusive calendar window with `start <= end`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, NeedsReview> {
        if start > end {
            return Err(NeedsReview::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, NeedsReview> {
        let start = parse_date(start).ok_or(NeedsReview::InvalidDateRange)?;
        let end = parse_date(end).ok_or(NeedsReview::InvalidDateRange)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Full calendar years elapsed between start and end.
    pub fn whole_years(&self) -> u32 {
        let mut years = self.end.year() - self.start.year();
        if (self.end.month(), self.end.day()) < (self.start.month(), self.start.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

/// Parses `YYYY-MM-DD` (optionally followed by a time part) or the
/// `DD-MM-YYYY` form used by upstream NAV feeds.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day_part, "%d-%m-%Y"))
        .ok()
}

pub(crate) fn check_amount(amount: f64) -> Result<(), NeedsReview> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(NeedsReview::NonPositiveAmount)
    }
}

/// Portfolio value over time, one entry per NAV date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub labels: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl SimulationResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, date: NaiveDate, value: f64) {
        self.labels.push(date);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Labels are strictly ascending, so this is a binary search.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.labels
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipSummary {
    pub series: SimulationResult,
    pub total_invested: f64,
    pub total_units: f64,
    pub current_value: f64,
    pub absolute_return_pct: f64,
    pub annualized_return_pct: Option<f64>,
    pub installments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub series: SimulationResult,
    pub entry_date: NaiveDate,
    pub entry_nav: f64,
    pub units: f64,
    pub invested: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub series: SimulationResult,
    pub initial_units: f64,
    pub final_units: f64,
    pub total_withdrawn: f64,
    pub withdrawals: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParams {
    pub sip_amount: f64,
    pub sip_frequency: Frequency,
    pub lumpsum_amount: f64,
    pub swp_amount: f64,
    pub swp_frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub labels: Vec<NaiveDate>,
    pub sip: Vec<Option<f64>>,
    pub lumpsum: Vec<Option<f64>>,
    pub swp: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReturn {
    pub average_return_pct: f64,
    pub volatility_pct: f64,
    pub observations: usize,
}
