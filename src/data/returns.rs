use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::core::{NavSeries, NeedsReview};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ReturnPeriod {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 6] = [
        ReturnPeriod::OneMonth,
        ReturnPeriod::ThreeMonths,
        ReturnPeriod::SixMonths,
        ReturnPeriod::OneYear,
        ReturnPeriod::ThreeYears,
        ReturnPeriod::FiveYears,
    ];

    pub fn months(self) -> u32 {
        match self {
            ReturnPeriod::OneMonth => 1,
            ReturnPeriod::ThreeMonths => 3,
            ReturnPeriod::SixMonths => 6,
            ReturnPeriod::OneYear => 12,
            ReturnPeriod::ThreeYears => 36,
            ReturnPeriod::FiveYears => 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnPeriod::OneMonth => "1m",
            ReturnPeriod::ThreeMonths => "3m",
            ReturnPeriod::SixMonths => "6m",
            ReturnPeriod::OneYear => "1y",
            ReturnPeriod::ThreeYears => "3y",
            ReturnPeriod::FiveYears => "5y",
        }
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReturnPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| format!("unknown period {s:?}; expected one of 1m, 3m, 6m, 1y, 3y, 5y"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub period: ReturnPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_nav: f64,
    pub end_nav: f64,
    pub simple_return_pct: f64,
    pub annualized_return_pct: Option<f64>,
}

/// Return from the NAV in force at `latest - period` to the latest NAV.
///
/// The start point is the last published NAV on or before the target date,
/// so weekends and holidays resolve to the preceding trading day. Periods
/// shorter than a year carry no annualized figure.
pub fn trailing_return(
    series: &NavSeries,
    period: ReturnPeriod,
) -> Result<PeriodReturn, NeedsReview> {
    let end = *series.latest().ok_or(NeedsReview::EmptySeries)?;
    let target = end
        .date
        .checked_sub_months(Months::new(period.months()))
        .ok_or(NeedsReview::InsufficientHistory)?;
    let start = *series
        .last_on_or_before(target)
        .ok_or(NeedsReview::InsufficientHistory)?;

    let days = (end.date - start.date).num_days();
    if days <= 0 {
        return Err(NeedsReview::InsufficientHistory);
    }

    let growth = end.nav / start.nav;
    let annualized = (period.months() >= 12)
        .then(|| (growth.powf(365.0 / days as f64) - 1.0) * 100.0)
        .filter(|v| v.is_finite());

    Ok(PeriodReturn {
        period,
        start_date: start.date,
        end_date: end.date,
        start_nav: start.nav,
        end_nav: end.nav,
        simple_return_pct: (growth - 1.0) * 100.0,
        annualized_return_pct: annualized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NavPoint;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn series_of(points: &[(NaiveDate, f64)]) -> NavSeries {
        points
            .iter()
            .map(|&(date, nav)| NavPoint { date, nav })
            .collect()
    }

    #[test]
    fn period_parses_known_labels_only() {
        assert_eq!("1Y".parse::<ReturnPeriod>(), Ok(ReturnPeriod::OneYear));
        assert_eq!("6m".parse::<ReturnPeriod>(), Ok(ReturnPeriod::SixMonths));
        assert!("2w".parse::<ReturnPeriod>().is_err());
    }

    #[test]
    fn one_month_return_uses_preceding_trading_day() {
        let series = series_of(&[
            (date(2023, 1, 27), 100.0),
            (date(2023, 1, 30), 101.0),
            (date(2023, 3, 1), 110.0),
        ]);
        // target 2023-02-01 has no NAV; 2023-01-30 is the last one before it
        let result = trailing_return(&series, ReturnPeriod::OneMonth).expect("covered");
        assert_eq!(result.start_date, date(2023, 1, 30));
        assert_eq!(result.end_date, date(2023, 3, 1));
        assert_approx(result.simple_return_pct, (110.0 / 101.0 - 1.0) * 100.0);
        assert_eq!(result.annualized_return_pct, None);
    }

    #[test]
    fn one_year_return_is_annualized() {
        let series = series_of(&[(date(2022, 3, 1), 100.0), (date(2023, 3, 1), 112.0)]);
        let result = trailing_return(&series, ReturnPeriod::OneYear).expect("covered");
        assert_approx(result.simple_return_pct, 12.0);
        assert_approx(result.annualized_return_pct.expect("finite"), 12.0);
    }

    #[test]
    fn three_year_return_compounds_down() {
        let series = series_of(&[(date(2020, 3, 1), 100.0), (date(2023, 3, 1), 133.1)]);
        let result = trailing_return(&series, ReturnPeriod::ThreeYears).expect("covered");
        let days = (date(2023, 3, 1) - date(2020, 3, 1)).num_days() as f64;
        let expected = (1.331_f64.powf(365.0 / days) - 1.0) * 100.0;
        assert_approx(result.annualized_return_pct.expect("finite"), expected);
    }

    #[test]
    fn short_history_needs_review() {
        let series = series_of(&[(date(2023, 2, 15), 100.0), (date(2023, 3, 1), 101.0)]);
        assert_eq!(
            trailing_return(&series, ReturnPeriod::OneMonth),
            Err(NeedsReview::InsufficientHistory)
        );
        assert_eq!(
            trailing_return(&NavSeries::default(), ReturnPeriod::OneMonth),
            Err(NeedsReview::EmptySeries)
        );
    }
}
