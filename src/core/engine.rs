use std::collections::HashSet;

use chrono::NaiveDate;

use super::series::NavSeries;
use super::types::{
    DateRange, Frequency, LumpsumResult, NeedsReview, SimulationResult, SipSummary,
    StrategyComparison, StrategyParams, SwpResult, check_amount,
};

const MIN_ANNUALIZATION_YEARS: f64 = 0.0001;
const SWP_SEED_MONTHS: f64 = 12.0;

struct SipRun {
    series: SimulationResult,
    units: f64,
    invested: f64,
    installments: usize,
}

/// Installment dates from the range start, each one interval after the last.
pub fn sip_schedule(frequency: Frequency, range: &DateRange) -> Vec<NaiveDate> {
    std::iter::successors(Some(range.start()), |date| frequency.next_step(*date))
        .take_while(|date| *date <= range.end())
        .collect()
}

pub fn simulate_sip(
    series: &NavSeries,
    amount: f64,
    frequency: Frequency,
    range: &DateRange,
) -> Result<SipSummary, NeedsReview> {
    let run = run_sip(series, amount, frequency, range)?;
    if run.invested <= 0.0 {
        return Err(NeedsReview::NothingInvested);
    }
    let current_value = run.series.last_value().ok_or(NeedsReview::NoDataInRange)?;

    let absolute_return_pct = (current_value - run.invested) / run.invested * 100.0;
    let years = f64::from(range.whole_years()).max(MIN_ANNUALIZATION_YEARS);
    let annualized = ((current_value / run.invested).powf(1.0 / years) - 1.0) * 100.0;

    Ok(SipSummary {
        total_invested: run.invested,
        total_units: run.units,
        current_value,
        absolute_return_pct,
        annualized_return_pct: annualized.is_finite().then_some(annualized),
        installments: run.installments,
        series: run.series,
    })
}

/// Daily valuation curve of a SIP without the summary checks. A window in
/// which no installment landed yields a flat zero curve.
pub fn simulate_sip_series(
    series: &NavSeries,
    amount: f64,
    frequency: Frequency,
    range: &DateRange,
) -> Result<SimulationResult, NeedsReview> {
    run_sip(series, amount, frequency, range).map(|run| run.series)
}

fn run_sip(
    series: &NavSeries,
    amount: f64,
    frequency: Frequency,
    range: &DateRange,
) -> Result<SipRun, NeedsReview> {
    if series.is_empty() {
        return Err(NeedsReview::EmptySeries);
    }
    check_amount(amount)?;

    let window = series.window(range);
    if window.is_empty() {
        return Err(NeedsReview::NoDataInRange);
    }

    let schedule: HashSet<NaiveDate> = sip_schedule(frequency, range).into_iter().collect();
    let mut run = SipRun {
        series: SimulationResult::with_capacity(window.len()),
        units: 0.0,
        invested: 0.0,
        installments: 0,
    };

    for point in window {
        if schedule.contains(&point.date) {
            let bought = amount / point.nav;
            if bought.is_finite() {
                run.units += bought;
                run.invested += amount;
                run.installments += 1;
            }
        }
        run.series.push(point.date, run.units * point.nav);
    }

    Ok(run)
}

pub fn simulate_lumpsum(
    series: &NavSeries,
    amount: f64,
    range: &DateRange,
) -> Result<LumpsumResult, NeedsReview> {
    if series.is_empty() {
        return Err(NeedsReview::EmptySeries);
    }
    check_amount(amount)?;

    let window = series.window(range);
    let entry = window
        .first()
        .or_else(|| {
            series
                .position_on_or_after(range.start())
                .map(|idx| &series.points()[idx])
        })
        .or_else(|| series.first())
        .copied()
        .ok_or(NeedsReview::EmptySeries)?;

    let units = amount / entry.nav;
    let mut result = SimulationResult::with_capacity(window.len());
    for point in window {
        result.push(point.date, units * point.nav);
    }

    Ok(LumpsumResult {
        series: result,
        entry_date: entry.date,
        entry_nav: entry.nav,
        units,
        invested: amount,
    })
}

/// Withdrawal plan seeded with twelve withdrawals' worth of units.
///
/// Withdrawals fall on every `frequency.day_count()`-th NAV point after the
/// seed point. This counts published NAV points, not calendar days, so a
/// "monthly" plan over trading-day data withdraws roughly every six weeks.
pub fn simulate_swp(
    series: &NavSeries,
    withdrawal: f64,
    frequency: Frequency,
    range: &DateRange,
) -> Result<SwpResult, NeedsReview> {
    if series.is_empty() {
        return Err(NeedsReview::EmptySeries);
    }
    check_amount(withdrawal)?;

    let start_index = series
        .position_on_or_after(range.start())
        .ok_or(NeedsReview::NoDataInRange)?;
    let walk = &series.points()[start_index..];
    let seed = walk[0];
    if seed.date > range.end() {
        return Err(NeedsReview::NoDataInRange);
    }

    let initial_units = withdrawal * SWP_SEED_MONTHS / seed.nav;
    let step = frequency.day_count();
    let mut units = initial_units;
    let mut total_withdrawn = 0.0;
    let mut withdrawals = 0;
    let mut result = SimulationResult::default();

    for (offset, point) in walk
        .iter()
        .take_while(|p| p.date <= range.end())
        .enumerate()
    {
        if offset != 0 && offset % step == 0 {
            let sold = (withdrawal / point.nav).min(units);
            if sold > 0.0 {
                units = (units - sold).max(0.0);
                total_withdrawn += sold * point.nav;
                withdrawals += 1;
            }
        }
        result.push(point.date, units * point.nav);
    }

    Ok(SwpResult {
        series: result,
        initial_units,
        final_units: units,
        total_withdrawn,
        withdrawals,
    })
}

/// SIP, lumpsum and SWP over the same window, keyed on the SIP labels.
pub fn compare_strategies(
    series: &NavSeries,
    params: &StrategyParams,
    range: &DateRange,
) -> Result<StrategyComparison, NeedsReview> {
    let sip = simulate_sip_series(series, params.sip_amount, params.sip_frequency, range)?;
    let lumpsum = simulate_lumpsum(series, params.lumpsum_amount, range)?.series;
    let swp = simulate_swp(series, params.swp_amount, params.swp_frequency, range)?.series;

    let align = |other: &SimulationResult| -> Vec<Option<f64>> {
        sip.labels.iter().map(|date| other.value_on(*date)).collect()
    };
    let lumpsum = align(&lumpsum);
    let swp = align(&swp);

    Ok(StrategyComparison {
        sip: sip.values.iter().copied().map(Some).collect(),
        labels: sip.labels,
        lumpsum,
        swp,
    })
}
