use super::types::RiskReturn;

/// Number of trailing NAV points (about one year of trading days) used for
/// the risk/return statistic.
pub const RISK_RETURN_LOOKBACK: usize = 260;

/// Trailing moving average with a shrinking window at the start.
///
/// Non-finite inputs are skipped; a position whose whole window is non-finite
/// yields `None`. A window of 0 behaves as 1.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// Mean and population standard deviation of simple period returns over the
/// last [`RISK_RETURN_LOOKBACK`] NAVs, both in percent.
pub fn risk_return(navs: &[f64]) -> RiskReturn {
    let tail = &navs[navs.len().saturating_sub(RISK_RETURN_LOOKBACK)..];
    let returns: Vec<f64> = tail
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .filter(|r| r.is_finite())
        .collect();

    if returns.len() < 2 {
        return RiskReturn {
            average_return_pct: 0.0,
            volatility_pct: 0.0,
            observations: returns.len(),
        };
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    RiskReturn {
        average_return_pct: mean * 100.0,
        volatility_pct: variance.sqrt() * 100.0,
        observations: returns.len(),
    }
}
