//! Simple moving averages over the adjusted close.
//!
//! Rolling mean over a trailing window. Lookback: window - 1 (first valid
//! value at index window-1).

use crate::domain::PriceBar;

/// One window's trailing-mean series.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    pub window: usize,
    pub values: Vec<f64>,
}

/// Rolling mean of a raw series. The first `window - 1` entries are NaN;
/// a NaN inside the window makes that entry NaN.
pub fn sma_of_series(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "SMA window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window {
        return result;
    }

    // Initial window sum
    let mut sum = 0.0;
    let mut nan_in_window = false;
    for &v in &values[..window] {
        if v.is_nan() {
            nan_in_window = true;
        }
        sum += v;
    }

    if !nan_in_window {
        result[window - 1] = sum / window as f64;
    }

    // Roll the window forward
    for i in window..n {
        let leaving = values[i - window];
        let entering = values[i];
        sum = sum - leaving + entering;

        // The rolling sum is poisoned once any NaN enters or leaves, so
        // rescan the window to recover an exact sum.
        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            nan_in_window = false;
            sum = 0.0;
            for &v in &values[(i + 1 - window)..=i] {
                if v.is_nan() {
                    nan_in_window = true;
                }
                sum += v;
            }
            if nan_in_window {
                result[i] = f64::NAN;
                continue;
            }
        }

        result[i] = sum / window as f64;
    }

    result
}

/// Trailing arithmetic means of the adjusted close, one series per window.
pub fn moving_averages(bars: &[PriceBar], windows: &[usize]) -> Vec<MovingAverage> {
    let adj: Vec<f64> = bars.iter().map(|b| b.adj_close).collect();
    windows
        .iter()
        .map(|&window| MovingAverage {
            window,
            values: sma_of_series(&adj, window),
        })
        .collect()
}
