//! Average True Range.
//!
//! True range uses the adjusted close as the previous close:
//! tr[0] = high[0] - low[0] (no previous close to gap against);
//! tr[t] = max(high-low, |high-prev_adj|, |low-prev_adj|).
//! ATR is the plain rolling mean of the true range. Lookback: window - 1.

use super::sma::sma_of_series;
use super::IndicatorError;
use crate::domain::PriceBar;

/// True range series. A NaN in any input of an entry makes it NaN.
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = bars[0].high;
    let l = bars[0].low;
    if !h.is_nan() && !l.is_nan() {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let prev = bars[i - 1].adj_close;
        if h.is_nan() || l.is_nan() || prev.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - prev).abs()).max((l - prev).abs());
        }
    }

    tr
}

/// Rolling mean of the true range.
///
/// High/low are optional in some resampled feeds; a column that is
/// entirely NaN is treated as absent and rejected.
pub fn atr(bars: &[PriceBar], window: usize) -> Result<Vec<f64>, IndicatorError> {
    assert!(window >= 1, "ATR window must be >= 1");

    if !bars.is_empty() {
        if bars.iter().all(|b| b.high.is_nan()) {
            return Err(IndicatorError::MissingColumn { column: "high" });
        }
        if bars.iter().all(|b| b.low.is_nan()) {
            return Err(IndicatorError::MissingColumn { column: "low" });
        }
        if bars.iter().all(|b| b.adj_close.is_nan()) {
            return Err(IndicatorError::MissingColumn { column: "adj_close" });
        }
    }

    Ok(sma_of_series(&true_range(bars), window))
}
