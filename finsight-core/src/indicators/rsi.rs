//! Relative Strength Index over simple rolling means.
//!
//! gains = max(delta, 0), losses = max(-delta, 0); average gain/loss are
//! plain rolling means over the window (no Wilder smoothing);
//! rsi = 100 - 100 / (1 + avg_gain / avg_loss).
//! When the average loss is zero the value is pinned to exactly 100.0 —
//! never NaN or infinity. Lookback: window (delta[0] is undefined).

use super::sma::sma_of_series;
use crate::domain::PriceBar;

pub fn rsi(bars: &[PriceBar], window: usize) -> Vec<f64> {
    assert!(window >= 1, "RSI window must be >= 1");
    let n = bars.len();
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];

    for i in 1..n {
        let prev = bars[i - 1].adj_close;
        let curr = bars[i].adj_close;
        if prev.is_nan() || curr.is_nan() {
            continue;
        }
        let delta = curr - prev;
        gains[i] = delta.max(0.0);
        losses[i] = (-delta).max(0.0);
    }

    let avg_gain = sma_of_series(&gains, window);
    let avg_loss = sma_of_series(&losses, window);

    let mut result = vec![f64::NAN; n];
    for i in 0..n {
        let (gain, loss) = (avg_gain[i], avg_loss[i]);
        if gain.is_nan() || loss.is_nan() {
            continue;
        }
        result[i] = if loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + gain / loss)
        };
    }
    result
}
