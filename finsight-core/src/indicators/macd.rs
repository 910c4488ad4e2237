//! MACD — difference of two exponentially weighted means plus a smoothed
//! signal line.

use super::ewm::ewm_mean;
use crate::domain::PriceBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// MACD line and its signal line, index-aligned with the input.
#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

/// `macd = EWM(adj, fast) - EWM(adj, slow)`;
/// `signal = EWM(macd, signal_span)`.
/// Defined from index 0 — the EWMs seed from the first observation.
pub fn macd(bars: &[PriceBar], fast: usize, slow: usize, signal_span: usize) -> Macd {
    let adj: Vec<f64> = bars.iter().map(|b| b.adj_close).collect();
    let ema_fast = ewm_mean(&adj, fast);
    let ema_slow = ewm_mean(&adj, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ewm_mean(&line, signal_span);
    Macd { macd: line, signal }
}
