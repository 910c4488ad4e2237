//! Indicator engine: pure transforms over an ordered price series.
//!
//! Every function returns series index-aligned 1:1 with its input. Entries
//! that cannot be computed yet (not enough history for the window) are
//! `f64::NAN`, never zero — downstream consumers distinguish "not yet
//! computable" from "computed as zero". Inputs are never mutated.
//!
//! All transforms operate on the adjusted close unless stated otherwise
//! (ATR also reads high/low).

pub mod atr;
pub mod bollinger;
pub mod ewm;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;

pub use atr::{atr, true_range};
pub use bollinger::{bollinger_bands, BollingerBands};
pub use ewm::ewm_mean;
pub use macd::{macd, Macd, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
pub use returns::{returns, Returns};
pub use rsi::rsi;
pub use sma::{moving_averages, sma_of_series, MovingAverage};

use thiserror::Error;

/// Errors from indicator computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// A required input column is absent from the series (entirely NaN).
    #[error("data must contain the '{column}' column")]
    MissingColumn { column: &'static str },
}

/// Create synthetic bars from adjusted closes for testing.
///
/// Generates plausible OHLV around the close: open = prev close (or close
/// for the first bar), high/low bracket open and close, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            PriceBar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                adj_close: close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
