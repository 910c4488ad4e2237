//! Property tests for indicator invariants.
//!
//! Uses proptest to verify:
//! 1. Cumulative returns telescope to the price ratio on complete data
//! 2. RSI stays inside [0, 100] wherever it is defined
//! 3. Bollinger bands are symmetric and reproduce the rolling sample std
//! 4. A moving average equals the naive trailing mean

use chrono::NaiveDate;
use finsight_core::domain::PriceBar;
use finsight_core::indicators::{
    bollinger_bands, moving_averages, returns, rsi,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 5..60)
}

fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar {
            symbol: "TEST".into(),
            date: base + chrono::Duration::days(i as i64),
            open: c,
            high: c + 1.0,
            low: c - 1.0,
            close: c,
            adj_close: c,
            volume: 1000.0,
        })
        .collect()
}

// ── 1. Cumulative returns telescope ──────────────────────────────────

proptest! {
    /// With no gaps, the running product of (1 + daily) collapses to
    /// adj[i] / adj[0] at every index past the first.
    #[test]
    fn cumulative_return_telescopes(closes in arb_closes()) {
        let bars = bars_from_closes(&closes);
        let r = returns(&bars);

        prop_assert!(r.daily[0].is_nan());
        prop_assert!(r.cumulative[0].is_nan());
        for i in 1..closes.len() {
            let expected = closes[i] / closes[0];
            prop_assert!(
                (r.cumulative[i] - expected).abs() < 1e-9,
                "index {}: {} vs {}", i, r.cumulative[i], expected
            );
        }
    }
}

// ── 2. RSI bounds ────────────────────────────────────────────────────

proptest! {
    /// RSI is always inside [0, 100] where defined, and undefined for the
    /// first `window` entries.
    #[test]
    fn rsi_bounded(closes in arb_closes(), window in 1usize..10) {
        let bars = bars_from_closes(&closes);
        let result = rsi(&bars, window);

        prop_assert_eq!(result.len(), closes.len());
        for (i, &v) in result.iter().enumerate() {
            if i < window.min(closes.len()) {
                prop_assert!(v.is_nan(), "index {} inside lookback is defined", i);
            } else {
                prop_assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at {}: {}", i, v
                );
            }
        }
    }
}

// ── 3. Bollinger geometry ────────────────────────────────────────────

proptest! {
    /// Bands are symmetric around the middle and the half-width equals
    /// num_std times the rolling sample standard deviation.
    #[test]
    fn bollinger_band_geometry(closes in arb_closes(), window in 2usize..8) {
        let bars = bars_from_closes(&closes);
        let bb = bollinger_bands(&bars, window, 2.0);

        for i in (window - 1)..closes.len() {
            let slice = &closes[i + 1 - window..=i];
            let mean: f64 = slice.iter().sum::<f64>() / window as f64;
            let var: f64 = slice.iter().map(|c| (c - mean).powi(2)).sum::<f64>()
                / (window as f64 - 1.0);
            let std = var.sqrt();

            prop_assert!((bb.middle[i] - mean).abs() < 1e-9);
            prop_assert!((bb.upper[i] - (mean + 2.0 * std)).abs() < 1e-9);
            prop_assert!((bb.lower[i] - (mean - 2.0 * std)).abs() < 1e-9);
            // Symmetry
            prop_assert!(
                ((bb.upper[i] - bb.middle[i]) - (bb.middle[i] - bb.lower[i])).abs() < 1e-9
            );
        }
    }
}

// ── 4. Moving average equals the naive mean ──────────────────────────

proptest! {
    /// The rolling implementation matches a recomputed trailing mean.
    #[test]
    fn moving_average_matches_naive_mean(closes in arb_closes(), window in 1usize..10) {
        let bars = bars_from_closes(&closes);
        let mas = moving_averages(&bars, &[window]);
        prop_assert_eq!(mas.len(), 1);
        let ma = &mas[0];

        for i in 0..closes.len() {
            if i + 1 < window {
                prop_assert!(ma.values[i].is_nan());
            } else {
                let naive: f64 =
                    closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                prop_assert!(
                    (ma.values[i] - naive).abs() < 1e-9,
                    "index {}: {} vs {}", i, ma.values[i], naive
                );
            }
        }
    }
}
