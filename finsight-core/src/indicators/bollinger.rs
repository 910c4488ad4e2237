//! Bollinger Bands — SMA(window) ± num_std · rolling sample stddev.
//!
//! Sample standard deviation (divide by n - 1). Lookback: window - 1.
//! A window of 1 has no sample variance, so the upper/lower bands are NaN
//! while the middle band still tracks the price.

use crate::domain::PriceBar;

/// Upper, middle, and lower band series, index-aligned with the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger_bands(bars: &[PriceBar], window: usize, num_std: f64) -> BollingerBands {
    assert!(window >= 1, "Bollinger window must be >= 1");
    let n = bars.len();
    let mut upper = vec![f64::NAN; n];
    let mut middle = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    if n >= window {
        for i in (window - 1)..n {
            let slice = &bars[i + 1 - window..=i];

            let mut sum = 0.0;
            let mut has_nan = false;
            for bar in slice {
                if bar.adj_close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.adj_close;
            }
            if has_nan {
                continue;
            }

            let mean = sum / window as f64;
            middle[i] = mean;

            if window >= 2 {
                let sum_sq: f64 = slice
                    .iter()
                    .map(|bar| {
                        let diff = bar.adj_close - mean;
                        diff * diff
                    })
                    .sum();
                let stddev = (sum_sq / (window as f64 - 1.0)).sqrt();
                upper[i] = mean + num_std * stddev;
                lower[i] = mean - num_std * stddev;
            }
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn middle_band_is_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let bb = bollinger_bands(&bars, 3, 2.0);

        assert!(bb.middle[0].is_nan());
        assert!(bb.middle[1].is_nan());
        assert_approx(bb.middle[2], 11.0, DEFAULT_EPSILON);
        assert_approx(bb.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn width_is_twice_num_std_times_std() {
        // Window [10,11,12]: sample variance = (1+0+1)/2 = 1, std = 1
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let bb = bollinger_bands(&bars, 3, 2.0);
        assert_approx(bb.upper[2] - bb.lower[2], 2.0 * 2.0 * 1.0, DEFAULT_EPSILON);
        assert_approx(bb.upper[2], 13.0, DEFAULT_EPSILON);
        assert_approx(bb.lower[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_symmetric_around_middle() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let bb = bollinger_bands(&bars, 3, 2.0);
        for i in 2..5 {
            let half_width = bb.upper[i] - bb.middle[i];
            assert_approx(bb.middle[i] - bb.lower[i], half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_price_collapses_bands() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let bb = bollinger_bands(&bars, 3, 2.0);
        assert_approx(bb.upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(bb.lower[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_1_has_no_sample_variance() {
        let bars = make_bars(&[10.0, 11.0]);
        let bb = bollinger_bands(&bars, 1, 2.0);
        assert_approx(bb.middle[0], 10.0, DEFAULT_EPSILON);
        assert!(bb.upper[0].is_nan());
        assert!(bb.lower[0].is_nan());
    }

    #[test]
    fn nan_propagation() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[2].adj_close = f64::NAN;
        let bb = bollinger_bands(&bars, 3, 2.0);
        assert!(bb.upper[2].is_nan());
        assert!(bb.middle[3].is_nan()); // window still includes bar 2
    }
}
