//! Daily and cumulative returns on the adjusted close.

use crate::domain::PriceBar;

/// Daily and cumulative return series, index-aligned with the input.
#[derive(Debug, Clone)]
pub struct Returns {
    pub daily: Vec<f64>,
    pub cumulative: Vec<f64>,
}

/// `daily[i] = adj[i] / adj[i-1] - 1` (NaN at index 0);
/// `cumulative[i]` is the running product of `1 + daily`, so with complete
/// data it telescopes to `adj[i] / adj[0]`.
///
/// An undefined daily return leaves its cumulative slot undefined but does
/// not taint the running product — the factor is skipped, matching the
/// NaN-skipping running product the rest of the pipeline expects.
pub fn returns(bars: &[PriceBar]) -> Returns {
    let n = bars.len();
    let mut daily = vec![f64::NAN; n];
    let mut cumulative = vec![f64::NAN; n];

    let mut acc = 1.0;
    for i in 1..n {
        let prev = bars[i - 1].adj_close;
        let curr = bars[i].adj_close;
        let r = if prev.is_nan() || curr.is_nan() || prev == 0.0 {
            f64::NAN
        } else {
            curr / prev - 1.0
        };
        daily[i] = r;

        if r.is_nan() {
            cumulative[i] = f64::NAN;
        } else {
            acc *= 1.0 + r;
            cumulative[i] = acc;
        }
    }

    Returns { daily, cumulative }
}
