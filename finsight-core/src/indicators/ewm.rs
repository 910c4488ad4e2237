//! Exponentially weighted means.
//!
//! alpha = 2 / (span + 1). The recursion seeds from the first observation
//! and carries no minimum-period gating, so the output is defined from
//! index 0 — this is the smoothing MACD is built on.

/// EWM[0] = x[0]; EWM[t] = alpha * x[t] + (1 - alpha) * EWM[t-1].
/// A NaN input taints every entry from that index on.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EWM span must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let mut prev = values[0];
    result[0] = prev;
    if prev.is_nan() {
        return result;
    }

    for i in 1..n {
        if values[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let ewm = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ewm;
        prev = ewm;
    }

    result
}
