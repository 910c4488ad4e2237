//! Plain-text per-ticker indicator summary.

use finsight_core::data::{ResolvedSeries, SeriesSource};
use finsight_core::indicators::{
    atr, bollinger_bands, macd, moving_averages, returns, rsi, IndicatorError, DEFAULT_FAST,
    DEFAULT_SIGNAL, DEFAULT_SLOW,
};

const MA_WINDOWS: [usize; 2] = [50, 200];
const BOLLINGER_WINDOW: usize = 20;
const BOLLINGER_NUM_STD: f64 = 2.0;
const RSI_WINDOW: usize = 14;
const ATR_WINDOW: usize = 14;
const MONTH_TRADING_DAYS: usize = 21;
const YEAR_TRADING_DAYS: usize = 252;

pub fn print_summary(symbol: &str, resolved: &ResolvedSeries) -> Result<(), IndicatorError> {
    let bars = &resolved.bars;
    let last = bars.len() - 1;

    let r = returns(bars);
    let mas = moving_averages(bars, &MA_WINDOWS);
    let bb = bollinger_bands(bars, BOLLINGER_WINDOW, BOLLINGER_NUM_STD);
    let atr_series = atr(bars, ATR_WINDOW)?;
    let rsi_series = rsi(bars, RSI_WINDOW);
    let m = macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);

    let provenance = match resolved.source {
        SeriesSource::Cache => "cache",
        SeriesSource::Remote => "remote",
    };

    println!();
    println!("=== {symbol} ===");
    println!(
        "Period:         {} to {} ({} bars, from {provenance})",
        bars[0].date,
        bars[last].date,
        bars.len()
    );
    println!("Last Close:     {}", fmt(bars[last].adj_close));
    for ma in &mas {
        println!("MA({:<3}):        {}", ma.window, fmt(ma.values[last]));
    }
    println!(
        "Bollinger:      {} / {} / {}",
        fmt(bb.upper[last]),
        fmt(bb.middle[last]),
        fmt(bb.lower[last])
    );
    println!("ATR({ATR_WINDOW}):        {}", fmt(atr_series[last]));
    println!("RSI({RSI_WINDOW}):        {}", fmt(rsi_series[last]));
    println!(
        "MACD / Signal:  {} / {}",
        fmt(m.macd[last]),
        fmt(m.signal[last])
    );
    println!(
        "1M Return:      {}",
        fmt_pct(trailing_return_sum(&r.daily, MONTH_TRADING_DAYS))
    );
    println!(
        "1Y Return:      {}",
        fmt_pct(trailing_return_sum(&r.daily, YEAR_TRADING_DAYS))
    );
    println!();

    Ok(())
}

/// Sum of the last `days` defined daily returns. NaN when none are defined.
fn trailing_return_sum(daily: &[f64], days: usize) -> f64 {
    let tail_start = daily.len().saturating_sub(days);
    let mut sum = 0.0;
    let mut any = false;
    for &r in &daily[tail_start..] {
        if !r.is_nan() {
            sum += r;
            any = true;
        }
    }
    if any {
        sum
    } else {
        f64::NAN
    }
}

fn fmt(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.2}")
    }
}

fn fmt_pct(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", v * 100.0)
    }
}
