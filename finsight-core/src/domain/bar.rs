//! PriceBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV + adjusted-close record for a single symbol on a single calendar
/// date. No time-of-day, no timezone: the feed's timestamp is collapsed to
/// its date during parsing.
///
/// All price and volume fields are `f64`; a field the feed omits is
/// `f64::NAN`, never zero. Indicator code treats an all-NaN column as
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
}
