//! Tiingo end-of-day price provider.
//!
//! Fetches daily/weekly/monthly bars from the Tiingo REST API with a
//! blocking client. The API token is an explicit config value passed at
//! construction; nothing here reads the environment. There is no retry or
//! backoff — a failed request is a terminal outcome for that attempt, and
//! the coordinator above this boundary decides how to degrade.

use super::provider::{FetchError, Frequency, PriceProvider};
use crate::domain::PriceBar;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.tiingo.com/tiingo/daily";

/// Connection settings for the Tiingo API.
#[derive(Debug, Clone)]
pub struct TiingoConfig {
    pub api_token: String,
    pub base_url: String,
}

impl TiingoConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// One row of the Tiingo end-of-day response. Fields the feed omits stay
/// `None` and become NaN on the bar.
#[derive(Debug, Deserialize)]
struct EodRow {
    date: String,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    #[serde(rename = "adjClose")]
    adj_close: Option<f64>,
    volume: Option<f64>,
}

/// Tiingo data provider over a blocking HTTP client.
pub struct TiingoProvider {
    client: reqwest::blocking::Client,
    config: TiingoConfig,
}

impl TiingoProvider {
    pub fn new(config: TiingoConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    fn prices_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate, freq: Frequency) -> String {
        format!(
            "{base}/{symbol}/prices?startDate={start}&endDate={end}&resampleFreq={freq}&format=json",
            base = self.config.base_url,
            freq = freq.as_str(),
        )
    }

    /// Convert response rows into bars, ascending by date.
    fn parse_rows(symbol: &str, rows: Vec<EodRow>) -> Result<Vec<PriceBar>, FetchError> {
        let mut bars = Vec::with_capacity(rows.len());

        for row in rows {
            let date = parse_feed_date(&row.date)?;
            bars.push(PriceBar {
                symbol: symbol.to_string(),
                date,
                open: row.open.unwrap_or(f64::NAN),
                high: row.high.unwrap_or(f64::NAN),
                low: row.low.unwrap_or(f64::NAN),
                close: row.close.unwrap_or(f64::NAN),
                adj_close: row.adj_close.unwrap_or(f64::NAN),
                volume: row.volume.unwrap_or(f64::NAN),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

/// Parse a feed timestamp like `2024-01-02T00:00:00.000Z`, keeping only the
/// calendar date. Time-of-day and timezone are discarded.
fn parse_feed_date(raw: &str) -> Result<NaiveDate, FetchError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FetchError::ResponseFormat(format!("unparseable date: {raw}")))
}

impl PriceProvider for TiingoProvider {
    fn name(&self) -> &str {
        "tiingo"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        frequency: Frequency,
    ) -> Result<Vec<PriceBar>, FetchError> {
        let url = self.prices_url(symbol, start, end, frequency);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.config.api_token))
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    FetchError::NetworkUnreachable(e.to_string())
                } else {
                    FetchError::Other(e.to_string())
                }
            })?;

        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::InvalidToken(format!("HTTP {status} from Tiingo")));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(FetchError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Other(format!("HTTP {status} for {symbol}")));
        }

        let rows: Vec<EodRow> = resp.json().map_err(|e| {
            FetchError::ResponseFormat(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_rows(symbol, rows)
    }
}
