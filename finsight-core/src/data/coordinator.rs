//! Cache-resolution coordinator.
//!
//! Decides whether a request is served from the local store or the remote
//! provider, persists fresh data, and triggers best-effort pruning.
//!
//! The cache hit policy is deliberately coarse: any non-empty in-range load
//! for the symbol counts as a hit, even when the cached rows do not cover
//! the whole requested range. This can serve stale or range-incomplete
//! data; it is preserved intentionally and asserted by tests. Callers that
//! need guaranteed-fresh data set retention to zero, which bypasses the
//! cache read path entirely.

use super::provider::{FetchError, Frequency, PriceProvider, SeriesSource};
use super::store::{BarStore, SaveMode};
use crate::domain::PriceBar;
use chrono::{Duration, NaiveDate};

/// Age threshold for cached rows. `keep_days == 0` disables pruning and
/// with it the cache read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub keep_days: u32,
}

impl RetentionPolicy {
    pub fn new(keep_days: u32) -> Self {
        Self { keep_days }
    }

    pub fn pruning_enabled(self) -> bool {
        self.keep_days > 0
    }

    /// Rows dated before this are swept.
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(i64::from(self.keep_days))
    }
}

/// A single series request.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub frequency: Frequency,
    pub retention: RetentionPolicy,
}

/// Outcome of a resolution: the bars and where they came from.
///
/// An empty `bars` is "no data available" — a normal outcome the caller
/// handles by skipping the symbol, not an error.
#[derive(Debug, Clone)]
pub struct ResolvedSeries {
    pub bars: Vec<PriceBar>,
    pub source: SeriesSource,
}

impl ResolvedSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Coordinates the store and the remote provider for one process.
pub struct CacheCoordinator<'a> {
    store: &'a BarStore,
    provider: &'a dyn PriceProvider,
}

impl<'a> CacheCoordinator<'a> {
    pub fn new(store: &'a BarStore, provider: &'a dyn PriceProvider) -> Self {
        Self { store, provider }
    }

    /// Resolve a request against the store, falling back to the provider.
    ///
    /// Never fails: fetch and store errors are reported on stderr and
    /// degrade to an empty result.
    pub fn resolve(&self, request: &SeriesRequest) -> ResolvedSeries {
        self.resolve_at(request, chrono::Local::now().date_naive())
    }

    /// Same as [`resolve`](Self::resolve), with an explicit `today` for the
    /// retention cutoff.
    pub fn resolve_at(&self, request: &SeriesRequest, today: NaiveDate) -> ResolvedSeries {
        if request.retention.pruning_enabled() && self.store.exists(&request.symbol) {
            match self
                .store
                .load(&request.symbol, Some(request.start), Some(request.end))
            {
                Ok(bars) if !bars.is_empty() => {
                    return ResolvedSeries {
                        bars,
                        source: SeriesSource::Cache,
                    };
                }
                Ok(_) => {}
                Err(e) => {
                    // A broken cache falls through to a fresh fetch.
                    eprintln!("WARNING: cache load failed for {}: {e}", request.symbol);
                }
            }
        }

        let bars = match self.provider.fetch(
            &request.symbol,
            request.start,
            request.end,
            request.frequency,
        ) {
            Ok(bars) => bars,
            Err(e) => {
                report_fetch_failure(&request.symbol, &e);
                Vec::new()
            }
        };

        if !bars.is_empty() {
            if let Err(e) = self.store.save(&request.symbol, &bars, SaveMode::Append) {
                eprintln!("WARNING: failed to cache {}: {e}", request.symbol);
            } else if request.retention.pruning_enabled() {
                let cutoff = request.retention.cutoff(today);
                if let Err(e) = self.store.prune(&request.symbol, cutoff) {
                    // Best-effort maintenance; stale rows get swept next time.
                    eprintln!("WARNING: prune failed for {}: {e}", request.symbol);
                }
            }
        }

        ResolvedSeries {
            bars,
            source: SeriesSource::Remote,
        }
    }
}

/// Translate a fetch failure into a human-readable diagnostic. The
/// coordinator surface never propagates these as errors.
fn report_fetch_failure(symbol: &str, err: &FetchError) {
    match err {
        FetchError::RateLimited { retry_after_secs } => eprintln!(
            "Tiingo API limit reached for {symbol} — retry in {retry_after_secs}s or upgrade your plan"
        ),
        FetchError::InvalidToken(_) => {
            eprintln!("Invalid API token — check your Tiingo credentials")
        }
        _ => eprintln!("Error fetching data for {symbol}: {err}"),
    }
}
