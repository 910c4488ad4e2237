//! finsight CLI — fetch equity price series, cache them locally, and print
//! a per-ticker indicator summary.
//!
//! Tickers are processed sequentially and in isolation: a symbol with no
//! data (bad ticker, rate limit, network down) prints a notice and the loop
//! moves on. Only startup validation failures exit non-zero.

mod report;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use finsight_core::data::{
    BarStore, CacheCoordinator, Frequency, RetentionPolicy, SeriesRequest, TiingoConfig,
    TiingoProvider,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "finsight",
    about = "Fetch, cache, and summarize equity price series from Tiingo"
)]
struct Cli {
    /// Ticker symbols to process (e.g., AAPL MSFT SPY).
    #[arg(short = 't', long = "tickers", required = true, num_args = 1..)]
    tickers: Vec<String>,

    /// Start date (YYYY-MM-DD).
    #[arg(short = 's', long = "start-date")]
    start_date: String,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(short = 'e', long = "end-date")]
    end_date: Option<String>,

    /// Bar frequency: daily, weekly, or monthly.
    #[arg(short = 'f', long = "freq", default_value = "daily")]
    freq: String,

    /// Skip the indicator summary; fetch and cache only.
    #[arg(long, default_value_t = false)]
    no_report: bool,

    /// Cache retention in days. 0 disables pruning and the cache read path.
    #[arg(long, default_value_t = 30)]
    cache_days: u32,

    /// Cache directory. Defaults to ./data.
    #[arg(long, default_value = "data")]
    cache_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = NaiveDate::parse_from_str(&cli.start_date, "%Y-%m-%d")
        .with_context(|| format!("invalid start date '{}'", cli.start_date))?;
    let end = match &cli.end_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid end date '{s}'"))?,
        None => chrono::Local::now().date_naive(),
    };
    if start > end {
        bail!("start date {start} is after end date {end}");
    }

    let frequency: Frequency = match cli.freq.parse() {
        Ok(f) => f,
        Err(msg) => bail!("{msg}"),
    };

    let token = std::env::var("TIINGO_API_TOKEN")
        .context("TIINGO_API_TOKEN environment variable is not set")?;
    if token.trim().is_empty() {
        bail!("TIINGO_API_TOKEN environment variable is empty");
    }

    let store = BarStore::new(&cli.cache_dir);
    let provider = TiingoProvider::new(TiingoConfig::new(token));
    let coordinator = CacheCoordinator::new(&store, &provider);
    let retention = RetentionPolicy::new(cli.cache_days);

    for ticker in &cli.tickers {
        let symbol = ticker.to_uppercase();
        let request = SeriesRequest {
            symbol: symbol.clone(),
            start,
            end,
            frequency,
            retention,
        };

        let resolved = coordinator.resolve(&request);
        if resolved.is_empty() {
            println!("No data available for {symbol}");
            continue;
        }

        if !cli.no_report {
            if let Err(e) = report::print_summary(&symbol, &resolved) {
                eprintln!("Skipping report for {symbol}: {e}");
            }
        }
    }

    Ok(())
}
