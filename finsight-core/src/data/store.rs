//! Parquet-backed time series store.
//!
//! Layout: `{root}/symbol={SYMBOL}/bars.parquet` with a `meta.json`
//! sidecar per symbol (date range, row count, blake3 content hash).
//!
//! - Fixed schema declared once — no column type inference at save time
//! - Atomic writes (write to .tmp, rename into place)
//! - `Append` does not deduplicate by date: overlapping fetch windows
//!   leave duplicate rows in place, preserved for compatibility
//! - Unknown symbols load as an empty series, never an error

use crate::domain::PriceBar;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// On-disk column order. `date` is the natural ordering and filter key.
pub const SCHEMA_COLUMNS: [&str; 7] = [
    "date",
    "open",
    "high",
    "low",
    "close",
    "adj_close",
    "volume",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(String),

    #[error("parquet error: {0}")]
    Parquet(String),

    #[error("schema error: {0}")]
    Schema(String),
}

/// How `save` treats existing rows for the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Add rows after the existing ones. No timestamp collision check:
    /// appending an overlapping window leaves duplicate dates in place.
    Append,
    /// Discard prior content for the symbol first.
    Replace,
}

/// Metadata sidecar for a stored symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub row_count: usize,
    pub data_hash: String,
    pub stored_at: NaiveDateTime,
}

/// Per-symbol Parquet collections under a single root directory.
pub struct BarStore {
    root: PathBuf,
}

impl BarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn symbol_dir(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("symbol={symbol}"))
    }

    fn bars_path(&self, symbol: &str) -> PathBuf {
        self.symbol_dir(symbol).join("bars.parquet")
    }

    fn meta_path(&self, symbol: &str) -> PathBuf {
        self.symbol_dir(symbol).join("meta.json")
    }

    /// True iff a collection for the symbol has been created.
    pub fn exists(&self, symbol: &str) -> bool {
        self.bars_path(symbol).is_file()
    }

    /// Load rows ascending by date, inclusive bounds when given.
    ///
    /// An unknown symbol, or bounds that exclude every row, is `Ok(vec![])`
    /// — "not found" is never an error here.
    pub fn load(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<PriceBar>, StoreError> {
        if !self.exists(symbol) {
            return Ok(Vec::new());
        }

        let mut bars = read_parquet_bars(&self.bars_path(symbol), symbol)?;
        if let Some(start) = start {
            bars.retain(|b| b.date >= start);
        }
        if let Some(end) = end {
            bars.retain(|b| b.date <= end);
        }
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    /// Persist rows for a symbol. An empty `rows` in `Append` mode is a
    /// no-op; in `Replace` mode it clears the collection.
    pub fn save(&self, symbol: &str, rows: &[PriceBar], mode: SaveMode) -> Result<(), StoreError> {
        let mut all = match mode {
            SaveMode::Append => self.load(symbol, None, None)?,
            SaveMode::Replace => Vec::new(),
        };
        all.extend(rows.iter().cloned());

        if all.is_empty() {
            if self.symbol_dir(symbol).exists() {
                fs::remove_dir_all(self.symbol_dir(symbol))
                    .map_err(|e| StoreError::Io(format!("failed to clear {symbol}: {e}")))?;
            }
            return Ok(());
        }

        // Stable sort: duplicate dates from overlapping appends keep their
        // arrival order.
        all.sort_by_key(|b| b.date);
        self.write_all(symbol, &all)
    }

    /// Delete rows dated before `cutoff`. Returns the number removed.
    /// Pruning away every row removes the collection entirely.
    pub fn prune(&self, symbol: &str, cutoff: NaiveDate) -> Result<usize, StoreError> {
        let all = self.load(symbol, None, None)?;
        if all.is_empty() {
            return Ok(0);
        }

        let kept: Vec<PriceBar> = all.iter().filter(|b| b.date >= cutoff).cloned().collect();
        let removed = all.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        if kept.is_empty() {
            fs::remove_dir_all(self.symbol_dir(symbol))
                .map_err(|e| StoreError::Io(format!("failed to remove {symbol}: {e}")))?;
        } else {
            self.write_all(symbol, &kept)?;
        }
        Ok(removed)
    }

    /// Metadata sidecar for a symbol, if present and parseable.
    pub fn meta(&self, symbol: &str) -> Option<StoreMeta> {
        let content = fs::read_to_string(self.meta_path(symbol)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_all(&self, symbol: &str, bars: &[PriceBar]) -> Result<(), StoreError> {
        if bars.is_empty() {
            return Err(StoreError::Schema("no rows to write".into()));
        }

        let dir = self.symbol_dir(symbol);
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Io(format!("failed to create dir: {e}")))?;

        let df = bars_to_dataframe(bars)?;
        let path = self.bars_path(symbol);
        let tmp = path.with_extension("parquet.tmp");

        write_parquet(&df, &tmp)?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::Io(format!("atomic rename failed: {e}"))
        })?;

        let meta = StoreMeta {
            symbol: symbol.to_string(),
            start_date: bars[0].date,
            end_date: bars[bars.len() - 1].date,
            row_count: bars.len(),
            data_hash: blake3::hash(
                &serde_json::to_vec(bars)
                    .map_err(|e| StoreError::Io(format!("hash serialization: {e}")))?,
            )
            .to_hex()
            .to_string(),
            stored_at: chrono::Local::now().naive_local(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| StoreError::Io(format!("meta serialization: {e}")))?;
        fs::write(self.meta_path(symbol), meta_json)
            .map_err(|e| StoreError::Io(format!("meta write: {e}")))?;

        Ok(())
    }
}

// ── Parquet I/O helpers ─────────────────────────────────────────────

fn bars_to_dataframe(bars: &[PriceBar]) -> Result<DataFrame, StoreError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let dates: Vec<i32> = bars
        .iter()
        .map(|b| (b.date - epoch).num_days() as i32)
        .collect();
    let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let adj_closes: Vec<f64> = bars.iter().map(|b| b.adj_close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    DataFrame::new(vec![
        Column::new("date".into(), dates)
            .cast(&DataType::Date)
            .map_err(|e| StoreError::Parquet(format!("date cast: {e}")))?,
        Column::new("open".into(), opens),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("close".into(), closes),
        Column::new("adj_close".into(), adj_closes),
        Column::new("volume".into(), volumes),
    ])
    .map_err(|e| StoreError::Parquet(format!("dataframe creation: {e}")))
}

fn write_parquet(df: &DataFrame, path: &Path) -> Result<(), StoreError> {
    let file =
        fs::File::create(path).map_err(|e| StoreError::Io(format!("create file: {e}")))?;
    ParquetWriter::new(file)
        .finish(&mut df.clone())
        .map_err(|e| StoreError::Parquet(format!("write parquet: {e}")))?;
    Ok(())
}

fn read_parquet_bars(path: &Path, symbol: &str) -> Result<Vec<PriceBar>, StoreError> {
    let file = fs::File::open(path).map_err(|e| StoreError::Io(format!("open: {e}")))?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| StoreError::Parquet(format!("read: {e}")))?;

    for col_name in &SCHEMA_COLUMNS {
        if df.column(col_name).is_err() {
            return Err(StoreError::Schema(format!("missing column '{col_name}'")));
        }
    }

    dataframe_to_bars(&df, symbol)
}

fn dataframe_to_bars(df: &DataFrame, symbol: &str) -> Result<Vec<PriceBar>, StoreError> {
    let map_err = |e: PolarsError| StoreError::Parquet(format!("column read: {e}"));

    let dates = df.column("date").map_err(map_err)?;
    let opens = df.column("open").map_err(map_err)?;
    let highs = df.column("high").map_err(map_err)?;
    let lows = df.column("low").map_err(map_err)?;
    let closes = df.column("close").map_err(map_err)?;
    let adj_closes = df.column("adj_close").map_err(map_err)?;
    let volumes = df.column("volume").map_err(map_err)?;

    let date_ca = dates
        .date()
        .map_err(|e| StoreError::Schema(format!("date column type: {e}")))?;
    let open_ca = opens
        .f64()
        .map_err(|e| StoreError::Schema(format!("open column type: {e}")))?;
    let high_ca = highs
        .f64()
        .map_err(|e| StoreError::Schema(format!("high column type: {e}")))?;
    let low_ca = lows
        .f64()
        .map_err(|e| StoreError::Schema(format!("low column type: {e}")))?;
    let close_ca = closes
        .f64()
        .map_err(|e| StoreError::Schema(format!("close column type: {e}")))?;
    let adj_ca = adj_closes
        .f64()
        .map_err(|e| StoreError::Schema(format!("adj_close column type: {e}")))?;
    let vol_ca = volumes
        .f64()
        .map_err(|e| StoreError::Schema(format!("volume column type: {e}")))?;

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let n = df.height();
    let mut bars = Vec::with_capacity(n);

    for i in 0..n {
        let date_days = date_ca
            .get(i)
            .ok_or_else(|| StoreError::Schema(format!("null date at row {i}")))?;
        let date = epoch + chrono::Duration::days(date_days as i64);

        bars.push(PriceBar {
            symbol: symbol.to_string(),
            date,
            open: open_ca.get(i).unwrap_or(f64::NAN),
            high: high_ca.get(i).unwrap_or(f64::NAN),
            low: low_ca.get(i).unwrap_or(f64::NAN),
            close: close_ca.get(i).unwrap_or(f64::NAN),
            adj_close: adj_ca.get(i).unwrap_or(f64::NAN),
            volume: vol_ca.get(i).unwrap_or(f64::NAN),
        });
    }

    Ok(bars)
}
