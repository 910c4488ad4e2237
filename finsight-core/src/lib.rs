//! Finsight Core — price series retrieval, caching, and indicator engine.
//!
//! This crate contains everything below the CLI surface:
//! - Domain types (price bars)
//! - Data layer: the Tiingo fetch boundary, a Parquet-backed per-symbol
//!   store, and the cache-resolution coordinator with its coarse-hit policy
//! - Indicator engine: returns, moving averages, RSI, MACD, Bollinger
//!   Bands, ATR — pure transforms with NaN-propagating undefined entries

pub mod data;
pub mod domain;
pub mod indicators;
