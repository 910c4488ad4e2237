//! Data layer: remote fetch boundary, Parquet-backed series store, and the
//! cache-resolution coordinator.

pub mod coordinator;
pub mod provider;
pub mod store;
pub mod tiingo;

pub use coordinator::{CacheCoordinator, ResolvedSeries, RetentionPolicy, SeriesRequest};
pub use provider::{FetchError, Frequency, PriceProvider, SeriesSource};
pub use store::{BarStore, SaveMode, StoreError};
pub use tiingo::{TiingoConfig, TiingoProvider};
