//! Skipper Markers
//!
//! Community skip-marker providers and the aggregator that merges them.
//!
//! # Features
//!
//! - **Adapter**: normalizes provider JSON (`intro`/`outro` windows) into `SkipMarker`s
//! - **Providers**: one `MarkerProvider` implementation per community service
//! - **Aggregation**: concurrent fetch, ordered merge with start-time deduplication
//! - **Cache**: per-episode entries with a hard 24h lifetime
//!
//! # Example
//!
//! ```ignore
//! use skipper_core::{SkipperConfig, SystemClock};
//! use skipper_markers::MarkerAggregator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SkipperConfig::load()?;
//!     let aggregator = MarkerAggregator::from_config(&config, Arc::new(SystemClock))?;
//!
//!     let markers = aggregator.get_markers_for_episode("tt0903747", 1, 2).await;
//!     for marker in &markers {
//!         println!("{marker}");
//!     }
//!
//!     Ok(())
//! }
//! ```

mod adapter;
mod aggregator;
mod cache;
mod error;
mod provider;
mod providers;

pub use adapter::markers_from_response;
pub use aggregator::{merge_markers, MarkerAggregator, DEDUP_TOLERANCE_SECS};
pub use cache::{CacheEntry, MarkerCache};
pub use error::{ProviderError, Result};
pub use provider::MarkerProvider;
pub use providers::{build_http_client, IntroDbProvider, SkipButtonProvider};
