//! Watch-history scrobbling for Skipper
//!
//! - [`WatchHistoryClient`]: HTTP client with transparent token refresh
//! - [`ScrobbleSequencer`]: start/pause/stop protocol for one playback session
//! - [`spawn_progress_watcher`]: drives completion reporting from position samples
//!
//! # Example
//!
//! ```ignore
//! use skipper_scrobble::{MediaIdentity, MediaIds, ScrobbleSequencer, WatchHistoryClient};
//!
//! let client = Arc::new(WatchHistoryClient::from_store(&config.scrobble, store, clock).await?);
//! let media = MediaIdentity::Episode {
//!     show_ids: MediaIds::imdb("tt0903747"),
//!     season: 1,
//!     episode: 2,
//! };
//! let sequencer = Arc::new(Mutex::new(ScrobbleSequencer::from_settings(
//!     client,
//!     media,
//!     &config.scrobble,
//! )));
//!
//! sequencer.lock().await.start().await;
//! let watcher =
//!     spawn_progress_watcher(sequencer.clone(), handle.samples(), handle.cancellation_token());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod client;
mod error;
mod sequencer;
mod types;
mod watcher;

pub use api::ScrobbleApi;
pub use client::WatchHistoryClient;
pub use error::{Result, ScrobbleError};
pub use sequencer::{ScrobbleSequencer, SequencerState, DEFAULT_COMPLETION_THRESHOLD};
pub use types::{MediaIdentity, MediaIds, ScrobbleAction, ScrobblePayload, TokenResponse};
pub use watcher::spawn_progress_watcher;
