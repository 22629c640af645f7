//! Skip resolution and playback session driving
//!
//! This crate decides, for any moment of playback, which skip marker is active
//! and drives the auto-skip countdown:
//! - [`resolve`]: pure priority resolution over one snapshot
//! - [`AutoSkipCountdown`]: the 3-tick countdown state machine
//! - [`PlaybackSession`]: owns both for one player and emits [`SessionEvent`]s
//! - [`SessionDriver`]: runs a session on sampling and countdown timers
//!
//! # Example
//!
//! ```ignore
//! use skipper_playback::{DriverConfig, PlaybackSession, SessionDriver};
//!
//! let prepared = prepare_episode(&store, &aggregator, Some(&key), uri).await;
//! let session = PlaybackSession::from_prepared(player, prepared);
//! let handle = SessionDriver::spawn(session, DriverConfig::default());
//!
//! let mut events = handle.subscribe();
//! while let Ok(event) = events.recv().await {
//!     render(event);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod countdown;
mod driver;
mod episode;
mod error;
mod events;
mod resolver;
mod session;
mod types;

pub use countdown::{AutoSkipCountdown, CountdownState, Observation, Tick, COUNTDOWN_START};
pub use driver::{DriverConfig, DriverHandle, SessionCommand, SessionDriver};
pub use episode::{persist_position, prepare_episode};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use resolver::{
    community_window_contains, resolve, CREDITS_LEAD_SECONDS, CREDITS_TAIL_GUARD_SECONDS,
};
pub use session::PlaybackSession;
pub use types::{EpisodeInputs, PreparedEpisode, ResolutionSnapshot, SourceToggles};
