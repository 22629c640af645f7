//! Feeds playback samples into a sequencer

use crate::api::ScrobbleApi;
use crate::sequencer::ScrobbleSequencer;
use skipper_core::PlaybackSample;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Forward every new sample to [`ScrobbleSequencer::on_progress`] until
/// `cancel` fires or the sample channel closes.
pub fn spawn_progress_watcher<A>(
    sequencer: Arc<Mutex<ScrobbleSequencer<A>>>,
    mut samples: watch::Receiver<PlaybackSample>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    A: ScrobbleApi + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                changed = samples.changed() => {
                    if changed.is_err() {
                        debug!("Sample channel closed");
                        break;
                    }
                    let sample = *samples.borrow_and_update();
                    sequencer.lock().await.on_progress(sample).await;
                }
            }
        }
        debug!("Progress watcher stopped");
    })
}
