//! Timer-driven session task
//!
//! Runs a [`PlaybackSession`] on a tokio task with a position sampler and a
//! countdown interval. The task is owned by a [`DriverHandle`]: shutting the
//! handle down (or dropping it) cancels both timers.

use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::session::PlaybackSession;
use crate::types::EpisodeInputs;
use skipper_core::config::PlaybackSettings;
use skipper_core::{PlaybackPrimitive, PlaybackSample, SkipSettings};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const COMMAND_CAPACITY: usize = 32;

/// Commands accepted by a running driver
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// User-triggered skip
    SkipNow,
    /// Swap in a new episode
    LoadEpisode(EpisodeInputs),
    /// Apply changed skip settings
    UpdateSettings(SkipSettings),
    /// New video load
    Reset,
}

/// Driver timing
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Position sampling cadence
    pub sample_interval: Duration,
    /// One countdown step
    pub countdown_interval: Duration,
    /// Event broadcast buffer size
    pub event_capacity: usize,
}

impl DriverConfig {
    /// Timing from configuration
    pub fn from_settings(settings: &PlaybackSettings) -> Self {
        Self {
            sample_interval: settings.sample_interval(),
            countdown_interval: settings.countdown_interval(),
            ..Self::default()
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(500),
            countdown_interval: Duration::from_secs(1),
            event_capacity: 64,
        }
    }
}

/// Spawns session tasks
pub struct SessionDriver;

impl SessionDriver {
    /// Start driving `session` on the current tokio runtime
    pub fn spawn<P>(session: PlaybackSession<P>, config: DriverConfig) -> DriverHandle<P>
    where
        P: PlaybackPrimitive + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        let (sample_tx, sample_rx) = watch::channel(session.last_sample());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run(
            session,
            config,
            command_rx,
            event_tx.clone(),
            sample_tx,
            cancel.clone(),
        ));

        DriverHandle {
            commands: command_tx,
            events: event_tx,
            samples: sample_rx,
            cancel,
            task: Some(task),
        }
    }
}

/// Owned handle to a running session task
pub struct DriverHandle<P> {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
    samples: watch::Receiver<PlaybackSample>,
    cancel: CancellationToken,
    task: Option<JoinHandle<PlaybackSession<P>>>,
}

impl<P> DriverHandle<P> {
    /// Send a command to the session
    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlaybackError::ChannelClosed)
    }

    /// User-triggered skip
    pub async fn skip_now(&self) -> Result<()> {
        self.send(SessionCommand::SkipNow).await
    }

    /// Swap in a new episode
    pub async fn load_episode(&self, inputs: EpisodeInputs) -> Result<()> {
        self.send(SessionCommand::LoadEpisode(inputs)).await
    }

    /// Apply changed skip settings
    pub async fn update_settings(&self, settings: SkipSettings) -> Result<()> {
        self.send(SessionCommand::UpdateSettings(settings)).await
    }

    /// New video load
    pub async fn reset(&self) -> Result<()> {
        self.send(SessionCommand::Reset).await
    }

    /// Subscribe to session events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Latest position sample
    pub fn samples(&self) -> watch::Receiver<PlaybackSample> {
        self.samples.clone()
    }

    /// Token cancelled when the session ends
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop both timers and hand the session back
    pub async fn shutdown(mut self) -> Result<PlaybackSession<P>> {
        self.cancel.cancel();
        let task = self
            .task
            .take()
            .ok_or_else(|| PlaybackError::DriverStopped("already shut down".to_string()))?;

        task.await
            .map_err(|e| PlaybackError::DriverStopped(e.to_string()))
    }
}

impl<P> Drop for DriverHandle<P> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<P: PlaybackPrimitive>(
    mut session: PlaybackSession<P>,
    config: DriverConfig,
    mut commands: mpsc::Receiver<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
    samples: watch::Sender<PlaybackSample>,
    cancel: CancellationToken,
) -> PlaybackSession<P> {
    let mut sampler = interval(config.sample_interval);
    sampler.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut countdown = interval(config.countdown_interval);
    countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        sample_interval = ?config.sample_interval,
        countdown_interval = ?config.countdown_interval,
        "Session driver started"
    );

    loop {
        let counting = session.countdown().is_some();

        let produced = tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            command = commands.recv() => match command {
                Some(command) => apply(&mut session, command),
                None => break,
            },

            _ = sampler.tick() => {
                let produced = session.sample();
                samples.send_replace(session.last_sample());
                produced
            }

            _ = countdown.tick(), if counting => session.countdown_tick(),
        };

        if produced
            .iter()
            .any(|event| matches!(event, SessionEvent::CountdownStarted { .. }))
        {
            countdown.reset();
        }

        for event in produced {
            // No subscribers is fine
            let _ = events.send(event);
        }
    }

    info!("Session driver stopped");
    session
}

fn apply<P: PlaybackPrimitive>(
    session: &mut PlaybackSession<P>,
    command: SessionCommand,
) -> Vec<SessionEvent> {
    debug!(?command, "Session command");
    match command {
        SessionCommand::SkipNow => session.skip_now(),
        SessionCommand::LoadEpisode(inputs) => session.load_episode(inputs),
        SessionCommand::UpdateSettings(settings) => session.update_settings(settings),
        SessionCommand::Reset => session.reset(),
    }
}
