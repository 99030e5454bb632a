//! # Recompute Scheduler
//!
//! Coalesces bursts of setting edits into one layout computation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Recompute Scheduler                                 │
//! │                                                                         │
//! │  stdin edits ──┐                                                        │
//! │                │ SettingsChanged                                        │
//! │  new image ────┼────────────────▶ ┌─────────────────┐                   │
//! │                │                  │    Scheduler    │                   │
//! │  flush ────────┘                  │                 │                   │
//! │                                   │  deadline =     │                   │
//! │                                   │  now + debounce │                   │
//! │                                   └────────┬────────┘                   │
//! │                                            │ deadline passed            │
//! │                                            ▼                            │
//! │                              SessionState::snapshot()                   │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                              poster_core::compute_poster               │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                              LayoutUpdate { generation, .. }            │
//! │                                                                         │
//! │  Every change pushes the deadline back; only the latest snapshot is    │
//! │  ever computed. Consumers drop updates whose generation is stale.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use poster_core::{compute_poster, CoreResult, PosterLayout};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};
use crate::state::SessionState;

/// Capacity of the command and update channels.
const CHANNEL_CAPACITY: usize = 64;

/// A layout computed for one session generation.
#[derive(Debug)]
pub struct LayoutUpdate {
    pub generation: u64,

    /// The image the layout was computed for.
    pub image: Arc<RgbaImage>,

    pub layout: CoreResult<PosterLayout>,
}

/// Commands for the scheduler.
#[derive(Debug)]
enum SchedulerCommand {
    SettingsChanged,
    ImageChanged,
    /// Recompute now, skipping the quiet period.
    Flush,
    Shutdown,
}

/// Handle for controlling the scheduler.
#[derive(Clone)]
pub struct SchedulerHandle {
    cmd_tx: mpsc::Sender<SchedulerCommand>,
}

impl SchedulerHandle {
    async fn send(&self, cmd: SchedulerCommand) -> CliResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| CliError::channel_closed("Scheduler"))
    }

    pub async fn settings_changed(&self) -> CliResult<()> {
        self.send(SchedulerCommand::SettingsChanged).await
    }

    pub async fn image_changed(&self) -> CliResult<()> {
        self.send(SchedulerCommand::ImageChanged).await
    }

    pub async fn flush(&self) -> CliResult<()> {
        self.send(SchedulerCommand::Flush).await
    }

    /// Stops the scheduler after computing any pending change.
    pub async fn shutdown(&self) -> CliResult<()> {
        self.send(SchedulerCommand::Shutdown).await
    }
}

/// Debounced layout recomputation for a [`SessionState`].
pub struct RecomputeScheduler {
    session: SessionState,
    debounce: Duration,
    update_tx: mpsc::Sender<LayoutUpdate>,
}

impl RecomputeScheduler {
    /// Creates a scheduler and the receiver its updates are published on.
    pub fn new(session: SessionState, debounce: Duration) -> (Self, mpsc::Receiver<LayoutUpdate>) {
        let (update_tx, update_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let scheduler = RecomputeScheduler {
            session,
            debounce,
            update_tx,
        };
        (scheduler, update_rx)
    }

    /// Starts the scheduler and returns a handle.
    pub fn start(self) -> SchedulerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        SchedulerHandle { cmd_tx }
    }

    /// Main scheduler loop.
    async fn run(self, mut cmd_rx: mpsc::Receiver<SchedulerCommand>) {
        info!(debounce_ms = self.debounce.as_millis() as u64, "Recompute scheduler started");

        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(SchedulerCommand::SettingsChanged | SchedulerCommand::ImageChanged) => {
                            deadline = Some(Instant::now() + self.debounce);
                        }
                        Some(SchedulerCommand::Flush) => {
                            deadline = None;
                            self.recompute().await;
                        }
                        Some(SchedulerCommand::Shutdown) | None => {
                            info!("Recompute scheduler shutting down");
                            if deadline.take().is_some() {
                                self.recompute().await;
                            }
                            break;
                        }
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.recompute().await;
                }
            }
        }
    }

    /// Computes the layout for the latest session snapshot.
    async fn recompute(&self) {
        let session = self.session.snapshot();
        let (Some(image), Some(descriptor)) = (session.image.clone(), session.image_descriptor())
        else {
            debug!(generation = session.generation, "No image loaded, nothing to compute");
            return;
        };

        let layout = compute_poster(&session.settings, self.session.page(), descriptor);
        debug!(
            generation = session.generation,
            ok = layout.is_ok(),
            "Layout recomputed"
        );

        let update = LayoutUpdate {
            generation: session.generation,
            image,
            layout,
        };
        if self.update_tx.send(update).await.is_err() {
            warn!("Layout update receiver dropped");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use poster_core::{LayoutSettings, PageGeometry};
    use tokio::time::{sleep, timeout};

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn session_with_image() -> SessionState {
        let session = SessionState::new(LayoutSettings::default(), PageGeometry::A4);
        session.set_image(Arc::new(RgbaImage::new(300, 200)));
        session
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesced_into_one_update() {
        let session = session_with_image();
        let (scheduler, mut updates) = RecomputeScheduler::new(session.clone(), DEBOUNCE);
        let handle = scheduler.start();

        for cols in [4, 5, 6] {
            session.try_update_settings(|s| s.grid_cols = cols).unwrap();
            handle.settings_changed().await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }

        let update = updates.recv().await.unwrap();
        assert_eq!(update.generation, 4);
        assert_eq!(update.layout.unwrap().tiles.len(), 12);

        assert!(timeout(Duration::from_secs(5), updates.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_skips_quiet_period() {
        let session = session_with_image();
        let (scheduler, mut updates) = RecomputeScheduler::new(session, DEBOUNCE);
        let handle = scheduler.start();

        let start = Instant::now();
        handle.settings_changed().await.unwrap();
        handle.flush().await.unwrap();

        let update = updates.recv().await.unwrap();
        assert!(start.elapsed() < DEBOUNCE);
        assert_eq!(update.generation, 1);

        // The flush consumed the pending deadline
        assert!(timeout(Duration::from_secs(5), updates.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_image_no_update() {
        let session = SessionState::new(LayoutSettings::default(), PageGeometry::A4);
        let (scheduler, mut updates) = RecomputeScheduler::new(session, DEBOUNCE);
        let handle = scheduler.start();

        handle.settings_changed().await.unwrap();
        assert!(timeout(Duration::from_secs(5), updates.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_changes_each_recomputed() {
        let session = session_with_image();
        let (scheduler, mut updates) = RecomputeScheduler::new(session.clone(), DEBOUNCE);
        let handle = scheduler.start();

        handle.image_changed().await.unwrap();
        let first = updates.recv().await.unwrap();

        session.try_update_settings(|s| s.grid_rows = 3).unwrap();
        handle.settings_changed().await.unwrap();
        let second = updates.recv().await.unwrap();

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(second.layout.unwrap().tiles.len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_computes_pending_then_closes() {
        let session = session_with_image();
        let (scheduler, mut updates) = RecomputeScheduler::new(session, DEBOUNCE);
        let handle = scheduler.start();

        handle.settings_changed().await.unwrap();
        handle.shutdown().await.unwrap();

        assert!(updates.recv().await.is_some());
        assert!(updates.recv().await.is_none());

        let err = handle.flush().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ChannelClosed);
    }
}
