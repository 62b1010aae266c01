//! Core narration engine - construction, tick orchestration, events
//!
//! **Responsibilities:**
//! - NarrationEngine struct definition and initialization
//! - The advance step shared by the ticker loop and `advance_tick`
//! - Ticker lifecycle (started on entering Advancing, aborted on leaving)
//! - Event broadcasting to subscribers

use crate::playback::session::{PlaybackSession, TickOutcome};
use crate::playback::ticker::Ticker;
use codewave_common::events::{NarrationEvent, PlaybackSnapshot};
use codewave_common::params::PaceParams;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Narration engine - the transport control surface and event publisher
///
/// Wraps the synchronous `PlaybackSession` state machine behind a lock and
/// owns the periodic ticker that drives it. All mutation happens under the
/// session write lock, in a command method or in the advance step, so
/// commands issued between two ticks are fully applied before the next
/// tick observes state.
pub struct NarrationEngine {
    /// Session state machine
    pub(super) session: Arc<RwLock<PlaybackSession>>,

    /// The one allowed periodic task for this engine
    pub(super) ticker: Arc<Mutex<Ticker>>,

    /// Event broadcaster for UI subscribers
    pub(super) event_tx: broadcast::Sender<NarrationEvent>,
}

impl NarrationEngine {
    /// Create an engine with no article loaded
    ///
    /// Parameters are clamped into their documented ranges before use.
    pub fn new(params: PaceParams) -> Self {
        let params = params.clamped();
        info!(
            "Creating narration engine (base_rate={}, tick_interval={}ms)",
            params.base_rate, params.tick_interval_ms
        );
        let (event_tx, _) = broadcast::channel(256);
        Self {
            session: Arc::new(RwLock::new(PlaybackSession::new(params))),
            ticker: Arc::new(Mutex::new(Ticker::new())),
            event_tx,
        }
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<NarrationEvent> {
        self.event_tx.subscribe()
    }

    /// Current state, for pull-style consumers
    pub async fn snapshot(&self) -> PlaybackSnapshot {
        self.session.read().await.snapshot()
    }

    /// True while the periodic ticker task is live
    pub async fn is_ticking(&self) -> bool {
        self.ticker.lock().await.is_running()
    }

    /// Run one advance step and publish its events
    ///
    /// This is the exact step the built-in ticker executes every period.
    /// It is public so an alternate scheduler (or a test) can drive the
    /// engine without a clock; a tick while paused is inert.
    pub async fn advance_tick(&self) -> PlaybackSnapshot {
        let (_, snapshot) = run_tick(&self.session, &self.event_tx).await;
        snapshot
    }

    pub(super) fn broadcast_event(&self, event: NarrationEvent) {
        broadcast_to(&self.event_tx, event);
    }

    /// Start the ticker loop; absorbed when one is already live
    pub(super) async fn start_ticker(&self) {
        let period = self.session.read().await.params().tick_interval();
        let mut ticker = self.ticker.lock().await;

        let session = Arc::clone(&self.session);
        let event_tx = self.event_tx.clone();
        let started = ticker.start(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval yields immediately once; the first advance should
            // land one full period after play
            interval.tick().await;
            loop {
                interval.tick().await;
                let (outcome, _) = run_tick(&session, &event_tx).await;
                match outcome {
                    TickOutcome::Idle | TickOutcome::Finished => break,
                    TickOutcome::Advanced | TickOutcome::SegmentChanged(_) => {}
                }
            }
            debug!("ticker loop exited");
        });
        if started {
            debug!("ticker started (period={:?})", period);
        }
    }

    /// Abort the ticker loop, if any
    pub(super) async fn stop_ticker(&self) {
        if self.ticker.lock().await.stop() {
            debug!("ticker stopped");
        }
    }
}

/// One advance step: mutate the session, then publish what happened
///
/// Free function so the spawned ticker loop can share it with
/// `advance_tick` without holding a reference to the engine.
async fn run_tick(
    session: &Arc<RwLock<PlaybackSession>>,
    event_tx: &broadcast::Sender<NarrationEvent>,
) -> (TickOutcome, PlaybackSnapshot) {
    let (outcome, snapshot) = {
        let mut session = session.write().await;
        let outcome = session.tick();
        (outcome, session.snapshot())
    };

    match outcome {
        // Inert tick: paused, cleared or empty article. Publish nothing.
        TickOutcome::Idle => return (outcome, snapshot),
        TickOutcome::Advanced => {}
        TickOutcome::SegmentChanged(segment_index) => {
            if let Some(article_id) = snapshot.article_id {
                debug!("Segment {} started", segment_index);
                broadcast_to(
                    event_tx,
                    NarrationEvent::SegmentStarted {
                        article_id,
                        segment_index,
                        timestamp: chrono::Utc::now(),
                    },
                );
            }
        }
        TickOutcome::Finished => {
            broadcast_to(
                event_tx,
                NarrationEvent::PlaybackStateChanged {
                    playing: false,
                    timestamp: chrono::Utc::now(),
                },
            );
            if let Some(article_id) = snapshot.article_id {
                info!("Article narration complete");
                broadcast_to(
                    event_tx,
                    NarrationEvent::ArticleCompleted {
                        article_id,
                        timestamp: chrono::Utc::now(),
                    },
                );
            }
        }
    }

    broadcast_to(
        event_tx,
        NarrationEvent::PlaybackProgress {
            snapshot: snapshot.clone(),
            timestamp: chrono::Utc::now(),
        },
    );

    (outcome, snapshot)
}

fn broadcast_to(event_tx: &broadcast::Sender<NarrationEvent>, event: NarrationEvent) {
    // Ignore send errors (no receivers is OK)
    let _ = event_tx.send(event);
}
