//! Transport control methods for NarrationEngine
//!
//! **Responsibilities:**
//! - Play/pause toggling and ticker start/stop
//! - Segment skips (back/forward)
//! - Speed cycling and code handling mode
//! - Article replacement and teardown
//!
//! Every command is synchronous with respect to the session (it completes
//! under the write lock), idempotent against repeated identical calls, and
//! returns the fresh snapshot after broadcasting its events. None of them
//! can fail: out-of-range requests are absorbed as no-ops.

use super::NarrationEngine;
use codewave_common::events::{CodeMode, NarrationEvent, PlaybackSnapshot};
use codewave_common::model::Article;
use std::sync::Arc;
use tracing::{debug, info};

impl NarrationEngine {
    /// Toggle playback
    ///
    /// Starting on an engine with no article, or an article with zero
    /// segments, is a no-op. Entering Advancing starts the ticker; leaving
    /// it aborts the ticker so no pending tick can fire after the pause.
    pub async fn play_pause(&self) -> PlaybackSnapshot {
        let (changed, snapshot) = {
            let mut session = self.session.write().await;
            let changed = session.play_pause();
            (changed, session.snapshot())
        };

        if !changed {
            debug!("play/pause ignored: nothing to narrate");
            return snapshot;
        }

        if snapshot.playing {
            info!("Playback started");
            self.start_ticker().await;
        } else {
            info!("Playback paused");
            self.stop_ticker().await;
        }

        self.broadcast_event(NarrationEvent::PlaybackStateChanged {
            playing: snapshot.playing,
            timestamp: chrono::Utc::now(),
        });
        self.publish_progress(&snapshot);
        snapshot
    }

    /// Jump to the previous segment; no-op at the first
    pub async fn skip_back(&self) -> PlaybackSnapshot {
        let (changed, snapshot) = {
            let mut session = self.session.write().await;
            let changed = session.skip_back();
            (changed, session.snapshot())
        };
        self.publish_skip(changed, &snapshot);
        snapshot
    }

    /// Jump to the next segment; no-op at the last
    pub async fn skip_forward(&self) -> PlaybackSnapshot {
        let (changed, snapshot) = {
            let mut session = self.session.write().await;
            let changed = session.skip_forward();
            (changed, session.snapshot())
        };
        self.publish_skip(changed, &snapshot);
        snapshot
    }

    /// Advance the speed cycle (1.0x -> 1.5x -> 2.0x -> 1.0x)
    ///
    /// The ticker period is fixed; speed scales the per-tick rate instead.
    pub async fn cycle_speed(&self) -> PlaybackSnapshot {
        let (speed, snapshot) = {
            let mut session = self.session.write().await;
            let speed = session.cycle_speed();
            (speed, session.snapshot())
        };
        info!("Playback speed set to {}", speed);
        self.broadcast_event(NarrationEvent::SpeedChanged {
            multiplier: speed.multiplier(),
            timestamp: chrono::Utc::now(),
        });
        self.publish_progress(&snapshot);
        snapshot
    }

    /// Replace the code handling mode; takes effect on the next tick
    pub async fn set_code_mode(&self, mode: CodeMode) -> PlaybackSnapshot {
        let (changed, snapshot) = {
            let mut session = self.session.write().await;
            let changed = session.set_code_mode(mode);
            (changed, session.snapshot())
        };
        if changed {
            info!("Code handling mode set to {}", mode);
            self.broadcast_event(NarrationEvent::CodeModeChanged {
                mode,
                timestamp: chrono::Utc::now(),
            });
            self.publish_progress(&snapshot);
        }
        snapshot
    }

    /// Replace the session's article, or clear it with `None`
    ///
    /// The old ticker is disposed before the swap, so two tick sources can
    /// never coexist. Index, progress and the playing flag reset
    /// unconditionally; narration never starts implicitly on selection.
    pub async fn set_article(&self, article: Option<Arc<Article>>) -> PlaybackSnapshot {
        self.stop_ticker().await;

        match &article {
            Some(article) => info!(
                "Article loaded: \"{}\" ({} segments)",
                article.title,
                article.segments.len()
            ),
            None => info!("Article cleared"),
        }

        let (was_playing, snapshot) = {
            let mut session = self.session.write().await;
            let was_playing = session.is_playing();
            session.set_article(article);
            (was_playing, session.snapshot())
        };

        self.broadcast_event(NarrationEvent::ArticleChanged {
            article_id: snapshot.article_id,
            timestamp: chrono::Utc::now(),
        });
        if was_playing {
            self.broadcast_event(NarrationEvent::PlaybackStateChanged {
                playing: false,
                timestamp: chrono::Utc::now(),
            });
        }
        self.publish_progress(&snapshot);
        snapshot
    }

    fn publish_skip(&self, changed: bool, snapshot: &PlaybackSnapshot) {
        if !changed {
            debug!("skip ignored: already at the boundary");
            return;
        }
        debug!("Skipped to segment {}", snapshot.segment_index);
        if let Some(article_id) = snapshot.article_id {
            self.broadcast_event(NarrationEvent::SegmentStarted {
                article_id,
                segment_index: snapshot.segment_index,
                timestamp: chrono::Utc::now(),
            });
        }
        self.publish_progress(snapshot);
    }

    fn publish_progress(&self, snapshot: &PlaybackSnapshot) {
        self.broadcast_event(NarrationEvent::PlaybackProgress {
            snapshot: snapshot.clone(),
            timestamp: chrono::Utc::now(),
        });
    }
}
