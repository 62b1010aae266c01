//! Playback session state machine
//!
//! Owns the mutable state of one narration session: current segment index,
//! fractional progress within it, the playing flag, and the user-selected
//! speed and code-handling mode. Purely synchronous; the engine serializes
//! access and drives `tick()` from its ticker task.
//!
//! Two conceptual states: Idle (`!playing`) and Advancing. All transitions
//! are total; out-of-range requests are ignored rather than rejected.

use crate::playback::pace::{pace_for, Pace};
use codewave_common::events::{CodeMode, PlaybackSnapshot, PlaybackSpeed};
use codewave_common::model::{Article, Segment};
use codewave_common::params::PaceParams;
use std::sync::Arc;
use tracing::debug;

/// Result of one advance step, used by the engine to decide what to publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing (or no narratable article); nothing happened
    Idle,

    /// Progress accumulated within the current segment
    Advanced,

    /// The current segment completed and the pointer rolled to this index
    SegmentChanged(usize),

    /// The last segment completed; playback stopped
    Finished,
}

/// Mutable playback state bound to one article at a time
#[derive(Debug)]
pub struct PlaybackSession {
    /// Read-only article reference, dropped on replacement
    article: Option<Arc<Article>>,
    segment_index: usize,
    /// Position within the current segment, 0.0..=100.0
    progress: f64,
    playing: bool,
    speed: PlaybackSpeed,
    code_mode: CodeMode,
    params: PaceParams,
}

impl PlaybackSession {
    pub fn new(params: PaceParams) -> Self {
        Self {
            article: None,
            segment_index: 0,
            progress: 0.0,
            playing: false,
            speed: PlaybackSpeed::default(),
            code_mode: CodeMode::default(),
            params,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn params(&self) -> &PaceParams {
        &self.params
    }

    /// True when the loaded article has at least one segment
    fn can_play(&self) -> bool {
        self.article
            .as_ref()
            .map(|a| !a.segments.is_empty())
            .unwrap_or(false)
    }

    fn current_segment(&self) -> Option<&Segment> {
        self.article
            .as_ref()
            .and_then(|a| a.segments.get(self.segment_index))
    }

    /// Replace (or clear) the article
    ///
    /// Unconditionally resets index, progress and the playing flag, so no
    /// state leaks between articles. Starting narration is never implicit:
    /// the caller must issue `play_pause` again.
    pub fn set_article(&mut self, article: Option<Arc<Article>>) {
        self.article = article;
        self.segment_index = 0;
        self.progress = 0.0;
        self.playing = false;
    }

    /// Toggle the playing flag
    ///
    /// Returns false (and stays Idle) when there is nothing to narrate.
    pub fn play_pause(&mut self) -> bool {
        if !self.playing && !self.can_play() {
            debug!("play ignored: no narratable article");
            return false;
        }
        self.playing = !self.playing;
        true
    }

    /// Step back one segment; no-op (returns false) at the first
    pub fn skip_back(&mut self) -> bool {
        if self.segment_index == 0 {
            return false;
        }
        self.segment_index -= 1;
        self.progress = 0.0;
        true
    }

    /// Step forward one segment; no-op (returns false) at the last
    pub fn skip_forward(&mut self) -> bool {
        let count = self.article.as_ref().map(|a| a.segments.len()).unwrap_or(0);
        if count == 0 || self.segment_index + 1 >= count {
            return false;
        }
        self.segment_index += 1;
        self.progress = 0.0;
        true
    }

    /// Advance the speed cycle, returning the new step
    pub fn cycle_speed(&mut self) -> PlaybackSpeed {
        self.speed = self.speed.next();
        self.speed
    }

    /// Replace the code handling mode; returns false when unchanged
    ///
    /// Takes effect on the next tick. Progress already accumulated under
    /// the previous mode is kept as-is.
    pub fn set_code_mode(&mut self, mode: CodeMode) -> bool {
        if self.code_mode == mode {
            return false;
        }
        self.code_mode = mode;
        true
    }

    /// One advance step
    ///
    /// Comparisons use `>= 100.0`, never equality: accumulated floating
    /// increments will not land exactly on 100.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }
        let article = match &self.article {
            Some(a) if !a.segments.is_empty() => Arc::clone(a),
            // A cleared or empty article cannot stay in Advancing
            _ => {
                self.playing = false;
                return TickOutcome::Idle;
            }
        };

        let segment = &article.segments[self.segment_index];
        match pace_for(segment, self.code_mode, self.speed, &self.params) {
            Pace::CompleteSegment => self.progress = 100.0,
            Pace::Advance(rate) => self.progress += rate,
        }

        if self.progress < 100.0 {
            return TickOutcome::Advanced;
        }

        if self.segment_index + 1 < article.segments.len() {
            // Roll to the next segment in the same tick; no tick is skipped
            self.segment_index += 1;
            self.progress = 0.0;
            TickOutcome::SegmentChanged(self.segment_index)
        } else {
            self.progress = 100.0;
            self.playing = false;
            TickOutcome::Finished
        }
    }

    /// Immutable view of the current state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            article_id: self.article.as_ref().map(|a| a.id),
            segment_index: self.segment_index,
            segment_count: self.article.as_ref().map(|a| a.segments.len()).unwrap_or(0),
            progress: self.progress,
            playing: self.playing,
            speed_multiplier: self.speed.multiplier(),
            code_mode: self.code_mode,
            current_segment: self.current_segment().cloned(),
        }
    }
}
