//! Event types for the CodeWave narration player
//!
//! The engine publishes these over a `tokio::sync::broadcast` channel; the
//! presentation layer subscribes and renders. Every variant carries a UTC
//! timestamp so downstream consumers can order and display events without
//! trusting their own clocks.

use crate::model::Segment;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// How code segments are narrated (and paced)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeMode {
    /// Bypass code entirely; the segment completes on its next tick
    Skip,
    /// Announce only the short spoken label (fast pass)
    Label,
    /// Narrate the full summary (slower than prose)
    #[default]
    Summary,
}

impl std::fmt::Display for CodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeMode::Skip => write!(f, "skip"),
            CodeMode::Label => write!(f, "label"),
            CodeMode::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for CodeMode {
    type Err = String;

    /// Parses the wire names. Callers at lossy boundaries should fall back
    /// to `CodeMode::default()` rather than propagate the error.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(CodeMode::Skip),
            "label" => Ok(CodeMode::Label),
            "summary" => Ok(CodeMode::Summary),
            other => Err(format!("unknown code mode: {other}")),
        }
    }
}

/// Playback speed step
///
/// The speed control is a fixed three-step cycle, so it is a closed enum
/// rather than a bare multiplier: `cycle_speed` is total and three
/// applications always return to the starting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackSpeed {
    /// 1.0x
    #[default]
    Normal,
    /// 1.5x
    Faster,
    /// 2.0x
    Double,
}

impl PlaybackSpeed {
    pub fn multiplier(self) -> f64 {
        match self {
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Faster => 1.5,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Next step in the fixed cycle 1.0 -> 1.5 -> 2.0 -> 1.0
    pub fn next(self) -> Self {
        match self {
            PlaybackSpeed::Normal => PlaybackSpeed::Faster,
            PlaybackSpeed::Faster => PlaybackSpeed::Double,
            PlaybackSpeed::Double => PlaybackSpeed::Normal,
        }
    }
}

impl std::fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x", self.multiplier())
    }
}

/// Immutable view of the session state, published per tick and per command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Current article, None when no article is loaded
    pub article_id: Option<Uuid>,
    /// Index of the segment being narrated (0 when no article)
    pub segment_index: usize,
    /// Total segments in the current article (0 when no article)
    pub segment_count: usize,
    /// Position within the current segment, 0.0..=100.0
    pub progress: f64,
    pub playing: bool,
    /// Numeric speed multiplier (1.0, 1.5 or 2.0)
    pub speed_multiplier: f64,
    pub code_mode: CodeMode,
    /// The segment under the position pointer, for the renderer
    pub current_segment: Option<Segment>,
}

/// Narration player event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NarrationEvent {
    /// Playback started or stopped
    PlaybackStateChanged {
        playing: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Article replaced (or cleared, when `article_id` is None)
    ArticleChanged {
        article_id: Option<Uuid>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The position pointer entered a segment
    SegmentStarted {
        article_id: Uuid,
        segment_index: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The last segment finished narrating; playback stopped on its own
    ArticleCompleted {
        article_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Speed cycle advanced
    SpeedChanged {
        multiplier: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Code handling mode replaced
    CodeModeChanged {
        mode: CodeMode,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Position update, sent on every tick and after every command
    PlaybackProgress {
        snapshot: PlaybackSnapshot,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_cycle_closes_after_three_steps() {
        let start = PlaybackSpeed::Normal;
        assert_eq!(start.next().next().next(), start);
        let start = PlaybackSpeed::Faster;
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn speed_multipliers_match_the_steps() {
        assert_eq!(PlaybackSpeed::Normal.multiplier(), 1.0);
        assert_eq!(PlaybackSpeed::Faster.multiplier(), 1.5);
        assert_eq!(PlaybackSpeed::Double.multiplier(), 2.0);
    }

    #[test]
    fn code_mode_parses_wire_names() {
        assert_eq!("skip".parse::<CodeMode>().unwrap(), CodeMode::Skip);
        assert_eq!("Label".parse::<CodeMode>().unwrap(), CodeMode::Label);
        assert_eq!("SUMMARY".parse::<CodeMode>().unwrap(), CodeMode::Summary);
        assert!("verbatim".parse::<CodeMode>().is_err());
    }

    #[test]
    fn unknown_code_mode_falls_back_to_default() {
        let mode = "verbatim".parse::<CodeMode>().unwrap_or_default();
        assert_eq!(mode, CodeMode::Summary);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = NarrationEvent::PlaybackStateChanged {
            playing: true,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"PlaybackStateChanged\""));

        let event = NarrationEvent::CodeModeChanged {
            mode: CodeMode::Skip,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"mode\":\"skip\""));
    }
}
