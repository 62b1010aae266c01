//! Playback engine, session state machine and pacing

pub mod engine;
pub mod pace;
pub mod session;
mod ticker;

pub use engine::NarrationEngine;
pub use pace::Pace;
pub use session::{PlaybackSession, TickOutcome};
