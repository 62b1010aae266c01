//! # CodeWave Narration Player Library (codewave-np)
//!
//! Playback engine that simulates narration of a segmented article.
//!
//! **Purpose:** Own the playback session for one article at a time, advance
//! a position pointer on a periodic tick, pace segments by content type and
//! code-handling mode, and expose transport controls (play/pause, skip,
//! speed cycling) with an event stream for a presentation layer.
//!
//! **Architecture:** Synchronous state machine (`PlaybackSession`) behind an
//! async facade (`NarrationEngine`) that owns the ticker task and broadcasts
//! `NarrationEvent`s. No I/O anywhere in the engine; the only fallible paths
//! are article and configuration loading.

pub mod config;
pub mod playback;

pub use config::Config;
pub use playback::NarrationEngine;
