//! Narration engine module
//!
//! **Module Structure:**
//! - `core.rs`: engine struct, tick orchestration, event broadcasting
//! - `transport.rs`: transport command surface (play/pause, skip, speed,
//!   code mode, article replacement)

mod core;
mod transport;

// Re-export NarrationEngine as public API
pub use core::NarrationEngine;
