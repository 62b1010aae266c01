//! Pacing parameters
//!
//! The narration rates were tuned against how the player feels to listen
//! to, not derived from anything, so they live in configuration rather
//! than code. Each parameter has a documented valid range; out-of-range
//! values from a config file are clamped, not rejected.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Progress units added per tick to a text segment at 1.0x speed
///
/// Valid range: [0.01, 50.0]
/// Default: 0.5 (a segment takes 100 ticks = 5 s at the default interval)
pub const DEFAULT_BASE_RATE: f64 = 0.5;

/// Rate multiplier for code segments in Label mode
///
/// Valid range: [0.1, 10.0]
/// Default: 2.0 (only the short label is read)
pub const DEFAULT_LABEL_FACTOR: f64 = 2.0;

/// Rate multiplier for code segments in Summary mode
///
/// Valid range: [0.1, 10.0]
/// Default: 0.8 (summary narration runs longer than prose)
pub const DEFAULT_SUMMARY_FACTOR: f64 = 0.8;

/// Ticker period in milliseconds
///
/// Valid range: [10, 1000]
/// Default: 50
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Pacing and tick-rate parameters for one playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceParams {
    pub base_rate: f64,
    pub label_factor: f64,
    pub summary_factor: f64,
    pub tick_interval_ms: u64,
}

impl Default for PaceParams {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_BASE_RATE,
            label_factor: DEFAULT_LABEL_FACTOR,
            summary_factor: DEFAULT_SUMMARY_FACTOR,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl PaceParams {
    /// Clamp every field into its valid range, logging each adjustment
    ///
    /// Called once when configuration is loaded, so the engine can treat
    /// the parameters as trusted afterwards.
    pub fn clamped(mut self) -> Self {
        self.base_rate = clamp_f64("base_rate", self.base_rate, 0.01, 50.0);
        self.label_factor = clamp_f64("label_factor", self.label_factor, 0.1, 10.0);
        self.summary_factor = clamp_f64("summary_factor", self.summary_factor, 0.1, 10.0);
        self.tick_interval_ms = clamp_u64("tick_interval_ms", self.tick_interval_ms, 10, 1000);
        self
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

fn clamp_f64(name: &str, value: f64, min: f64, max: f64) -> f64 {
    // NaN is treated as out of range low
    if value.is_nan() || value < min {
        warn!("{} = {} below valid minimum, clamping to {}", name, value, min);
        min
    } else if value > max {
        warn!("{} = {} above valid maximum, clamping to {}", name, value, max);
        max
    } else {
        value
    }
}

fn clamp_u64(name: &str, value: u64, min: u64, max: u64) -> u64 {
    if value < min {
        warn!("{} = {} below valid minimum, clamping to {}", name, value, min);
        min
    } else if value > max {
        warn!("{} = {} above valid maximum, clamping to {}", name, value, max);
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tuned_values() {
        let params = PaceParams::default();
        assert_eq!(params.base_rate, 0.5);
        assert_eq!(params.label_factor, 2.0);
        assert_eq!(params.summary_factor, 0.8);
        assert_eq!(params.tick_interval_ms, 50);
    }

    #[test]
    fn clamping_pulls_values_into_range() {
        let params = PaceParams {
            base_rate: 0.0,
            label_factor: 99.0,
            summary_factor: -1.0,
            tick_interval_ms: 5,
        }
        .clamped();

        assert_eq!(params.base_rate, 0.01);
        assert_eq!(params.label_factor, 10.0);
        assert_eq!(params.summary_factor, 0.1);
        assert_eq!(params.tick_interval_ms, 10);
    }

    #[test]
    fn clamping_treats_nan_as_below_range() {
        let params = PaceParams {
            base_rate: f64::NAN,
            ..PaceParams::default()
        }
        .clamped();
        assert_eq!(params.base_rate, 0.01);
    }

    #[test]
    fn in_range_values_pass_through() {
        let params = PaceParams {
            base_rate: 1.25,
            label_factor: 3.0,
            summary_factor: 0.5,
            tick_interval_ms: 100,
        };
        assert_eq!(params.clone().clamped(), params);
    }
}
