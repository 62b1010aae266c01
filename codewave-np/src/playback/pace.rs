//! Pace policy
//!
//! Maps (segment kind, code handling mode, speed step) to an advance rate
//! for one tick. Pure and total: every combination yields a pace, and an
//! unknown combination cannot exist because both inputs are closed enums.

use codewave_common::events::{CodeMode, PlaybackSpeed};
use codewave_common::model::Segment;
use codewave_common::params::PaceParams;

/// Advance decision for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pace {
    /// Add this many progress units (always positive)
    Advance(f64),

    /// Jump progress to 100 this tick; the segment is never paced
    ///
    /// Distinct variant rather than a magic rate so callers must handle
    /// the bypass case explicitly.
    CompleteSegment,
}

/// Effective pace for `segment` under the given mode and speed
///
/// Text is read at the base rate. Code is skipped outright, fast-passed
/// via its spoken label, or narrated through its summary, each with its
/// own factor relative to prose. The speed multiplier scales everything
/// except the skip bypass.
pub fn pace_for(
    segment: &Segment,
    code_mode: CodeMode,
    speed: PlaybackSpeed,
    params: &PaceParams,
) -> Pace {
    let factor = match segment {
        Segment::Text { .. } => 1.0,
        Segment::Code { .. } => match code_mode {
            CodeMode::Skip => return Pace::CompleteSegment,
            CodeMode::Label => params.label_factor,
            CodeMode::Summary => params.summary_factor,
        },
    };

    Pace::Advance(params.base_rate * factor * speed.multiplier())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> Segment {
        Segment::Text {
            content: "prose".to_string(),
        }
    }

    fn code() -> Segment {
        Segment::Code {
            language: "rust".to_string(),
            raw_code: "let x = 1;".to_string(),
            summary: "Binds one to x.".to_string(),
            spoken_label: "Rust code block".to_string(),
        }
    }

    #[test]
    fn text_reads_at_base_rate() {
        let params = PaceParams::default();
        let pace = pace_for(&text(), CodeMode::Summary, PlaybackSpeed::Normal, &params);
        assert_eq!(pace, Pace::Advance(0.5));
    }

    #[test]
    fn text_ignores_code_mode() {
        let params = PaceParams::default();
        for mode in [CodeMode::Skip, CodeMode::Label, CodeMode::Summary] {
            let pace = pace_for(&text(), mode, PlaybackSpeed::Normal, &params);
            assert_eq!(pace, Pace::Advance(0.5));
        }
    }

    #[test]
    fn skip_mode_bypasses_code() {
        let params = PaceParams::default();
        for speed in [
            PlaybackSpeed::Normal,
            PlaybackSpeed::Faster,
            PlaybackSpeed::Double,
        ] {
            let pace = pace_for(&code(), CodeMode::Skip, speed, &params);
            assert_eq!(pace, Pace::CompleteSegment);
        }
    }

    #[test]
    fn label_mode_is_a_fast_pass() {
        let params = PaceParams::default();
        let pace = pace_for(&code(), CodeMode::Label, PlaybackSpeed::Normal, &params);
        assert_eq!(pace, Pace::Advance(1.0)); // 0.5 * 2.0
    }

    #[test]
    fn summary_mode_is_slower_than_prose() {
        let params = PaceParams::default();
        let pace = pace_for(&code(), CodeMode::Summary, PlaybackSpeed::Normal, &params);
        assert_eq!(pace, Pace::Advance(0.4)); // 0.5 * 0.8
    }

    #[test]
    fn speed_multiplier_scales_the_rate() {
        let params = PaceParams::default();
        let pace = pace_for(&text(), CodeMode::Summary, PlaybackSpeed::Double, &params);
        assert_eq!(pace, Pace::Advance(1.0));

        let pace = pace_for(&code(), CodeMode::Label, PlaybackSpeed::Faster, &params);
        assert_eq!(pace, Pace::Advance(1.5)); // 0.5 * 2.0 * 1.5
    }

    #[test]
    fn custom_params_flow_through() {
        let params = PaceParams {
            base_rate: 1.0,
            label_factor: 3.0,
            summary_factor: 0.25,
            ..PaceParams::default()
        };
        assert_eq!(
            pace_for(&code(), CodeMode::Label, PlaybackSpeed::Normal, &params),
            Pace::Advance(3.0)
        );
        assert_eq!(
            pace_for(&code(), CodeMode::Summary, PlaybackSpeed::Normal, &params),
            Pace::Advance(0.25)
        );
    }
}
